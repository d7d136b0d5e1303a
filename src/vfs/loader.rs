//! VFS descriptor loading.
//!
//! Builds the entry map for an [`InMemoryFs`](crate::fs::InMemoryFs) from one
//! of three sources: an XML descriptor file, a host directory imported into
//! memory (compatibility mode, nothing on disk is modified), or the built-in
//! default layout used when no source is given or loading fails.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

use super::xml::{self, XmlElement};
use crate::fs::FsEntry;

/// Descriptor loading errors
#[derive(Error, Debug)]
pub enum VfsError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid XML: {0}")]
    Xml(String),

    #[error("expected root element <vfs>")]
    MissingRoot,

    #[error("missing <dir name=\"/\"> under <vfs>")]
    MissingTopDir,

    #[error("<{tag}> element is missing the 'name' attribute")]
    MissingName { tag: String },

    #[error("invalid entry name '{name}'")]
    InvalidName { name: String },

    #[error("conflicting entries for '{path}'")]
    Conflict { path: String },

    #[error("cannot decode content of file '{name}': {reason}")]
    BadContent { name: String, reason: String },

    #[error("'{path}' is neither an .xml descriptor nor a directory")]
    UnsupportedSource { path: PathBuf },
}

/// Load a descriptor from a path: an `.xml` file or a directory to import.
pub fn load(path: &Path) -> Result<HashMap<String, FsEntry>, VfsError> {
    let meta = std::fs::metadata(path).map_err(|source| VfsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("xml"))
            .unwrap_or(false)
    {
        let text = std::fs::read_to_string(path).map_err(|source| VfsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = load_xml_str(&text)?;
        debug!(path = %path.display(), entries = entries.len(), "VFS loaded from XML descriptor");
        Ok(entries)
    } else if meta.is_dir() {
        let entries = import_host_dir(path)?;
        debug!(path = %path.display(), entries = entries.len(), "VFS imported from host directory");
        Ok(entries)
    } else {
        Err(VfsError::UnsupportedSource {
            path: path.to_path_buf(),
        })
    }
}

/// Parse an XML descriptor into an entry map.
///
/// Expected structure:
/// ```xml
/// <vfs>
///   <dir name="/">
///     <dir name="etc">
///       <file name="motd" encoding="utf-8">hello</file>
///     </dir>
///     <file name="blob" base64="true">AAECAw==</file>
///   </dir>
/// </vfs>
/// ```
pub fn load_xml_str(text: &str) -> Result<HashMap<String, FsEntry>, VfsError> {
    let root = xml::parse(text).map_err(VfsError::Xml)?;
    if root.name != "vfs" {
        return Err(VfsError::MissingRoot);
    }
    let top = root
        .children
        .iter()
        .find(|c| c.name == "dir" && c.attr("name") == Some("/"))
        .ok_or(VfsError::MissingTopDir)?;

    let mut entries = HashMap::new();
    entries.insert("/".to_string(), FsEntry::directory());
    build_dir(top, "/", &mut entries)?;
    Ok(entries)
}

fn build_dir(
    el: &XmlElement,
    dir_path: &str,
    entries: &mut HashMap<String, FsEntry>,
) -> Result<(), VfsError> {
    for child in &el.children {
        match child.name.as_str() {
            "dir" => {
                let name = required_name(child)?;
                let path = join(dir_path, &name);
                match entries.get(&path) {
                    Some(FsEntry::File { .. }) => {
                        return Err(VfsError::Conflict { path });
                    }
                    Some(FsEntry::Directory { .. }) => {}
                    None => {
                        entries.insert(path.clone(), FsEntry::directory());
                    }
                }
                build_dir(child, &path, entries)?;
            }
            "file" => {
                let name = required_name(child)?;
                let path = join(dir_path, &name);
                if let Some(FsEntry::Directory { .. }) = entries.get(&path) {
                    return Err(VfsError::Conflict { path });
                }
                let content = decode_content(child, &name)?;
                entries.insert(path, FsEntry::file(content));
            }
            // Unknown tags are ignored rather than rejected
            _ => {}
        }
    }
    Ok(())
}

fn required_name(el: &XmlElement) -> Result<String, VfsError> {
    let name = el
        .attr("name")
        .ok_or_else(|| VfsError::MissingName { tag: el.name.clone() })?;
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(VfsError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

fn decode_content(el: &XmlElement, name: &str) -> Result<Vec<u8>, VfsError> {
    let is_base64 = el
        .attr("base64")
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    if is_base64 {
        return STANDARD
            .decode(el.text.trim().as_bytes())
            .map_err(|e| VfsError::BadContent {
                name: name.to_string(),
                reason: e.to_string(),
            });
    }

    match el.attr("encoding").map(|e| e.to_lowercase()) {
        None => Ok(el.text.as_bytes().to_vec()),
        Some(enc) => match enc.as_str() {
            "utf-8" | "utf8" => Ok(el.text.as_bytes().to_vec()),
            "ascii" => {
                if el.text.is_ascii() {
                    Ok(el.text.as_bytes().to_vec())
                } else {
                    Err(VfsError::BadContent {
                        name: name.to_string(),
                        reason: "non-ascii character in ascii content".to_string(),
                    })
                }
            }
            "latin1" | "latin-1" | "iso-8859-1" => el
                .text
                .chars()
                .map(|c| {
                    let code = c as u32;
                    if code <= 0xff {
                        Ok(code as u8)
                    } else {
                        Err(VfsError::BadContent {
                            name: name.to_string(),
                            reason: format!("character '{}' not representable in latin1", c),
                        })
                    }
                })
                .collect(),
            other => Err(VfsError::BadContent {
                name: name.to_string(),
                reason: format!("unknown encoding '{}'", other),
            }),
        },
    }
}

/// Import a host directory tree into an entry map. Unreadable files are
/// imported as empty; nothing on disk is modified.
pub fn import_host_dir(path: &Path) -> Result<HashMap<String, FsEntry>, VfsError> {
    let mut entries = HashMap::new();
    entries.insert("/".to_string(), FsEntry::directory());
    walk_host_dir(path, "/", &mut entries)?;
    Ok(entries)
}

fn walk_host_dir(
    host_dir: &Path,
    vpath: &str,
    entries: &mut HashMap<String, FsEntry>,
) -> Result<(), VfsError> {
    let read_dir = std::fs::read_dir(host_dir).map_err(|source| VfsError::Io {
        path: host_dir.to_path_buf(),
        source,
    })?;
    for entry in read_dir {
        let entry = entry.map_err(|source| VfsError::Io {
            path: host_dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        let child_vpath = join(vpath, &name);
        if entry.path().is_dir() {
            entries.insert(child_vpath.clone(), FsEntry::directory());
            walk_host_dir(&entry.path(), &child_vpath, entries)?;
        } else {
            let content = std::fs::read(entry.path()).unwrap_or_default();
            entries.insert(child_vpath, FsEntry::file(content));
        }
    }
    Ok(())
}

/// The minimal layout used when no descriptor is given or loading fails.
pub fn default_layout(username: &str) -> HashMap<String, FsEntry> {
    let user = if username.is_empty() { "user" } else { username };
    let mut entries = HashMap::new();
    entries.insert("/".to_string(), FsEntry::directory());
    entries.insert("/etc".to_string(), FsEntry::directory());
    entries.insert("/home".to_string(), FsEntry::directory());
    entries.insert(format!("/home/{}", user), FsEntry::directory());
    entries.insert(
        "/readme.txt".to_string(),
        FsEntry::file(b"This is VFS".to_vec()),
    );
    entries.insert(
        "/etc/motd".to_string(),
        FsEntry::file(b"Welcome to the shell emulator!".to_vec()),
    );
    entries.insert(
        format!("/home/{}/notes.txt", user),
        FsEntry::file(b"Hello from the VFS!\n".to_vec()),
    );
    entries
}

fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<vfs>
  <dir name="/">
    <dir name="etc">
      <file name="motd" encoding="utf-8">hello there</file>
    </dir>
    <file name="blob" base64="true">AAECAw==</file>
    <note>ignored</note>
  </dir>
</vfs>
"#;

    #[test]
    fn test_load_xml_builds_tree() {
        let entries = load_xml_str(SAMPLE).unwrap();
        assert!(matches!(entries.get("/"), Some(FsEntry::Directory { .. })));
        assert!(matches!(entries.get("/etc"), Some(FsEntry::Directory { .. })));
        match entries.get("/etc/motd") {
            Some(FsEntry::File { content, .. }) => assert_eq!(content, b"hello there"),
            other => panic!("expected file, got {:?}", other),
        }
        match entries.get("/blob") {
            Some(FsEntry::File { content, .. }) => assert_eq!(content, &[0u8, 1, 2, 3]),
            other => panic!("expected file, got {:?}", other),
        }
        // the unknown <note> tag adds nothing
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_load_xml_wrong_root() {
        let err = load_xml_str("<filesystem/>").unwrap_err();
        assert!(matches!(err, VfsError::MissingRoot));
    }

    #[test]
    fn test_load_xml_missing_top_dir() {
        let err = load_xml_str("<vfs><dir name=\"etc\"/></vfs>").unwrap_err();
        assert!(matches!(err, VfsError::MissingTopDir));
    }

    #[test]
    fn test_load_xml_missing_name_attr() {
        let err = load_xml_str("<vfs><dir name=\"/\"><file>x</file></dir></vfs>").unwrap_err();
        assert!(matches!(err, VfsError::MissingName { .. }));
    }

    #[test]
    fn test_load_xml_invalid_base64() {
        let err =
            load_xml_str("<vfs><dir name=\"/\"><file name=\"b\" base64=\"yes\">!!</file></dir></vfs>")
                .unwrap_err();
        assert!(matches!(err, VfsError::BadContent { .. }));
    }

    #[test]
    fn test_load_xml_unknown_encoding() {
        let err = load_xml_str(
            "<vfs><dir name=\"/\"><file name=\"f\" encoding=\"koi8-r\">x</file></dir></vfs>",
        )
        .unwrap_err();
        assert!(matches!(err, VfsError::BadContent { .. }));
    }

    #[test]
    fn test_load_xml_latin1() {
        let entries = load_xml_str(
            "<vfs><dir name=\"/\"><file name=\"f\" encoding=\"latin1\">caf\u{e9}</file></dir></vfs>",
        )
        .unwrap();
        match entries.get("/f") {
            Some(FsEntry::File { content, .. }) => assert_eq!(content, &[0x63, 0x61, 0x66, 0xe9]),
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_load_xml_dir_file_conflict() {
        let err = load_xml_str(
            "<vfs><dir name=\"/\"><file name=\"x\">a</file><dir name=\"x\"/></dir></vfs>",
        )
        .unwrap_err();
        assert!(matches!(err, VfsError::Conflict { .. }));
    }

    #[test]
    fn test_load_xml_malformed() {
        let err = load_xml_str("<vfs><dir name=\"/\">").unwrap_err();
        assert!(matches!(err, VfsError::Xml(_)));
    }

    #[test]
    fn test_default_layout() {
        let entries = default_layout("alice");
        assert!(entries.contains_key("/home/alice/notes.txt"));
        assert!(entries.contains_key("/etc/motd"));
        assert!(entries.contains_key("/readme.txt"));
    }

    #[test]
    fn test_default_layout_empty_username() {
        let entries = default_layout("");
        assert!(entries.contains_key("/home/user"));
    }

    #[test]
    fn test_load_missing_path() {
        let err = load(Path::new("/definitely/not/here.xml")).unwrap_err();
        assert!(matches!(err, VfsError::Io { .. }));
    }

    #[test]
    fn test_import_host_dir() {
        let base = std::env::temp_dir().join(format!("vfs-shell-import-{}", std::process::id()));
        let sub = base.join("sub");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(base.join("top.txt"), b"top").unwrap();
        std::fs::write(sub.join("inner.txt"), b"inner").unwrap();

        let entries = import_host_dir(&base).unwrap();
        std::fs::remove_dir_all(&base).unwrap();

        assert!(matches!(entries.get("/sub"), Some(FsEntry::Directory { .. })));
        match entries.get("/top.txt") {
            Some(FsEntry::File { content, .. }) => assert_eq!(content, b"top"),
            other => panic!("expected file, got {:?}", other),
        }
        match entries.get("/sub/inner.txt") {
            Some(FsEntry::File { content, .. }) => assert_eq!(content, b"inner"),
            other => panic!("expected file, got {:?}", other),
        }
    }
}
