//! In-Memory File System Implementation
//!
//! A pure in-memory virtual file system backing the shell emulator.

use std::collections::HashMap;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::types::*;

/// In-memory virtual file system.
pub struct InMemoryFs {
    data: RwLock<HashMap<String, FsEntry>>,
}

impl InMemoryFs {
    /// Create a new empty in-memory filesystem.
    pub fn new() -> Self {
        let mut data = HashMap::new();
        data.insert("/".to_string(), FsEntry::directory());
        Self { data: RwLock::new(data) }
    }

    /// Create a filesystem from a pre-built entry map (descriptor loading).
    /// The root directory is added if the map doesn't carry one.
    pub fn from_entries(mut entries: HashMap<String, FsEntry>) -> Self {
        entries
            .entry("/".to_string())
            .or_insert_with(FsEntry::directory);
        Self { data: RwLock::new(entries) }
    }
}

impl Default for InMemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Path utilities (free functions operating on the path-keyed map)
// ============================================================================

fn normalize_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }
    let mut normalized = path.to_string();
    if normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }
    if !normalized.starts_with('/') {
        normalized = format!("/{}", normalized);
    }
    let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
    let mut resolved: Vec<&str> = Vec::new();
    for part in parts {
        if part == ".." {
            // ".." above the root stays at the root
            resolved.pop();
        } else {
            resolved.push(part);
        }
    }
    if resolved.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", resolved.join("/"))
    }
}

fn dirname(path: &str) -> String {
    let normalized = normalize_path(path);
    if normalized == "/" {
        return "/".to_string();
    }
    match normalized.rfind('/') {
        Some(0) => "/".to_string(),
        Some(pos) => normalized[..pos].to_string(),
        None => "/".to_string(),
    }
}

fn base_name(path: &str) -> String {
    let normalized = normalize_path(path);
    if normalized == "/" {
        return "/".to_string();
    }
    normalized.rsplit('/').next().unwrap_or("").to_string()
}

/// List the names of the direct children of a directory path.
fn child_names(data: &HashMap<String, FsEntry>, dir: &str) -> Vec<String> {
    let mut names: Vec<String> = data
        .keys()
        .filter(|k| k.as_str() != "/" && dirname(k) == dir && k.as_str() != dir)
        .map(|k| base_name(k))
        .collect();
    names.sort_by_key(|n| n.to_lowercase());
    names
}

fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

// ============================================================================
// FileSystem trait implementation
// ============================================================================

#[async_trait]
impl FileSystem for InMemoryFs {
    async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let data = self.data.read().await;
        let normalized = normalize_path(path);
        match data.get(&normalized) {
            Some(FsEntry::File { content, .. }) => {
                Ok(String::from_utf8_lossy(content).to_string())
            }
            Some(FsEntry::Directory { .. }) => Err(FsError::IsDirectory {
                path: path.to_string(),
                operation: "read".to_string(),
            }),
            None => Err(FsError::NotFound {
                path: path.to_string(),
                operation: "open".to_string(),
            }),
        }
    }

    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), FsError> {
        let mut data = self.data.write().await;
        let normalized = normalize_path(path);
        if normalized == "/" {
            return Err(FsError::IsDirectory {
                path: path.to_string(),
                operation: "write".to_string(),
            });
        }
        if let Some(FsEntry::Directory { .. }) = data.get(&normalized) {
            return Err(FsError::IsDirectory {
                path: path.to_string(),
                operation: "write".to_string(),
            });
        }
        let parent = dirname(&normalized);
        match data.get(&parent) {
            Some(FsEntry::Directory { .. }) => {}
            Some(_) => {
                return Err(FsError::NotDirectory {
                    path: parent,
                    operation: "write".to_string(),
                })
            }
            None => {
                return Err(FsError::NotFound {
                    path: parent,
                    operation: "write".to_string(),
                })
            }
        }
        data.insert(normalized, FsEntry::File {
            content: content.to_vec(),
            mtime: SystemTime::now(),
        });
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        let data = self.data.read().await;
        data.contains_key(&normalize_path(path))
    }

    async fn stat(&self, path: &str) -> Result<FsStat, FsError> {
        let data = self.data.read().await;
        let normalized = normalize_path(path);
        match data.get(&normalized) {
            Some(FsEntry::File { content, mtime }) => Ok(FsStat {
                is_file: true,
                is_directory: false,
                size: content.len() as u64,
                mtime: *mtime,
            }),
            Some(FsEntry::Directory { mtime }) => Ok(FsStat {
                is_file: false,
                is_directory: true,
                size: 0,
                mtime: *mtime,
            }),
            None => Err(FsError::NotFound {
                path: path.to_string(),
                operation: "stat".to_string(),
            }),
        }
    }

    async fn mkdir(&self, path: &str, options: &MkdirOptions) -> Result<(), FsError> {
        let mut data = self.data.write().await;
        let normalized = normalize_path(path);
        if let Some(entry) = data.get(&normalized) {
            if entry.is_directory() && options.recursive {
                return Ok(());
            }
            return Err(FsError::AlreadyExists {
                path: path.to_string(),
                operation: "mkdir".to_string(),
            });
        }
        if options.recursive {
            let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();
            let mut current = String::new();
            for part in parts {
                current = format!("{}/{}", current, part);
                match data.get(&current) {
                    Some(FsEntry::Directory { .. }) => {}
                    Some(_) => {
                        return Err(FsError::NotDirectory {
                            path: current,
                            operation: "mkdir".to_string(),
                        })
                    }
                    None => {
                        data.insert(current.clone(), FsEntry::directory());
                    }
                }
            }
            return Ok(());
        }
        let parent = dirname(&normalized);
        match data.get(&parent) {
            Some(FsEntry::Directory { .. }) => {}
            Some(_) => {
                return Err(FsError::NotDirectory {
                    path: parent,
                    operation: "mkdir".to_string(),
                })
            }
            None => {
                return Err(FsError::NotFound {
                    path: parent,
                    operation: "mkdir".to_string(),
                })
            }
        }
        data.insert(normalized, FsEntry::directory());
        Ok(())
    }

    async fn readdir(&self, path: &str) -> Result<Vec<String>, FsError> {
        let data = self.data.read().await;
        let normalized = normalize_path(path);
        match data.get(&normalized) {
            Some(FsEntry::Directory { .. }) => Ok(child_names(&data, &normalized)),
            Some(_) => Err(FsError::NotDirectory {
                path: path.to_string(),
                operation: "scandir".to_string(),
            }),
            None => Err(FsError::NotFound {
                path: path.to_string(),
                operation: "scandir".to_string(),
            }),
        }
    }

    async fn readdir_with_file_types(&self, path: &str) -> Result<Vec<DirentEntry>, FsError> {
        let data = self.data.read().await;
        let normalized = normalize_path(path);
        match data.get(&normalized) {
            Some(FsEntry::Directory { .. }) => {
                let entries = child_names(&data, &normalized)
                    .into_iter()
                    .map(|name| {
                        let full = join(&normalized, &name);
                        let is_dir = data.get(&full).map(|e| e.is_directory()).unwrap_or(false);
                        DirentEntry {
                            name,
                            is_file: !is_dir,
                            is_directory: is_dir,
                        }
                    })
                    .collect();
                Ok(entries)
            }
            Some(_) => Err(FsError::NotDirectory {
                path: path.to_string(),
                operation: "scandir".to_string(),
            }),
            None => Err(FsError::NotFound {
                path: path.to_string(),
                operation: "scandir".to_string(),
            }),
        }
    }

    async fn cp(&self, src: &str, dest: &str, options: &CpOptions) -> Result<(), FsError> {
        let mut data = self.data.write().await;
        let src_path = normalize_path(src);
        let dest_path = normalize_path(dest);

        let src_entry = match data.get(&src_path) {
            Some(entry) => entry.clone(),
            None => {
                return Err(FsError::NotFound {
                    path: src.to_string(),
                    operation: "cp".to_string(),
                })
            }
        };

        if src_path == dest_path {
            return Err(FsError::InvalidArgument {
                path: dest.to_string(),
                operation: "cp".to_string(),
            });
        }
        // Copying a directory into itself would never terminate
        if src_entry.is_directory() && dest_path.starts_with(&format!("{}/", src_path)) {
            return Err(FsError::InvalidArgument {
                path: dest.to_string(),
                operation: "cp".to_string(),
            });
        }

        let parent = dirname(&dest_path);
        match data.get(&parent) {
            Some(FsEntry::Directory { .. }) => {}
            Some(_) => {
                return Err(FsError::NotDirectory {
                    path: parent,
                    operation: "cp".to_string(),
                })
            }
            None => {
                return Err(FsError::NotFound {
                    path: parent,
                    operation: "cp".to_string(),
                })
            }
        }

        match src_entry {
            FsEntry::File { content, .. } => {
                // A file copy may overwrite an existing file, never a directory
                if let Some(FsEntry::Directory { .. }) = data.get(&dest_path) {
                    return Err(FsError::IsDirectory {
                        path: dest.to_string(),
                        operation: "cp".to_string(),
                    });
                }
                data.insert(dest_path, FsEntry::file(content));
                Ok(())
            }
            FsEntry::Directory { .. } => {
                if !options.recursive {
                    return Err(FsError::IsDirectory {
                        path: src.to_string(),
                        operation: "cp".to_string(),
                    });
                }
                // Directory copies never merge into an existing target
                if data.contains_key(&dest_path) {
                    return Err(FsError::AlreadyExists {
                        path: dest.to_string(),
                        operation: "cp".to_string(),
                    });
                }
                let prefix = format!("{}/", src_path);
                let subtree: Vec<(String, FsEntry)> = data
                    .iter()
                    .filter(|(k, _)| k.starts_with(&prefix))
                    .map(|(k, v)| (k[prefix.len()..].to_string(), v.clone()))
                    .collect();
                data.insert(dest_path.clone(), FsEntry::directory());
                for (suffix, entry) in subtree {
                    let target = format!("{}/{}", dest_path, suffix);
                    let copied = match entry {
                        FsEntry::File { content, .. } => FsEntry::file(content),
                        FsEntry::Directory { .. } => FsEntry::directory(),
                    };
                    data.insert(target, copied);
                }
                Ok(())
            }
        }
    }

    fn resolve_path(&self, base: &str, path: &str) -> String {
        if path.starts_with('/') {
            normalize_path(path)
        } else {
            normalize_path(&format!("{}/{}", base, path))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
