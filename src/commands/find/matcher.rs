use glob::Pattern;

use super::types::{FileType, FindSpec};

/// Compiled entry filter for a find invocation.
#[derive(Debug)]
pub struct Matcher {
    pattern: Option<Pattern>,
    file_type: Option<FileType>,
}

impl Matcher {
    pub fn new(spec: &FindSpec) -> Result<Self, String> {
        let pattern = match &spec.name_pattern {
            Some(p) => Some(
                Pattern::new(p).map_err(|_| format!("find: invalid pattern '{}'", p))?,
            ),
            None => None,
        };
        Ok(Self {
            pattern,
            file_type: spec.file_type,
        })
    }

    /// Test an entry name and type against the filters.
    pub fn matches(&self, name: &str, is_directory: bool) -> bool {
        match self.file_type {
            Some(FileType::File) if is_directory => return false,
            Some(FileType::Directory) if !is_directory => return false,
            _ => {}
        }
        match &self.pattern {
            Some(pattern) => pattern.matches(name),
            None => true,
        }
    }
}
