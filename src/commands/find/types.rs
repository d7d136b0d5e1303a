#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileType {
    File,      // f
    Directory, // d
}

/// Parsed find invocation: `find [path] [-name PATTERN] [-type f|d] [-maxdepth N]`
#[derive(Debug, Clone, PartialEq)]
pub struct FindSpec {
    pub path: String,
    pub name_pattern: Option<String>,
    pub file_type: Option<FileType>,
    pub max_depth: Option<usize>,
}

impl Default for FindSpec {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            name_pattern: None,
            file_type: None,
            max_depth: None,
        }
    }
}
