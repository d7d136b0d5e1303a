use super::types::{FileType, FindSpec};

/// Parse find arguments. The first bare argument is the start path; options
/// always take their value from the following argument.
pub fn parse_args(args: &[String]) -> Result<FindSpec, String> {
    let mut spec = FindSpec::default();

    let mut i = 0;
    while i < args.len() {
        let a = &args[i];
        if !a.starts_with('-') && spec.path == "." {
            spec.path = a.clone();
            i += 1;
            continue;
        }
        if a == "-name" && i + 1 < args.len() {
            spec.name_pattern = Some(args[i + 1].clone());
            i += 2;
            continue;
        }
        if a == "-type" && i + 1 < args.len() {
            spec.file_type = match args[i + 1].as_str() {
                "f" => Some(FileType::File),
                "d" => Some(FileType::Directory),
                _ => return Err("find: -type expects f or d".to_string()),
            };
            i += 2;
            continue;
        }
        if a == "-maxdepth" && i + 1 < args.len() {
            spec.max_depth = Some(
                args[i + 1]
                    .parse::<usize>()
                    .map_err(|_| "find: -maxdepth expects a non-negative integer".to_string())?,
            );
            i += 2;
            continue;
        }
        return Err(format!("find: unknown option or argument '{}'", a));
    }

    Ok(spec)
}
