// src/paths/compare.rs

/// Lexically normalise a path for equality checks.
///
/// - `\` and `/` are the same separator.
/// - Repeated and trailing separators are ignored.
/// - `.` segments are dropped and `..` folds the previous segment.
/// - Case is folded.
///
/// UNC prefixes are not special: `\\server\share` becomes `/server/share` and
/// compares equal to that rooted path.
///
/// Nothing touches the filesystem: the deployment target may not exist yet.
pub fn normalize_for_comparison(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let rooted = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    let normalized = if rooted { format!("/{body}") } else { body };
    normalized.to_lowercase()
}

/// Whether `a` and `b` name the same location (see [`normalize_for_comparison`]).
pub fn paths_equal(a: &str, b: &str) -> bool {
    normalize_for_comparison(a) == normalize_for_comparison(b)
}
