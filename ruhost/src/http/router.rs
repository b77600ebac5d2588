//! Path-pattern matching.
//!
//! Patterns are `/`-separated literals and `:name` capture segments.
//! Matching is segment-wise and exact in length; the first registered
//! route that matches wins, which the registry relies on.

use indexmap::IndexMap;

/// Matches `path` against `pattern`, returning captured parameters.
///
/// # Examples
///
/// ```
/// use ruhost::http::match_path;
///
/// let params = match_path("/users/:id", "/users/7").unwrap();
/// assert_eq!(params["id"], "7");
/// assert!(match_path("/users/:id", "/users").is_none());
/// ```
pub fn match_path(pattern: &str, path: &str) -> Option<IndexMap<String, String>> {
    let pattern_segments: Vec<&str> = segments(pattern);
    let path_segments: Vec<&str> = segments(path);

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = IndexMap::new();
    for (pattern_segment, path_segment) in pattern_segments.iter().zip(&path_segments) {
        match pattern_segment.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), (*path_segment).to_string());
            },
            None => {
                if pattern_segment != path_segment {
                    return None;
                }
            },
        }
    }
    Some(params)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
