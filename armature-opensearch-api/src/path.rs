//! Path segment encoding for endpoint URLs.
//!
//! OpenSearch accepts comma-separated lists in a single path segment
//! (`/_data_stream/a,b,c`), so commas are left literal. Wildcards in index
//! patterns (`logs-*`) are left literal as well. Everything outside the
//! RFC 3986 unreserved set is percent-encoded.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped inside a dynamic path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b',')
    .remove(b'*');

/// Percent-encode one path segment.
pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Join multiple values into one comma-separated segment.
///
/// An empty list yields an empty string; endpoint templates treat an empty
/// list as an absent path part.
pub fn join_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Whether an optional list contributes a path segment.
pub fn is_present<S>(values: Option<&Vec<S>>) -> bool {
    values.is_some_and(|v| !v.is_empty())
}

/// Assembles an endpoint path from literal and encoded segments.
#[derive(Debug, Default)]
pub struct PathBuilder {
    path: String,
}

impl PathBuilder {
    /// Start an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal segment, e.g. `_data_stream`.
    pub fn literal(mut self, segment: &str) -> Self {
        self.path.push('/');
        self.path.push_str(segment);
        self
    }

    /// Append a dynamic segment, percent-encoded.
    pub fn segment(mut self, raw: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&encode_segment(raw));
        self
    }

    /// Append a comma-joined list as one dynamic segment.
    pub fn list<S: AsRef<str>>(self, values: &[S]) -> Self {
        let joined = join_list(values);
        self.segment(&joined)
    }

    /// Finish the path. An empty builder yields `/`.
    pub fn build(self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            self.path
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain() {
        assert_eq!(encode_segment("logs-app_2024.01"), "logs-app_2024.01");
    }

    #[test]
    fn test_encode_reserved() {
        assert_eq!(encode_segment("my index"), "my%20index");
        assert_eq!(encode_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(encode_segment("a+b"), "a%2Bb");
    }

    #[test]
    fn test_encode_keeps_commas_and_wildcards() {
        assert_eq!(encode_segment("a,b,c"), "a,b,c");
        assert_eq!(encode_segment("logs-*"), "logs-*");
    }

    #[test]
    fn test_encode_unicode() {
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&["a", "b", "c"]), "a,b,c");
        assert_eq!(join_list(&["solo"]), "solo");
        assert_eq!(join_list::<&str>(&[]), "");
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present::<String>(None));
        assert!(!is_present::<String>(Some(&vec![])));
        assert!(is_present(Some(&vec!["x".to_string()])));
    }

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .list(&["a b", "c"])
            .literal("_clone")
            .segment("target")
            .build();
        assert_eq!(path, "/a%20b,c/_clone/target");
        assert_eq!(PathBuilder::new().build(), "/");
    }
}
