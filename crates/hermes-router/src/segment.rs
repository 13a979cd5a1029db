//! Pattern parsing and path normalization.

use thiserror::Error;

/// Error produced when a registration pattern is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A parameter segment was written as a bare `:`.
    #[error("empty parameter name in pattern {pattern:?}")]
    EmptyParamName {
        /// The offending pattern.
        pattern: String,
    },

    /// Segments were registered below a wildcard; they can never match.
    #[error("segments after wildcard in pattern {pattern:?} are unreachable")]
    SegmentsAfterWildcard {
        /// The offending pattern.
        pattern: String,
    },
}

/// One classified segment of a registration pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the request segment by exact text.
    Literal(String),
    /// `:name`, matches any single segment and binds it.
    Param(String),
    /// `*`, matches the whole remaining path. Must be last.
    Wildcard,
}

impl Segment {
    /// The segment text as written in a pattern.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Segment::Literal(text) => text.clone(),
            Segment::Param(name) => format!(":{name}"),
            Segment::Wildcard => "*".to_string(),
        }
    }
}

/// Normalizes a registration pattern.
///
/// Ensures a leading `/` and strips any trailing `/` unless the pattern is
/// exactly `/`. The result is canonical: normalizing twice is a no-op.
///
/// ```
/// use hermes_router::normalize;
///
/// assert_eq!(normalize("users/"), "/users");
/// assert_eq!(normalize("/"), "/");
/// assert_eq!(normalize(&normalize("a/b/")), normalize("a/b/"));
/// ```
#[must_use]
pub fn normalize(pattern: &str) -> String {
    let mut pattern = if pattern.starts_with('/') {
        pattern.to_string()
    } else {
        format!("/{pattern}")
    };

    while pattern.len() > 1 && pattern.ends_with('/') {
        pattern.pop();
    }

    pattern
}

/// Parses a normalized pattern into classified segments.
///
/// `/` parses to an empty segment list (the tree root). The input must
/// already be normalized; [`normalize`] and this function are the two
/// halves of every registration.
pub fn parse_pattern(pattern: &str) -> Result<Vec<Segment>, PatternError> {
    if pattern == "/" {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut saw_wildcard = false;

    for part in pattern[1..].split('/') {
        if saw_wildcard {
            return Err(PatternError::SegmentsAfterWildcard {
                pattern: pattern.to_string(),
            });
        }

        let segment = if let Some(name) = part.strip_prefix(':') {
            if name.is_empty() {
                return Err(PatternError::EmptyParamName {
                    pattern: pattern.to_string(),
                });
            }
            Segment::Param(name.to_string())
        } else if part == "*" {
            saw_wildcard = true;
            Segment::Wildcard
        } else {
            Segment::Literal(part.to_string())
        };

        segments.push(segment);
    }

    Ok(segments)
}

/// Splits a request path into its escaped segments.
///
/// The path is used verbatim; no percent-decoding happens before matching.
/// `/` yields no segments, matching the tree root directly.
pub(crate) fn split_request_path(path: &str) -> smallvec::SmallVec<[&str; 16]> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        smallvec::SmallVec::new()
    } else {
        trimmed.split('/').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize("users"), "/users");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize("/users/"), "/users");
        assert_eq!(normalize("/users///"), "/users");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for pattern in ["users/", "/a/b/", "/", ":id", "/x/*"] {
            let once = normalize(pattern);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_parse_literals() {
        let segments = parse_pattern("/users/list").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("users".to_string()),
                Segment::Literal("list".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_param() {
        let segments = parse_pattern("/users/:id").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("users".to_string()),
                Segment::Param("id".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_wildcard() {
        let segments = parse_pattern("/static/*").unwrap();
        assert_eq!(
            segments,
            vec![Segment::Literal("static".to_string()), Segment::Wildcard]
        );
    }

    #[test]
    fn test_parse_root_is_empty() {
        assert!(parse_pattern("/").unwrap().is_empty());
    }

    #[test]
    fn test_empty_param_name_is_rejected() {
        assert_eq!(
            parse_pattern("/users/:"),
            Err(PatternError::EmptyParamName {
                pattern: "/users/:".to_string()
            })
        );
    }

    #[test]
    fn test_segments_after_wildcard_are_rejected() {
        assert_eq!(
            parse_pattern("/static/*/deep"),
            Err(PatternError::SegmentsAfterWildcard {
                pattern: "/static/*/deep".to_string()
            })
        );
    }

    #[test]
    fn test_segment_text_round_trip() {
        assert_eq!(Segment::Literal("users".to_string()).text(), "users");
        assert_eq!(Segment::Param("id".to_string()).text(), ":id");
        assert_eq!(Segment::Wildcard.text(), "*");
    }

    #[test]
    fn test_split_request_path() {
        assert_eq!(split_request_path("/").as_slice(), &[] as &[&str]);
        assert_eq!(split_request_path("/a").as_slice(), &["a"]);
        assert_eq!(split_request_path("/a/b").as_slice(), &["a", "b"]);
        // Escaped form is kept verbatim.
        assert_eq!(
            split_request_path("/users/ji%2Fm").as_slice(),
            &["users", "ji%2Fm"]
        );
    }
}
