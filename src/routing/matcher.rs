//! Route matching logic.
//!
//! # Responsibilities
//! - Strip the deployment base path from a location
//! - Split off query string and fragment
//! - Match a path exactly against a declared route path
//!
//! # Design Decisions
//! - One trailing slash is tolerated unless `strict` is set
//! - Path matching is case-sensitive unless `sensitive` is cleared
//! - No parameters, no wildcards, no regex

use serde::{Deserialize, Serialize};

/// Options controlling how a requested path is compared to a route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchOptions {
    /// Reject a trailing slash (`/chords/` no longer matches `/chords`).
    pub strict: bool,

    /// Compare paths case-sensitively.
    pub sensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            strict: false,
            sensitive: true,
        }
    }
}

impl MatchOptions {
    /// The form two paths share exactly when these options treat them as equal.
    ///
    /// An empty path is the root. Outside strict mode one trailing slash is
    /// dropped; when matching ignores case the path is ASCII-lowercased.
    pub fn normalize(&self, path: &str) -> String {
        let path = if path.is_empty() { "/" } else { path };
        let path = if !self.strict && path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        if self.sensitive {
            path.to_string()
        } else {
            path.to_ascii_lowercase()
        }
    }
}

/// Trait for matching a base-relative path against a route.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one declared path and nothing else.
///
/// The declared path is normalised with the same options as the requested
/// one, so `/scales/` declared outside strict mode matches `/scales`.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
    options: MatchOptions,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>, options: MatchOptions) -> Self {
        Self {
            path: options.normalize(&path.into()),
            options,
        }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        self.options.normalize(path) == self.path
    }
}

/// The deployment prefix every route path lives under (e.g. `/music`).
///
/// Stored without a trailing slash; the root deployment is the empty prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasePath {
    prefix: String,
}

impl BasePath {
    /// Normalise a base path such as `/`, `/music/` or `music`.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        Self { prefix }
    }

    /// The normalised prefix; empty for a root deployment.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Remove the prefix from `path`, or `None` if `path` lies outside it.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            // `/musical` is not under `/music`
            None
        }
    }

    /// Prefix a route path with the base.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }
}

/// A requested location split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl<'a> Location<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        Self {
            path,
            query: query.filter(|q| !q.is_empty()),
            fragment: fragment.filter(|f| !f.is_empty()),
        }
    }

    /// Rebuild a location string for `path`, keeping this location's query and fragment.
    pub fn with_path(&self, path: &str) -> String {
        let mut out = path.to_string();
        if let Some(query) = self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/chords", MatchOptions::default());

        assert!(matcher.matches("/chords"));
        assert!(matcher.matches("/chords/")); // Trailing slash tolerated
        assert!(!matcher.matches("/chords/maj7"));
        assert!(!matcher.matches("/chord"));
        assert!(!matcher.matches("/Chords")); // Case sensitive
    }

    #[test]
    fn test_strict_and_insensitive_options() {
        let strict = ExactPathMatcher::new(
            "/chords",
            MatchOptions { strict: true, sensitive: true },
        );
        assert!(!strict.matches("/chords/"));

        let loose = ExactPathMatcher::new(
            "/chords",
            MatchOptions { strict: false, sensitive: false },
        );
        assert!(loose.matches("/CHORDS"));
        assert!(loose.matches("/Chords/"));
    }

    #[test]
    fn test_declared_trailing_slash() {
        let matcher = ExactPathMatcher::new("/scales/", MatchOptions::default());
        assert!(matcher.matches("/scales/"));
        assert!(matcher.matches("/scales"));
        assert!(!matcher.matches("/scales//"));

        let strict = ExactPathMatcher::new(
            "/scales/",
            MatchOptions { strict: true, sensitive: true },
        );
        assert!(strict.matches("/scales/"));
        assert!(!strict.matches("/scales"));

        let loose = ExactPathMatcher::new(
            "/Scales/",
            MatchOptions { strict: false, sensitive: false },
        );
        assert!(loose.matches("/scales"));
    }

    #[test]
    fn test_normalize() {
        let default = MatchOptions::default();
        assert_eq!(default.normalize(""), "/");
        assert_eq!(default.normalize("/"), "/");
        assert_eq!(default.normalize("/Chords/"), "/Chords");

        let loose = MatchOptions { strict: false, sensitive: false };
        assert_eq!(loose.normalize("/Chords/"), "/chords");

        let strict = MatchOptions { strict: true, sensitive: true };
        assert_eq!(strict.normalize("/chords/"), "/chords/");
    }

    #[test]
    fn test_root_matcher() {
        let matcher = ExactPathMatcher::new("/", MatchOptions::default());
        assert!(matcher.matches("/"));
        assert!(matcher.matches(""));
        assert!(!matcher.matches("/scales"));
    }

    #[test]
    fn test_base_path() {
        let root = BasePath::new("/");
        assert_eq!(root.as_str(), "");
        assert_eq!(root.strip("/scales"), Some("/scales"));
        assert_eq!(root.join("/scales"), "/scales");

        let base = BasePath::new("music/");
        assert_eq!(base.as_str(), "/music");
        assert_eq!(base.strip("/music/scales"), Some("/scales"));
        assert_eq!(base.strip("/music"), Some("/"));
        assert_eq!(base.strip("/musical/scales"), None);
        assert_eq!(base.strip("/scales"), None);
        assert_eq!(base.join("/scales"), "/music/scales");
    }

    #[test]
    fn test_location_parse() {
        let loc = Location::parse("/scales?root=C&mode=dorian#top");
        assert_eq!(loc.path, "/scales");
        assert_eq!(loc.query, Some("root=C&mode=dorian"));
        assert_eq!(loc.fragment, Some("top"));
        assert_eq!(loc.with_path("/chords"), "/chords?root=C&mode=dorian#top");

        let bare = Location::parse("/metronome?");
        assert_eq!(bare.path, "/metronome");
        assert_eq!(bare.query, None);
        assert_eq!(bare.with_path("/metronome"), "/metronome");
    }
}
