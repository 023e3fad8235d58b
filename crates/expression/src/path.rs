//! Property references used by expression leaves
//!
//! A leaf name is either a condition check (`~token`) or a property path:
//!
//! - `name` — key in the current object
//! - `a.b.c` — descend through nested objects
//! - `.name` / `..name` — one / two ancestors up
//! - `/.a.b` — start from the root of the ancestry
//! - `a\.b` — a single key containing a literal dot

use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Where path resolution starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The object currently being validated.
    Current,
    /// `n` levels up the ancestry (`.x` is one level).
    Up(usize),
    /// The outermost object of the ancestry.
    Root,
}

/// A parsed dot-path to a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    anchor: Anchor,
    segments: SmallVec<[String; 2]>,
}

impl PropertyPath {
    /// Parses a raw property name into a path.
    ///
    /// Returns `None` when any segment (in particular the last one) is empty.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (anchor, rest) = if let Some(rest) = raw.strip_prefix("/.") {
            (Anchor::Root, rest)
        } else {
            let ups = raw.chars().take_while(|c| *c == '.').count();
            let anchor = if ups == 0 {
                Anchor::Current
            } else {
                Anchor::Up(ups)
            };
            (anchor, &raw[ups..])
        };

        let mut segments = SmallVec::new();
        let mut current = String::new();
        let mut chars = rest.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' if chars.peek() == Some(&'.') => {
                    chars.next();
                    current.push('.');
                }
                '.' => {
                    if current.is_empty() {
                        return None;
                    }
                    segments.push(std::mem::take(&mut current));
                }
                other => current.push(other),
            }
        }
        if current.is_empty() {
            return None;
        }
        segments.push(current);

        Some(Self { anchor, segments })
    }

    /// Returns the resolution anchor.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Returns the path segments (unescaped keys).
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Checks whether the referenced property is present.
    ///
    /// `ancestors` is ordered root first, immediate parent last.
    #[must_use]
    pub fn is_present(&self, current: &Map<String, Value>, ancestors: &[&Map<String, Value>]) -> bool {
        let start = match self.anchor {
            Anchor::Current => current,
            Anchor::Root => ancestors.first().copied().unwrap_or(current),
            Anchor::Up(levels) => match ancestors.len().checked_sub(levels) {
                Some(index) => ancestors[index],
                None => return false,
            },
        };

        let Some((last, parents)) = self.segments.split_last() else {
            return false;
        };
        let mut object = start;
        for segment in parents {
            match object.get(segment) {
                Some(Value::Object(inner)) => object = inner,
                _ => return false,
            }
        }
        object.contains_key(last)
    }
}

/// What an expression leaf refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// `~token`: a condition token check.
    Condition(String),
    /// A property presence check.
    Property(PropertyPath),
}

impl Reference {
    /// Parses a raw leaf name; `None` if the name is empty or malformed.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.strip_prefix('~') {
            Some("") => None,
            Some(token) => Some(Self::Condition(token.to_string())),
            None => PropertyPath::parse(raw).map(Self::Property),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn parses_anchors() {
        assert_eq!(PropertyPath::parse("a").map(|p| p.anchor()), Some(Anchor::Current));
        assert_eq!(PropertyPath::parse(".a").map(|p| p.anchor()), Some(Anchor::Up(1)));
        assert_eq!(PropertyPath::parse("..a").map(|p| p.anchor()), Some(Anchor::Up(2)));
        assert_eq!(PropertyPath::parse("/.a").map(|p| p.anchor()), Some(Anchor::Root));
    }

    #[test]
    fn escaped_dot_stays_in_segment() {
        let path = PropertyPath::parse(r"a\.b.c").unwrap();
        assert_eq!(path.segments(), &["a.b".to_string(), "c".to_string()]);
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert!(PropertyPath::parse("").is_none());
        assert!(PropertyPath::parse("a.").is_none());
        assert!(PropertyPath::parse("a..b").is_none());
        assert!(PropertyPath::parse("..").is_none());
        assert!(Reference::parse("~").is_none());
    }

    #[test]
    fn resolves_against_ancestry() {
        let root = object(json!({"top": 1, "mid": {"leaf": {}}}));
        let parent = object(json!({"sibling": true}));
        let current = object(json!({"own": {"deep": 1}}));
        let ancestors = [&root, &parent];

        let present = |raw: &str| PropertyPath::parse(raw).unwrap().is_present(&current, &ancestors);

        assert!(present("own"));
        assert!(present("own.deep"));
        assert!(!present("own.missing"));
        assert!(present(".sibling"));
        assert!(present("..top"));
        assert!(present("/.mid.leaf"));
        assert!(!present("...top"));
    }

    #[test]
    fn root_anchor_without_ancestors_is_current() {
        let current = object(json!({"a": 1}));
        assert!(PropertyPath::parse("/.a").unwrap().is_present(&current, &[]));
    }
}
