//! Typed addressing for locations inside a document snapshot.
//!
//! A path is a sequence of tagged segments, one per level of nesting: a map
//! key or a sequence index. Building paths from segments (rather than parsing
//! `"properties[2].label"`-style strings at mutation time) makes a malformed
//! address unrepresentable.

use std::fmt;

/// One step into the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Record field access.
    Key(String),
    /// Sequence element access.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, ".{k}"),
            Segment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(s.to_owned())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Key(s)
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// A complete address into a document, root-relative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath(Vec<Segment>);

impl NodePath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Append a key segment (builder style).
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Segment::Key(k.into()));
        self
    }

    /// Append an index segment (builder style).
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Segment::Index(i));
        self
    }

    pub fn push(&mut self, seg: Segment) {
        self.0.push(seg);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The path up to (excluding) segment `depth`, for error reporting.
    pub fn truncated(&self, depth: usize) -> NodePath {
        NodePath(self.0[..depth.min(self.0.len())].to_vec())
    }

    /// True when one path is an ancestor-or-self of the other. Edits along
    /// paths for which this is false commute.
    pub fn overlaps(&self, other: &NodePath) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a == b)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for seg in &self.0 {
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

/// Construct a [`NodePath`] from a sequence of segments. String literals
/// become keys, integers become indices:
///
/// ```ignore
/// let p = node_path!["properties", 2, "showIf", 0, "value"];
/// ```
#[macro_export]
macro_rules! node_path {
    [] => {
        $crate::path::NodePath::root()
    };
    [$($seg:expr),+ $(,)?] => {{
        let mut p = $crate::path::NodePath::root();
        $(
            p.push($crate::path::Segment::from($seg));
        )+
        p
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_macro_agree() {
        let built = NodePath::root().key("properties").index(2).key("label");
        let via_macro = node_path!["properties", 2, "label"];
        assert_eq!(built, via_macro);
        assert_eq!(built.len(), 3);
    }

    #[test]
    fn display_renders_segments() {
        let p = node_path!["properties", 0, "showIf", 1, "value"];
        assert_eq!(p.to_string(), "$.properties[0].showIf[1].value");
        assert_eq!(NodePath::root().to_string(), "$");
    }

    #[test]
    fn truncated_keeps_prefix() {
        let p = node_path!["properties", 3, "options"];
        assert_eq!(p.truncated(2), node_path!["properties", 3]);
        assert_eq!(p.truncated(10), p);
    }

    #[test]
    fn overlap_detects_shared_prefix() {
        let a = node_path!["properties", 0, "label"];
        let b = node_path!["properties", 0];
        let c = node_path!["properties", 1, "label"];
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}
