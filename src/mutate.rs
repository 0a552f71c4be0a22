//! Path-addressed edits over immutable snapshots.
//!
//! [`apply`] takes the current snapshot and one [`EditOp`] and produces the
//! next snapshot. Nodes along the edited path are shallow-copied; every
//! sibling subtree is shared with the previous snapshot via `Arc`, so the
//! cost of an edit is bounded by path depth and unrelated branches keep their
//! pointer identity across edits.
//!
//! Missing intermediate containers are materialized (a record or sequence,
//! whichever the next segment calls for). Only a structurally incompatible
//! path (keying into a sequence, indexing into a record, descending through
//! a scalar) is an error; it indicates a programming error in the caller and
//! leaves the input snapshot untouched.

use std::sync::Arc;

use thiserror::Error;

use crate::path::{NodePath, Segment};
use crate::tree::DocNode;

/// Errors raised by [`apply`]. List-shaped user input (an index that is out
/// of range for a remove) is deliberately not an error; see the individual
/// operation docs.
#[derive(Debug, Error)]
pub enum PathError {
    /// A path segment addressed a node of the wrong shape.
    #[error("cannot descend into {found} at {path}: expected {expected}")]
    Incompatible {
        path: NodePath,
        expected: &'static str,
        found: &'static str,
    },

    /// `Delete` needs a non-empty path ending in a record field.
    #[error("delete must address a record field: {path}")]
    DeleteTarget { path: NodePath },
}

/// One atomic edit against a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum EditOp {
    /// Replace (or create) the value at `path`.
    Set { path: NodePath, value: DocNode },
    /// Remove the record field addressed by `path`. Removing an absent field
    /// is a no-op. This is how an optional sub-list becomes *absent* rather
    /// than empty.
    Delete { path: NodePath },
    /// Append to the sequence at `path`, creating the sequence if absent.
    Push { path: NodePath, value: DocNode },
    /// Remove element `index` from the sequence at `path`, shifting the
    /// elements after it down. Out of range is a no-op.
    RemoveAt { path: NodePath, index: usize },
}

impl EditOp {
    pub fn set(path: NodePath, value: impl Into<DocNode>) -> Self {
        EditOp::Set {
            path,
            value: value.into(),
        }
    }

    pub fn delete(path: NodePath) -> Self {
        EditOp::Delete { path }
    }

    pub fn push(path: NodePath, value: impl Into<DocNode>) -> Self {
        EditOp::Push {
            path,
            value: value.into(),
        }
    }

    pub fn remove_at(path: NodePath, index: usize) -> Self {
        EditOp::RemoveAt { path, index }
    }
}

impl From<bool> for DocNode {
    fn from(b: bool) -> Self {
        DocNode::Bool(b)
    }
}

impl From<f64> for DocNode {
    fn from(n: f64) -> Self {
        DocNode::Number(n)
    }
}

impl From<&str> for DocNode {
    fn from(s: &str) -> Self {
        DocNode::Str(s.to_owned())
    }
}

impl From<String> for DocNode {
    fn from(s: String) -> Self {
        DocNode::Str(s)
    }
}

/// Apply one edit to `snapshot`, returning the next snapshot.
///
/// When the edit turns out to change nothing (removing an absent field,
/// removing past the end of a sequence) the input snapshot itself is
/// returned, pointer-equal to `snapshot`.
pub fn apply(snapshot: &Arc<DocNode>, op: &EditOp) -> Result<Arc<DocNode>, PathError> {
    let rewritten = match op {
        EditOp::Set { path, value } => {
            rewrite(Some(snapshot), path, 0, path.len(), &Terminal::Set(value))?
        }
        EditOp::Push { path, value } => {
            rewrite(Some(snapshot), path, 0, path.len(), &Terminal::Push(value))?
        }
        EditOp::RemoveAt { path, index } => rewrite(
            Some(snapshot),
            path,
            0,
            path.len(),
            &Terminal::RemoveAt(*index),
        )?,
        EditOp::Delete { path } => {
            let Some(Segment::Key(field)) = path.segments().last() else {
                return Err(PathError::DeleteTarget { path: path.clone() });
            };
            rewrite(
                Some(snapshot),
                path,
                0,
                path.len() - 1,
                &Terminal::RemoveKey(field),
            )?
        }
    };
    Ok(rewritten.unwrap_or_else(|| Arc::clone(snapshot)))
}

/// Action performed once the walk reaches `terminal_depth`.
enum Terminal<'a> {
    Set(&'a DocNode),
    Push(&'a DocNode),
    RemoveAt(usize),
    RemoveKey(&'a str),
}

/// Copy-on-write walk. `node` is `None` when the position does not exist yet
/// and is being materialized. Returns `Ok(None)` when the edit changes
/// nothing, so callers can hand back the original snapshot untouched.
fn rewrite(
    node: Option<&Arc<DocNode>>,
    full: &NodePath,
    depth: usize,
    terminal_depth: usize,
    terminal: &Terminal<'_>,
) -> Result<Option<Arc<DocNode>>, PathError> {
    if depth == terminal_depth {
        return finish(node, full, depth, terminal);
    }

    match &full.segments()[depth] {
        Segment::Key(field) => {
            let entries = match node.map(Arc::as_ref) {
                Some(DocNode::Map(entries)) => Some(entries),
                // Absent positions (and nulls left by foreign input) are
                // materialized as records.
                None | Some(DocNode::Null) => None,
                Some(other) => {
                    return Err(incompatible(full, depth, "record", other));
                }
            };
            let child = entries.and_then(|e| e.get(field));
            let Some(new_child) = rewrite(child, full, depth + 1, terminal_depth, terminal)?
            else {
                return Ok(None);
            };
            let mut entries = entries.cloned().unwrap_or_default();
            entries.insert(field.clone(), new_child);
            Ok(Some(Arc::new(DocNode::Map(entries))))
        }
        Segment::Index(i) => {
            let items = match node.map(Arc::as_ref) {
                Some(DocNode::Seq(items)) => Some(items),
                None | Some(DocNode::Null) => None,
                Some(other) => {
                    return Err(incompatible(full, depth, "sequence", other));
                }
            };
            let child = items.and_then(|s| s.get(*i));
            let Some(new_child) = rewrite(child, full, depth + 1, terminal_depth, terminal)?
            else {
                return Ok(None);
            };
            let mut items = items.cloned().unwrap_or_default();
            if *i < items.len() {
                items[*i] = new_child;
            } else {
                // Index past the end extends the sequence; the filler
                // elements are empty records, the only element shape this
                // document keeps in sequences.
                while items.len() < *i {
                    items.push(Arc::new(DocNode::empty_map()));
                }
                items.push(new_child);
            }
            Ok(Some(Arc::new(DocNode::Seq(items))))
        }
    }
}

fn finish(
    node: Option<&Arc<DocNode>>,
    full: &NodePath,
    depth: usize,
    terminal: &Terminal<'_>,
) -> Result<Option<Arc<DocNode>>, PathError> {
    match terminal {
        Terminal::Set(value) => Ok(Some(Arc::new((*value).clone()))),
        Terminal::Push(value) => {
            let mut items = match node.map(Arc::as_ref) {
                Some(DocNode::Seq(items)) => items.clone(),
                None | Some(DocNode::Null) => Vec::new(),
                Some(other) => return Err(incompatible(full, depth, "sequence", other)),
            };
            items.push(Arc::new((*value).clone()));
            Ok(Some(Arc::new(DocNode::Seq(items))))
        }
        Terminal::RemoveAt(index) => match node.map(Arc::as_ref) {
            Some(DocNode::Seq(items)) => {
                if *index >= items.len() {
                    return Ok(None);
                }
                let mut items = items.clone();
                items.remove(*index);
                Ok(Some(Arc::new(DocNode::Seq(items))))
            }
            None | Some(DocNode::Null) => Ok(None),
            Some(other) => Err(incompatible(full, depth, "sequence", other)),
        },
        Terminal::RemoveKey(field) => match node.map(Arc::as_ref) {
            Some(DocNode::Map(entries)) => {
                if !entries.contains_key(*field) {
                    return Ok(None);
                }
                let mut entries = entries.clone();
                entries.shift_remove(*field);
                Ok(Some(Arc::new(DocNode::Map(entries))))
            }
            None | Some(DocNode::Null) => Ok(None),
            Some(other) => Err(incompatible(full, depth, "record", other)),
        },
    }
}

fn incompatible(
    full: &NodePath,
    depth: usize,
    expected: &'static str,
    found: &DocNode,
) -> PathError {
    PathError::Incompatible {
        path: full.truncated(depth + 1),
        expected,
        found: found.kind(),
    }
}
