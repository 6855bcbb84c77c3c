//! Response path: the chain of response keys / list indices from the root
//! to the point currently being resolved.
//!
//! Mirrors `juniper::executor::FieldPath` — an `Arc`-linked chain so that
//! cloning a path for a sibling field is O(1) — generalized with an explicit
//! [`PathSegment::Index`] variant, since list-item completion (spec'd
//! *error-path correctness*) needs to annotate indices, something juniper's
//! macro-driven list resolution never had to do.

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<PathSegment> for serde_json::Value {
    fn from(seg: PathSegment) -> Self {
        match seg {
            PathSegment::Key(k) => serde_json::Value::String(k),
            PathSegment::Index(i) => serde_json::Value::from(i),
        }
    }
}

/// Immutable singly-linked chain of response keys, identified by the `Arc`
/// it's built from so that extending a path never mutates a sibling's.
#[derive(Debug, Clone)]
pub enum Path {
    Root,
    Segment(PathSegment, Arc<Path>),
}

impl Path {
    pub fn root() -> Arc<Path> {
        Arc::new(Path::Root)
    }

    /// Extends `self` with a new key, returning the child path.
    pub fn push_key(self: &Arc<Self>, key: impl Into<String>) -> Arc<Path> {
        Arc::new(Path::Segment(PathSegment::Key(key.into()), Arc::clone(self)))
    }

    /// Extends `self` with a list index, returning the child path.
    pub fn push_index(self: &Arc<Self>, index: usize) -> Arc<Path> {
        Arc::new(Path::Segment(PathSegment::Index(index), Arc::clone(self)))
    }

    /// Flattens the chain into an ordered sequence of keys, root first —
    /// the shape `errors[].path` is reported in.
    pub fn to_vec(&self) -> Vec<PathSegment> {
        let mut acc = Vec::new();
        self.build(&mut acc);
        acc
    }

    fn build(&self, acc: &mut Vec<PathSegment>) {
        if let Path::Segment(seg, parent) = self {
            parent.build(acc);
            acc.push(seg.clone());
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Path::Root)
    }
}
