use crate::loc::Location;
use crate::Value;
use indexmap::IndexMap;
use serde::Serialize;
use serde::Serializer;

/// One step of a response path: a response key or a list index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Key(key) => serializer.serialize_str(key),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// A linked path node borrowed up the execution stack.
///
/// Each field execution frame allocates one node pointing at its parent's,
/// so extending a path is O(1) and nothing is copied per descent;
/// materializing ([`to_vec`](PathNode::to_vec)) happens only when an error
/// is recorded or a [`ResolveInfo`](crate::execution::ResolveInfo) is
/// built.
#[derive(Clone, Copy, Debug)]
pub struct PathNode<'a> {
    pub parent: Option<&'a PathNode<'a>>,
    pub segment: &'a PathSegment,
}

impl<'a> PathNode<'a> {
    pub fn new(segment: &'a PathSegment) -> Self {
        Self {
            parent: None,
            segment,
        }
    }

    pub fn child(&'a self, segment: &'a PathSegment) -> PathNode<'a> {
        PathNode {
            parent: Some(self),
            segment,
        }
    }

    /// Materializes the path, root-first.
    pub fn to_vec(&self) -> Vec<PathSegment> {
        let mut segments = match self.parent {
            Some(parent) => parent.to_vec(),
            None => vec![],
        };
        segments.push(self.segment.clone());
        segments
    }
}

/// A field-level execution error, as carried in a response's `errors`
/// list.
#[derive(Clone, Debug, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<IndexMap<String, Value>>,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: vec![],
            locations: vec![],
            extensions: None,
        }
    }

    pub fn at(
        message: impl Into<String>,
        path: Vec<PathSegment>,
        locations: Vec<Location>,
    ) -> Self {
        Self {
            message: message.into(),
            path,
            locations,
            extensions: None,
        }
    }
}
