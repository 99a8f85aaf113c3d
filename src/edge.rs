use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A capacitated directed edge, as handed to a [`ResidualGraph`](crate::ResidualGraph).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(
    try_from = "RawEdge<NodeId, Cap>",
    bound(deserialize = "NodeId: Deserialize<'de>, Cap: Zero + PartialOrd + Deserialize<'de>")
)]
pub struct Edge<NodeId, Cap> {
    from: NodeId,
    to: NodeId,
    capacity: Cap,
}

impl<NodeId, Cap> Edge<NodeId, Cap>
where
    Cap: Zero + PartialOrd,
{
    pub fn new(from: NodeId, to: NodeId, capacity: Cap) -> Result<Self, Error> {
        if capacity < Cap::zero() {
            Err(Error::NegativeCapacity)
        } else {
            Ok(Self { from, to, capacity })
        }
    }
}

impl<NodeId, Cap: Copy> Edge<NodeId, Cap> {
    pub fn tail(&self) -> &NodeId {
        &self.from
    }

    pub fn head(&self) -> &NodeId {
        &self.to
    }

    pub fn capacity(&self) -> Cap {
        self.capacity
    }

    pub fn into_parts(self) -> (NodeId, NodeId, Cap) {
        (self.from, self.to, self.capacity)
    }
}

/// Unvalidated edge as read from an input file.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RawEdge<NodeId, Cap> {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Cap,
}

impl<NodeId, Cap> TryFrom<RawEdge<NodeId, Cap>> for Edge<NodeId, Cap>
where
    Cap: Zero + PartialOrd,
{
    type Error = Error;

    fn try_from(e: RawEdge<NodeId, Cap>) -> Result<Self, Self::Error> {
        Self::new(e.from, e.to, e.capacity)
    }
}

impl<NodeId, Cap> From<Edge<NodeId, Cap>> for RawEdge<NodeId, Cap> {
    fn from(e: Edge<NodeId, Cap>) -> Self {
        Self {
            from: e.from,
            to: e.to,
            capacity: e.capacity,
        }
    }
}
