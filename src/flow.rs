use serde::{Deserialize, Serialize};

/// Net flow carried by one ordered node pair after a max-flow run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeFlow<NodeId, Cap> {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Cap,
    pub flow: Cap,
}

impl<NodeId, Cap> EdgeFlow<NodeId, Cap> {
    pub fn new(from: NodeId, to: NodeId, capacity: Cap, flow: Cap) -> Self {
        Self {
            from,
            to,
            capacity,
            flow,
        }
    }
}
