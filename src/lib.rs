//! Exact maximum flow on capacitated directed graphs with Dinic's blocking-flow method.
//!
//! ```
//! use dinic::{compute_max_flow, ResidualGraph};
//!
//! let mut graph = ResidualGraph::new();
//! graph.add_edge("A", "B", 10).unwrap();
//! graph.add_edge("A", "C", 5).unwrap();
//! graph.add_edge("B", "D", 15).unwrap();
//! graph.add_edge("C", "D", 10).unwrap();
//!
//! assert_eq!(compute_max_flow(&mut graph, &"A", &"D"), Ok(15));
//! // the graph now holds the residual network, nothing is left to push
//! assert_eq!(compute_max_flow(&mut graph, &"A", &"D"), Ok(0));
//! ```

#![no_std]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
mod capacity;
mod edge;
mod error;
mod flow;
mod graph;
mod id;

pub use crate::algo::dinic::Dinic;
pub use crate::algo::push_relabel::PushRelabel;
pub use crate::algo::MaxFlow;
pub use crate::capacity::Capacity;
pub use crate::edge::{Edge, RawEdge};
pub use crate::error::Error;
pub use crate::flow::EdgeFlow;
pub use crate::graph::ResidualGraph;
pub use crate::id::Id;

/// Compute the maximum flow from `source` to `sink` with Dinic's algorithm.
///
/// The flow is pushed into `graph` itself, which afterwards holds the residual network.
/// Fails if either endpoint is missing from the graph or if both are the same node.
pub fn compute_max_flow<N: Id, C: Capacity>(
    graph: &mut ResidualGraph<N, C>,
    source: &N,
    sink: &N,
) -> Result<C, Error> {
    Dinic::default().max_flow(graph, source, sink)
}
