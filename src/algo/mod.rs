pub mod dinic;
pub(crate) mod level;
pub mod push_relabel;

use crate::capacity::Capacity;
use crate::error::Error;
use crate::graph::ResidualGraph;
use crate::id::Id;

/// A maximum flow algorithm operating in place on a residual graph.
pub trait MaxFlow {
    /// Push as much flow as possible from `source` to `sink` and return the amount pushed.
    ///
    /// The graph is left holding the residual capacities of the resulting flow, so a
    /// second call on the same graph returns zero. On `Error::ArithmeticOverflow` the
    /// graph keeps the flow accepted before the overflowing amount, which is not applied.
    fn max_flow<N: Id, C: Capacity>(
        &mut self,
        graph: &mut ResidualGraph<N, C>,
        source: &N,
        sink: &N,
    ) -> Result<C, Error>;
}
