use alloc::string::String;

use displaydoc::Display;

#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Error {
    /// Invalid edge capacity, expected non-negative value
    NegativeCapacity,
    /// Source node is not in the graph
    UnknownSource,
    /// Sink node is not in the graph
    UnknownSink,
    /// Source and sink must be different nodes
    SourceIsSink,
    /// Arithmetic overflow while accumulating capacities or flow
    ArithmeticOverflow,
    /// Residual capacities of an arc pair no longer add up to its capacity: {0}
    ResidualImbalance(String),
    /// Flow exceeds the capacity of an arc: {0}
    CapacityExceeded(String),
    /// Flow is not conserved at node {0}
    ConservationViolated(String),
    /// Max flow algorithm specific error
    AlgoSpecific(String),
}
