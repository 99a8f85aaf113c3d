use alloc::collections::BTreeMap;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use itertools::Itertools;
use petgraph::visit::{EdgeRef, IntoEdgeReferences, IntoNodeIdentifiers};

use crate::algo::level::assign_levels;
use crate::capacity::Capacity;
use crate::edge::Edge;
use crate::error::Error;
use crate::flow::EdgeFlow;
use crate::id::Id;

/// One direction of an arc pair. The opposite direction of arc `a` is always `a ^ 1`.
#[derive(Clone, Debug)]
struct ResidualArc<C> {
    head: usize,
    capacity: C,
    residual: C,
}

/// A residual network over arbitrary node identifiers.
///
/// Nodes are interned to dense indices in insertion order. Every adjacent pair of nodes
/// shares a single pair of opposite arcs, so the residual capacities of both directions
/// always add up to the capacities originally inserted for that pair.
#[derive(Clone, Debug)]
pub struct ResidualGraph<N, C> {
    index: BTreeMap<N, usize>,
    nodes: Vec<N>,
    adjacency: Vec<Vec<usize>>,
    arcs: Vec<ResidualArc<C>>,
    pairs: BTreeMap<(usize, usize), usize>,
}

impl<N, C> Default for ResidualGraph<N, C> {
    fn default() -> Self {
        Self {
            index: BTreeMap::new(),
            nodes: Vec::new(),
            adjacency: Vec::new(),
            arcs: Vec::new(),
            pairs: BTreeMap::new(),
        }
    }
}

impl<N: Id, C: Capacity> ResidualGraph<N, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from already validated edges.
    pub fn from_edges<I>(edges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Edge<N, C>>,
    {
        edges.into_iter().try_fold(Self::new(), |mut acc, e| {
            let (u, v, capacity) = e.into_parts();
            acc.add_edge(u, v, capacity)?;
            Ok(acc)
        })
    }

    /// Build a graph from a petgraph graph whose edge weights are capacities.
    ///
    /// Isolated nodes of `g` are kept, parallel and anti-parallel edges are merged.
    pub fn from_petgraph<G>(g: G) -> Result<Self, Error>
    where
        G: IntoEdgeReferences<EdgeWeight = C, NodeId = N> + IntoNodeIdentifiers,
    {
        let mut graph = Self::new();
        for n in g.node_identifiers() {
            graph.add_node(n);
        }
        for e in g.edge_references() {
            graph.add_edge(e.source(), e.target(), *e.weight())?;
        }
        Ok(graph)
    }

    /// Insert `node` if it is new and return its dense index.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        i
    }

    /// Add `capacity` from `u` to `v`.
    ///
    /// Repeated calls for the same ordered pair add up, and inserting `v -> u` after
    /// `u -> v` fills the reverse side of the existing arc pair instead of resetting it.
    /// Self-loops only register the node since they can never carry flow.
    pub fn add_edge(&mut self, u: N, v: N, capacity: C) -> Result<(), Error> {
        if capacity < C::zero() {
            return Err(Error::NegativeCapacity);
        }
        let ui = self.add_node(u);
        let vi = self.add_node(v);
        if ui == vi {
            log::trace!("ignoring self-loop at {:?}", self.nodes[ui]);
            return Ok(());
        }

        match self.pairs.get(&(ui, vi)).copied() {
            Some(a) => {
                // the pair total bounds every residual, later pushes cannot overflow
                self.arcs[a]
                    .capacity
                    .checked_add(&self.arcs[a ^ 1].capacity)
                    .and_then(|total| total.checked_add(&capacity))
                    .ok_or(Error::ArithmeticOverflow)?;
                self.arcs[a].capacity += capacity;
                self.arcs[a].residual += capacity;
            }
            None => {
                let a = self.arcs.len();
                self.arcs.push(ResidualArc {
                    head: vi,
                    capacity,
                    residual: capacity,
                });
                self.arcs.push(ResidualArc {
                    head: ui,
                    capacity: C::zero(),
                    residual: C::zero(),
                });
                self.adjacency[ui].push(a);
                self.adjacency[vi].push(a ^ 1);
                self.pairs.insert((ui, vi), a);
                self.pairs.insert((vi, ui), a ^ 1);
            }
        }
        Ok(())
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of arc pairs, i.e. adjacent node pairs.
    pub fn edge_count(&self) -> usize {
        self.arcs.len() / 2
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    pub fn capacity(&self, u: &N, v: &N) -> Option<C> {
        self.arc_between(u, v).map(|a| self.arcs[a].capacity)
    }

    pub fn residual(&self, u: &N, v: &N) -> Option<C> {
        self.arc_between(u, v).map(|a| self.arcs[a].residual)
    }

    /// Net flow currently sent from `u` to `v`, zero if the net flow goes the other way.
    pub fn flow(&self, u: &N, v: &N) -> Option<C> {
        self.arc_between(u, v).map(|a| self.net_flow(a))
    }

    /// All ordered pairs carrying positive net flow, in arc insertion order.
    pub fn flows(&self) -> impl Iterator<Item = EdgeFlow<N, C>> + '_ {
        (0..self.arcs.len())
            .filter(move |&a| self.net_flow(a) > C::zero())
            .map(move |a| {
                EdgeFlow::new(
                    self.nodes[self.tail(a)].clone(),
                    self.nodes[self.arcs[a].head].clone(),
                    self.arcs[a].capacity,
                    self.net_flow(a),
                )
            })
    }

    /// Breadth-first levels from `source` over the current residual capacities.
    /// Unreachable nodes map to `None`.
    pub fn levels(&self, source: &N) -> Result<BTreeMap<N, Option<usize>>, Error> {
        let src = self.node_index(source).ok_or(Error::UnknownSource)?;
        let levels = assign_levels(self, src);
        Ok(self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), levels.get(i)))
            .collect())
    }

    /// Verify the residual bookkeeping after a flow computation.
    ///
    /// Checks that every arc pair still sums to its inserted capacity, that no arc
    /// carries more than its capacity and that flow is conserved everywhere except at
    /// `source` and `sink`.
    pub fn check(&self, source: &N, sink: &N) -> Result<(), Error> {
        let (src, snk) = self.endpoints(source, sink)?;

        for a in (0..self.arcs.len()).step_by(2) {
            let (fwd, rev) = (&self.arcs[a], &self.arcs[a ^ 1]);
            let label = || format!("{:?} <-> {:?}", self.nodes[rev.head], self.nodes[fwd.head]);
            let residuals = fwd
                .residual
                .checked_add(&rev.residual)
                .ok_or(Error::ArithmeticOverflow)?;
            if residuals != fwd.capacity + rev.capacity {
                return Err(Error::ResidualImbalance(label()));
            }
            if [a, a ^ 1]
                .iter()
                .any(|&d| self.net_flow(d) > self.arcs[d].capacity)
            {
                return Err(Error::CapacityExceeded(label()));
            }
        }

        let mut inflow = alloc::vec![C::zero(); self.nodes.len()];
        let mut outflow = alloc::vec![C::zero(); self.nodes.len()];
        for a in 0..self.arcs.len() {
            let f = self.net_flow(a);
            let (u, v) = (self.tail(a), self.arcs[a].head);
            outflow[u] = outflow[u].checked_add(&f).ok_or(Error::ArithmeticOverflow)?;
            inflow[v] = inflow[v].checked_add(&f).ok_or(Error::ArithmeticOverflow)?;
        }
        if let Some(u) =
            (0..self.nodes.len()).find(|&u| u != src && u != snk && inflow[u] != outflow[u])
        {
            return Err(Error::ConservationViolated(format!("{:?}", self.nodes[u])));
        }

        log::debug!("      nodes: {}", self.nodes.len());
        log::debug!("  arc pairs: {}", self.edge_count());
        log::debug!("source sent: {}", outflow[src]);
        log::debug!(" sink taken: {}", inflow[snk]);
        Ok(())
    }

    pub(crate) fn node_index(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Resolve `source` and `sink` to dense indices, rejecting absent or equal nodes.
    pub(crate) fn endpoints(&self, source: &N, sink: &N) -> Result<(usize, usize), Error> {
        let src = self.node_index(source).ok_or(Error::UnknownSource)?;
        let snk = self.node_index(sink).ok_or(Error::UnknownSink)?;
        if src == snk {
            return Err(Error::SourceIsSink);
        }
        Ok((src, snk))
    }

    fn arc_between(&self, u: &N, v: &N) -> Option<usize> {
        let ui = self.node_index(u)?;
        let vi = self.node_index(v)?;
        self.pairs.get(&(ui, vi)).copied()
    }

    fn net_flow(&self, a: usize) -> C {
        let arc = &self.arcs[a];
        if arc.capacity > arc.residual {
            arc.capacity - arc.residual
        } else {
            C::zero()
        }
    }
}

impl<N, C: Capacity> ResidualGraph<N, C> {
    pub(crate) fn node_slots(&self) -> usize {
        self.adjacency.len()
    }

    /// Arc ids leaving node `u`, in insertion order.
    pub(crate) fn out_arcs(&self, u: usize) -> &[usize] {
        &self.adjacency[u]
    }

    pub(crate) fn head(&self, a: usize) -> usize {
        self.arcs[a].head
    }

    pub(crate) fn tail(&self, a: usize) -> usize {
        self.arcs[a ^ 1].head
    }

    pub(crate) fn residual_at(&self, a: usize) -> C {
        self.arcs[a].residual
    }

    /// Send `amount` along arc `a`, handing the same amount to its reverse arc.
    pub(crate) fn push(&mut self, a: usize, amount: C) {
        debug_assert!(amount <= self.arcs[a].residual);
        self.arcs[a].residual -= amount;
        self.arcs[a ^ 1].residual += amount;
    }
}

impl<N: fmt::Debug, C: Capacity> fmt::Display for ResidualGraph<N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arcs = self.arcs.iter().enumerate().map(|(a, arc)| {
            format!(
                "{:?} -> {:?}: {}/{}",
                self.nodes[self.tail(a)],
                self.nodes[arc.head],
                arc.residual,
                arc.capacity
            )
        });
        write!(f, "{}", arcs.format("\n"))
    }
}
