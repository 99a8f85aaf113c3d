use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::min;

use crate::algo::MaxFlow;
use crate::capacity::Capacity;
use crate::error::Error;
use crate::graph::ResidualGraph;
use crate::id::Id;

/// FIFO push-relabel max-flow algorithm.
///
/// Works on the same residual graph as [`Dinic`](crate::Dinic) and leaves it in the same
/// kind of state, which makes it a handy independent cross-check.
#[derive(Clone, Debug, Default)]
pub struct PushRelabel {
    relabels: usize,
}

impl PushRelabel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of relabel operations performed by the last run.
    pub fn relabels(&self) -> usize {
        self.relabels
    }
}

struct State<'g, N, C> {
    graph: &'g mut ResidualGraph<N, C>,
    source: usize,
    sink: usize,
    excess: Vec<C>,
    label: Vec<usize>,
    current: Vec<usize>,
    active: VecDeque<usize>,
    absorbed: C,
    relabels: usize,
}

impl<'g, N, C: Capacity> State<'g, N, C> {
    fn new(graph: &'g mut ResidualGraph<N, C>, source: usize, sink: usize) -> Self {
        let n = graph.node_slots();
        let mut label = vec![0; n];
        label[source] = n;
        Self {
            graph,
            source,
            sink,
            excess: vec![C::zero(); n],
            label,
            current: vec![0; n],
            active: VecDeque::new(),
            absorbed: C::zero(),
            relabels: 0,
        }
    }

    /// Saturate every arc leaving the source.
    fn preflow(&mut self) -> Result<(), Error> {
        for i in 0..self.graph.out_arcs(self.source).len() {
            let a = self.graph.out_arcs(self.source)[i];
            let cap = self.graph.residual_at(a);
            if cap > C::zero() {
                self.push(a, cap)?;
            }
        }
        Ok(())
    }

    fn push(&mut self, a: usize, amount: C) -> Result<(), Error> {
        let (u, v) = (self.graph.tail(a), self.graph.head(a));
        self.graph.push(a, amount);
        if u != self.source {
            self.excess[u] -= amount;
        }
        self.add_excess(v, amount)
    }

    fn add_excess(&mut self, v: usize, amount: C) -> Result<(), Error> {
        // The sink swallows everything, the source has unlimited supply.
        if v == self.sink {
            self.absorbed = self
                .absorbed
                .checked_add(&amount)
                .ok_or(Error::ArithmeticOverflow)?;
            return Ok(());
        }
        if v == self.source {
            return Ok(());
        }
        if self.excess[v].is_zero() {
            // first excess makes the node active
            self.active.push_back(v);
        }
        self.excess[v] = self.excess[v]
            .checked_add(&amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(())
    }

    // Push along admissible arcs, relabelling whenever `u` runs out of them.
    fn discharge(&mut self, u: usize) -> Result<(), Error> {
        while self.excess[u] > C::zero() {
            match self.graph.out_arcs(u).get(self.current[u]).copied() {
                Some(a) => {
                    let v = self.graph.head(a);
                    let residual = self.graph.residual_at(a);
                    if residual > C::zero() && self.label[u] == self.label[v] + 1 {
                        self.push(a, min(self.excess[u], residual))?;
                    } else {
                        self.current[u] += 1;
                    }
                }
                None => {
                    self.relabel(u)?;
                    self.current[u] = 0;
                }
            }
        }
        Ok(())
    }

    fn relabel(&mut self, u: usize) -> Result<(), Error> {
        let min_nbr_label = self
            .graph
            .out_arcs(u)
            .iter()
            .filter(|&&a| self.graph.residual_at(a) > C::zero())
            .map(|&a| self.label[self.graph.head(a)])
            .min()
            .ok_or_else(|| {
                Error::AlgoSpecific(format!("node #{u} holds excess without residual arcs"))
            })?;
        self.label[u] = min_nbr_label + 1;
        self.relabels += 1;
        Ok(())
    }

    fn run(&mut self) -> Result<C, Error> {
        self.preflow()?;
        while let Some(u) = self.active.pop_front() {
            self.discharge(u)?;
        }
        Ok(self.absorbed)
    }
}

impl MaxFlow for PushRelabel {
    fn max_flow<N: Id, C: Capacity>(
        &mut self,
        graph: &mut ResidualGraph<N, C>,
        source: &N,
        sink: &N,
    ) -> Result<C, Error> {
        let (src, snk) = graph.endpoints(source, sink)?;
        let mut state = State::new(graph, src, snk);
        let value = state.run()?;
        self.relabels = state.relabels;

        log::info!(
            "max flow {source:?} -> {sink:?} = {value} ({} relabels)",
            self.relabels
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excess_that_cannot_reach_the_sink_returns_to_the_source() {
        let mut g = ResidualGraph::new();
        g.add_edge('s', 'a', 10).unwrap();
        g.add_edge('a', 'b', 3).unwrap();
        g.add_edge('a', 'x', 7).unwrap();
        g.add_edge('b', 't', 10).unwrap();

        let mut pr = PushRelabel::new();
        assert_eq!(pr.max_flow(&mut g, &'s', &'t'), Ok(3));
        assert!(pr.relabels() > 0);
        assert_eq!(g.flow(&'s', &'a'), Some(3));
        assert_eq!(g.flow(&'a', &'x'), Some(0));
        assert_eq!(g.check(&'s', &'t'), Ok(()));
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let mut g = ResidualGraph::new();
        g.add_edge(1u64, 2, 5u64).unwrap();
        assert_eq!(
            PushRelabel::new().max_flow(&mut g, &0, &2),
            Err(Error::UnknownSource)
        );
        assert_eq!(
            PushRelabel::new().max_flow(&mut g, &1, &3),
            Err(Error::UnknownSink)
        );
    }
}
