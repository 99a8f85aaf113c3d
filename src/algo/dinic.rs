use alloc::vec;
use alloc::vec::Vec;

use crate::algo::level::{assign_levels, Levels};
use crate::algo::MaxFlow;
use crate::capacity::Capacity;
use crate::error::Error;
use crate::graph::ResidualGraph;
use crate::id::Id;

/// Dinic's blocking-flow max-flow algorithm.
#[derive(Clone, Debug)]
pub struct Dinic {
    /// Remember the first untried arc of every node during a phase, so dead ends are
    /// skipped by later searches of the same phase.
    pub use_current_arc: bool,
    phases: usize,
    augmentations: usize,
}

impl Default for Dinic {
    fn default() -> Self {
        Self {
            use_current_arc: true,
            phases: 0,
            augmentations: 0,
        }
    }
}

impl Dinic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of level graphs built by the last run that reached the sink.
    pub fn phases(&self) -> usize {
        self.phases
    }

    /// Number of augmenting paths found by the last run.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }
}

impl MaxFlow for Dinic {
    fn max_flow<N: Id, C: Capacity>(
        &mut self,
        graph: &mut ResidualGraph<N, C>,
        source: &N,
        sink: &N,
    ) -> Result<C, Error> {
        let (src, snk) = graph.endpoints(source, sink)?;
        self.phases = 0;
        self.augmentations = 0;

        let mut next = vec![0; graph.node_slots()];
        let mut path = Vec::new();
        let mut value = C::zero();
        loop {
            let levels = assign_levels(graph, src);
            let Some(depth) = levels.get(snk) else {
                break;
            };
            self.phases += 1;
            log::debug!("phase {}: sink at level {depth}", self.phases);

            next.iter_mut().for_each(|i| *i = 0);
            loop {
                if !self.use_current_arc {
                    next.iter_mut().for_each(|i| *i = 0);
                }
                let Some(pushed) = find_path(graph, &levels, &mut next, &mut path, src, snk)
                else {
                    break;
                };
                value = value
                    .checked_add(&pushed)
                    .ok_or(Error::ArithmeticOverflow)?;
                for &a in &path {
                    graph.push(a, pushed);
                }
                self.augmentations += 1;
                log::trace!(
                    "augmenting path #{} of {} arcs carries {pushed}",
                    self.augmentations,
                    path.len()
                );
            }
        }

        log::info!(
            "max flow {source:?} -> {sink:?} = {value} ({} phases, {} augmenting paths)",
            self.phases,
            self.augmentations
        );
        Ok(value)
    }
}

/// Walk the level graph depth-first from `source` and return the arcs of the first path
/// reaching `sink` in `path`, together with its bottleneck residual.
///
/// Arcs that are saturated, off-level or lead into a dead end advance the `next` pointer
/// of their tail. Returns `None` once the source itself is a dead end. Nothing is pushed
/// here, the caller applies the flow after accepting the path.
fn find_path<N, C: Capacity>(
    graph: &ResidualGraph<N, C>,
    levels: &Levels,
    next: &mut [usize],
    path: &mut Vec<usize>,
    source: usize,
    sink: usize,
) -> Option<C> {
    path.clear();
    let mut u = source;
    while u != sink {
        match graph.out_arcs(u).get(next[u]).copied() {
            Some(a) => {
                let v = graph.head(a);
                if graph.residual_at(a) > C::zero() && levels.advances(u, v) {
                    path.push(a);
                    u = v;
                } else {
                    next[u] += 1;
                }
            }
            None => {
                // retreat and skip the arc that led here
                let a = path.pop()?;
                u = graph.tail(a);
                next[u] += 1;
            }
        }
    }
    path.iter().map(|&a| graph.residual_at(a)).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> ResidualGraph<char, i32> {
        let mut g = ResidualGraph::new();
        g.add_edge('A', 'B', 10).unwrap();
        g.add_edge('A', 'C', 5).unwrap();
        g.add_edge('B', 'D', 15).unwrap();
        g.add_edge('C', 'D', 10).unwrap();
        g
    }

    #[test]
    fn diamond_takes_one_phase() {
        let mut g = diamond();
        let mut dinic = Dinic::new();
        assert_eq!(dinic.max_flow(&mut g, &'A', &'D'), Ok(15));
        assert_eq!(dinic.phases(), 1);
        assert_eq!(dinic.augmentations(), 2);
        assert_eq!(g.residual(&'A', &'B'), Some(0));
        assert_eq!(g.residual(&'D', &'B'), Some(10));
    }

    #[test]
    fn second_phase_cancels_flow_over_a_reverse_arc() {
        // the first phase saturates x->y, the second must route p-q-y-x-z-w-t
        let mut g = ResidualGraph::new();
        for (u, v) in [
            ('s', 'x'),
            ('x', 'y'),
            ('y', 't'),
            ('s', 'p'),
            ('p', 'q'),
            ('q', 'y'),
            ('x', 'z'),
            ('z', 'w'),
            ('w', 't'),
        ] {
            g.add_edge(u, v, 1).unwrap();
        }

        let mut dinic = Dinic::new();
        assert_eq!(dinic.max_flow(&mut g, &'s', &'t'), Ok(2));
        assert_eq!(dinic.phases(), 2);
        assert_eq!(g.flow(&'x', &'y'), Some(0));
        assert_eq!(g.check(&'s', &'t'), Ok(()));
    }

    #[test]
    fn current_arc_does_not_change_the_value() {
        let mut with = diamond();
        let mut without = diamond();
        let mut plain = Dinic {
            use_current_arc: false,
            ..Dinic::default()
        };
        assert_eq!(
            Dinic::new().max_flow(&mut with, &'A', &'D'),
            plain.max_flow(&mut without, &'A', &'D')
        );
    }

    #[test]
    fn source_equal_to_sink_is_rejected() {
        let mut g = diamond();
        assert_eq!(
            Dinic::new().max_flow(&mut g, &'A', &'A'),
            Err(Error::SourceIsSink)
        );
    }

    #[test]
    fn total_overflow_is_reported() {
        let mut g = ResidualGraph::<u32, u32>::new();
        g.add_edge(0, 1, u32::MAX).unwrap();
        g.add_edge(0, 2, 1).unwrap();
        g.add_edge(1, 3, u32::MAX).unwrap();
        g.add_edge(2, 3, 1).unwrap();
        assert_eq!(
            Dinic::new().max_flow(&mut g, &0, &3),
            Err(Error::ArithmeticOverflow)
        );
        // the rejected path was never applied
        assert_eq!(g.residual(&0, &2), Some(1));
        assert_eq!(g.flow(&2, &3), Some(0));
    }
}
