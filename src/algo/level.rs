use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::capacity::Capacity;
use crate::graph::ResidualGraph;

/// Breadth-first distances of one phase, `None` for nodes not reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Levels(Vec<Option<usize>>);

impl Levels {
    pub(crate) fn get(&self, u: usize) -> Option<usize> {
        self.0[u]
    }

    /// Whether an arc `u -> v` belongs to the level graph (ignoring its capacity).
    pub(crate) fn advances(&self, u: usize, v: usize) -> bool {
        matches!((self.0[u], self.0[v]), (Some(lu), Some(lv)) if lv == lu + 1)
    }
}

/// Assign every node its minimum number of positive-residual hops from `source`.
pub(crate) fn assign_levels<N, C: Capacity>(graph: &ResidualGraph<N, C>, source: usize) -> Levels {
    let mut levels = vec![None; graph.node_slots()];
    levels[source] = Some(0);
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        let next = levels[u].map(|l| l + 1);
        for &a in graph.out_arcs(u) {
            let v = graph.head(a);
            if levels[v].is_none() && graph.residual_at(a) > C::zero() {
                levels[v] = next;
                queue.push_back(v);
            }
        }
    }

    Levels(levels)
}
