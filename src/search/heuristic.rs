use crate::label::{NodeLabel, LABEL_COUNT};
use crate::profile::MazeProfile;
use std::collections::VecDeque;

/// Static per-goal distance estimates for A*.
///
/// `estimate(goal, node)` is the hop distance from `node` to `goal` along the
/// profile's canonical edges. Labels the canonical maze cannot connect get
/// `0`, which keeps the table admissible for any detected graph that is a
/// subgraph of the canonical one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeuristicTable {
    table: [[u32; LABEL_COUNT]; LABEL_COUNT],
}

impl HeuristicTable {
    pub fn from_profile(profile: &MazeProfile) -> Self {
        let mut adjacency: [Vec<NodeLabel>; LABEL_COUNT] = Default::default();
        for &(a, b) in &profile.canonical_edges {
            if a != b && !adjacency[a.index()].contains(&b) {
                adjacency[a.index()].push(b);
                adjacency[b.index()].push(a);
            }
        }

        let mut table = [[0u32; LABEL_COUNT]; LABEL_COUNT];
        for goal in NodeLabel::ALL {
            let mut hops: [Option<u32>; LABEL_COUNT] = [None; LABEL_COUNT];
            hops[goal.index()] = Some(0);
            let mut queue = VecDeque::from([goal]);
            while let Some(current) = queue.pop_front() {
                let next_hops = hops[current.index()].unwrap_or(0) + 1;
                for &n in &adjacency[current.index()] {
                    if hops[n.index()].is_none() {
                        hops[n.index()] = Some(next_hops);
                        queue.push_back(n);
                    }
                }
            }
            for node in NodeLabel::ALL {
                table[goal.index()][node.index()] = hops[node.index()].unwrap_or(0);
            }
        }
        Self { table }
    }

    #[inline]
    pub fn estimate(&self, goal: NodeLabel, node: NodeLabel) -> u32 {
        self.table[goal.index()][node.index()]
    }

    /// Estimates towards `goal`, indexed by [`NodeLabel::index`].
    pub fn for_goal(&self, goal: NodeLabel) -> &[u32; LABEL_COUNT] {
        &self.table[goal.index()]
    }
}

impl Default for HeuristicTable {
    fn default() -> Self {
        Self::from_profile(&MazeProfile::default())
    }
}
