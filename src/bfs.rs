//! A breadth-first search over an implicit graph with unit edge costs, keeping discovered nodes
//! in an [IndexMap] so that every node is addressed by its discovery index. The frontier only
//! holds indices; a node's parent and distance live next to it in the map.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::Vacant;
use indexmap::IndexMap;
use log::debug;
use std::collections::VecDeque;
use std::hash::Hash;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index of the root node.
const NO_PARENT: usize = usize::MAX;

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Scratch state of one search: the parent map and the FIFO frontier. Reusing a context
/// between searches only saves allocations, every call starts from a cleared state.
#[derive(Clone, Debug)]
pub struct SearchContext<N> {
    /// Discovered nodes with (parent index, distance from the root), in discovery order.
    pub parents: FxIndexMap<N, (usize, u32)>,
    frontier: VecDeque<usize>,
}

impl<N> Default for SearchContext<N> {
    fn default() -> Self {
        SearchContext {
            parents: FxIndexMap::default(),
            frontier: VecDeque::new(),
        }
    }
}

impl<N> SearchContext<N>
where
    N: Eq + Hash + Clone,
{
    pub fn new() -> SearchContext<N> {
        SearchContext::default()
    }

    /// Runs BFS from `start` until a dequeued node satisfies `success`, returning the path from
    /// `start` to that node (both inclusive) and its distance. `observe` is called with every
    /// dequeued node except the root. Returns [None] once the frontier is exhausted, in which
    /// case [parents](Self::parents) holds the whole component of `start`.
    pub fn bfs<FN, IN, FS, FO>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut success: FS,
        mut observe: FO,
    ) -> Option<(Vec<N>, u32)>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = N>,
        FS: FnMut(&N) -> bool,
        FO: FnMut(&N, u32),
    {
        self.parents.clear();
        self.frontier.clear();
        self.parents.insert(start.clone(), (NO_PARENT, 0));
        self.frontier.push_back(0);
        while let Some(index) = self.frontier.pop_front() {
            let (dist, successors) = {
                let Some((node, &(_, dist))) = self.parents.get_index(index) else {
                    continue;
                };
                if index != 0 {
                    observe(node, dist);
                }
                if success(node) {
                    let path = reverse_path(&self.parents, |&(p, _)| p, index);
                    debug!(
                        "Destination dequeued at distance {} after discovering {} nodes",
                        dist,
                        self.parents.len()
                    );
                    return Some((path, dist));
                }
                (dist, successors(node))
            };
            for successor in successors {
                // A node is final once discovered: every later route to it is at least as long.
                if let Vacant(e) = self.parents.entry(successor) {
                    let n = e.index();
                    e.insert((index, dist + 1));
                    self.frontier.push_back(n);
                }
            }
        }
        debug!("Frontier exhausted after {} nodes", self.parents.len());
        None
    }

    /// Distance of a node discovered by the last search.
    pub fn distance(&self, node: &N) -> Option<u32> {
        self.parents.get(node).map(|&(_, d)| d)
    }

    /// Nodes discovered by the last search with their distances, in discovery order.
    pub fn distances(&self) -> impl Iterator<Item = (&N, u32)> + '_ {
        self.parents.iter().map(|(node, &(_, d))| (node, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Integers on a line where each node links to its two neighbours within 0..10.
    fn line_successors(n: &i32) -> Vec<i32> {
        [n - 1, n + 1]
            .into_iter()
            .filter(|x| (0..10).contains(x))
            .collect()
    }

    #[test]
    fn finds_path_on_a_line() {
        let mut ct = SearchContext::new();
        let (path, dist) = ct
            .bfs(&3, line_successors, |n| *n == 7, |_, _| {})
            .unwrap();
        assert_eq!(path, vec![3, 4, 5, 6, 7]);
        assert_eq!(dist, 4);
    }

    #[test]
    fn root_is_not_observed() {
        let mut ct = SearchContext::new();
        let mut seen = vec![];
        ct.bfs(&0, line_successors, |n| *n == 2, |n, d| seen.push((*n, d)));
        assert_eq!(seen, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn exhaustion_labels_the_component() {
        let mut ct = SearchContext::new();
        let result = ct.bfs(&5, line_successors, |_| false, |_, _| {});
        assert!(result.is_none());
        assert_eq!(ct.parents.len(), 10);
        assert_eq!(ct.distance(&0), Some(5));
        assert_eq!(ct.distance(&9), Some(4));
        assert_eq!(ct.distance(&10), None);
        // Discovery order is non-decreasing in distance.
        let dists: Vec<u32> = ct.distances().map(|(_, d)| d).collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn context_is_reset_between_searches() {
        let mut ct = SearchContext::new();
        ct.bfs(&0, line_successors, |_| false, |_, _| {});
        let (path, _) = ct
            .bfs(&9, line_successors, |n| *n == 9, |_, _| {})
            .unwrap();
        assert_eq!(path, vec![9]);
        assert_eq!(ct.parents.len(), 1);
    }
}
