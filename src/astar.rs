//! A* over an arbitrary successor graph with all search bookkeeping owned by
//! the call, adapted from
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Keeping the open/closed bookkeeping in a per-invocation map rather than on
//! the nodes themselves means nothing leaks between searches and concurrent
//! searches over one grid stay possible.

use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// How one search run ended.
pub(crate) enum SearchOutcome<N, C> {
    /// Path (start included) and its total cost.
    Found(Vec<N>, C),
    /// Open set ran dry before the goal was selected.
    Exhausted,
    /// The expansion budget was hit first.
    OverBudget(usize),
}

struct OpenEntry<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for OpenEntry<K> {}

impl<K: PartialEq> PartialEq for OpenEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<K: Ord> PartialOrd for OpenEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for OpenEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates a subordering based on
        // cost. Among equal f values this favors the entry with the largest g,
        // i.e. the one whose heuristic claims it is closest to the goal.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

pub(crate) fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    budget: Option<usize>,
) -> SearchOutcome<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut expanded: usize = 0;
    let mut to_see = BinaryHeap::new();
    to_see.push(OpenEntry {
        estimated_cost: Zero::zero(),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    while let Some(OpenEntry { cost, index, .. }) = to_see.pop() {
        let successors = {
            let (node, &(_, c)) = parents.get_index(index).unwrap();
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return SearchOutcome::Found(path, cost);
            }
            // We may have inserted a node several times into the binary heap
            // if we found a better way to access it. Ensure that we are
            // currently dealing with the best path and discard the others.
            if cost > c {
                continue;
            }
            if let Some(limit) = budget {
                if expanded >= limit {
                    return SearchOutcome::OverBudget(limit);
                }
            }
            expanded += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(OpenEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    SearchOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Line graph 0 - 1 - 2 - 3 with unit edges.
    fn line_successors(n: &i32) -> Vec<(i32, i32)> {
        [*n - 1, *n + 1]
            .into_iter()
            .filter(|s| (0..4).contains(s))
            .map(|s| (s, 1))
            .collect()
    }

    #[test]
    fn finds_shortest_line_path() {
        match astar(&0, line_successors, |n| 3 - *n, |n| *n == 3, None) {
            SearchOutcome::Found(path, cost) => {
                assert_eq!(path, vec![0, 1, 2, 3]);
                assert_eq!(cost, 3);
            }
            _ => panic!("expected a path"),
        }
    }

    #[test]
    fn exhausts_on_unreachable_goal() {
        let outcome = astar(&0, line_successors, |_| 0, |n| *n == 10, None);
        assert!(matches!(outcome, SearchOutcome::Exhausted));
    }

    #[test]
    fn reports_budget_before_exhaustion() {
        let outcome = astar(&0, line_successors, |_| 0, |n| *n == 10, Some(2));
        assert!(matches!(outcome, SearchOutcome::OverBudget(2)));
    }

    #[test]
    fn start_satisfying_goal_needs_no_expansion() {
        match astar(&3, line_successors, |n| 3 - *n, |n| *n == 3, Some(0)) {
            SearchOutcome::Found(path, cost) => {
                assert_eq!(path, vec![3]);
                assert_eq!(cost, 0);
            }
            _ => panic!("expected the trivial path"),
        }
    }
}
