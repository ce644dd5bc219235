use crate::{Error, ParentMap, Result};

/// Walk `tree` depth first from its root, recording a vertex on entry and again each time
/// the walk climbs back into it from a child. Children are visited in increasing index order.
///
/// For a tree over n vertices the tour has 2n - 1 entries and opens and closes with the root.
///
/// Uses an explicit stack of (vertex, next child) frames so degenerate trees
/// as deep as they are wide cannot overflow the call stack.
///
/// Fails with [Error::Disconnected] if some vertex cannot be reached from the root.
pub fn euler_tour(tree: &ParentMap) -> Result<Vec<usize>> {
    let root = tree.root();
    let children = tree.children();

    let mut tour = Vec::with_capacity(2 * tree.len() - 1);
    let mut reached = vec![false; tree.len()];
    tour.push(root);
    reached[root] = true;

    let mut stack = vec![(root, 0)];
    while let Some((vertex, next_child)) = stack.last_mut() {
        match children[*vertex].get(*next_child) {
            Some(&child) => {
                *next_child += 1;
                tour.push(child);
                reached[child] = true;
                stack.push((child, 0));
            }
            None => {
                stack.pop();
                // Climb back up
                if let Some((parent, _)) = stack.last() {
                    tour.push(*parent);
                }
            }
        }
    }

    let unreached = reached
        .iter()
        .enumerate()
        .filter(|(_, reached)| !**reached)
        .map(|(vertex, _)| vertex)
        .collect::<Vec<_>>();
    if unreached.is_empty() {
        Ok(tour)
    } else {
        Err(Error::Disconnected { root, unreached })
    }
}

#[cfg(test)]
mod tests {
    use super::euler_tour;
    use crate::graph::oracle;
    use crate::{Error, ParentMap};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn euler_tour_of_single_vertex() {
        let tree = ParentMap::new(0, vec![Some(0)]).unwrap();
        assert_eq!(euler_tour(&tree).unwrap(), vec![0]);
    }

    #[test]
    fn euler_tour_revisits_parents_on_the_way_up() {
        // 0 -> {1, 3}, 1 -> {2}
        let tree = ParentMap::new(0, vec![Some(0), Some(0), Some(1), Some(0)]).unwrap();
        assert_eq!(euler_tour(&tree).unwrap(), vec![0, 1, 2, 1, 0, 3, 0]);
    }

    #[test]
    fn euler_tour_from_non_zero_root() {
        // 2 -> {0, 3}, 0 -> {1}
        let tree = ParentMap::new(2, vec![Some(2), Some(0), Some(2), Some(2)]).unwrap();
        assert_eq!(euler_tour(&tree).unwrap(), vec![2, 0, 1, 0, 2, 3, 2]);
    }

    #[test]
    fn euler_tour_of_deep_chain() {
        const N: usize = 200_000;
        let parents = (0..N).map(|i| Some(i.saturating_sub(1))).collect();
        let tree = ParentMap::new(0, parents).unwrap();
        let tour = euler_tour(&tree).unwrap();
        assert_eq!(tour.len(), 2 * N - 1);
        assert_eq!(tour[N - 1], N - 1);
    }

    #[test]
    fn euler_tour_rejects_unreachable_vertices() {
        let partial = ParentMap::new(0, vec![Some(0), None, Some(1)]).unwrap();
        assert_eq!(
            euler_tour(&partial),
            Err(Error::Disconnected {
                root: 0,
                unreached: vec![1, 2]
            })
        );
        // 2 and 3 point at each other and never reach the root
        let cycle = ParentMap::new(0, vec![Some(0), Some(0), Some(3), Some(2)]).unwrap();
        assert_eq!(
            euler_tour(&cycle),
            Err(Error::Disconnected {
                root: 0,
                unreached: vec![2, 3]
            })
        );
    }

    proptest! {
        #[test]
        fn euler_tour_shape(tree in oracle::spanning_tree(60)) {
            let tour = euler_tour(&tree).unwrap();
            prop_assert_eq!(tour.len(), 2 * tree.len() - 1);
            prop_assert_eq!(tour.first(), Some(&tree.root()));
            prop_assert_eq!(tour.last(), Some(&tree.root()));
            // Consecutive entries are always joined by a tree edge
            for step in tour.windows(2) {
                let (a, b) = (step[0], step[1]);
                prop_assert!(tree.parent(a) == Some(b) || tree.parent(b) == Some(a));
            }
        }
    }
}
