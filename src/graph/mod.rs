/// Dense, validated cost matrices
pub mod matrix;
/// Rooted trees stored as parent maps
pub mod tree;
/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// Find the [Shortest-Path Tree (SPT)](https://en.wikipedia.org/wiki/Shortest-path_tree)
pub mod spt;
/// Walk a tree as an [Euler tour](https://en.wikipedia.org/wiki/Euler_tour_technique)
pub mod euler;
/// Approximate the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
pub mod tsp;

#[cfg(test)]
pub(crate) mod oracle;

/// Index of the cheapest candidate, scanning in the order given.
///
/// A candidate replaces the incumbent only when it is strictly cheaper,
/// so on ties the first candidate seen (the lowest index for ascending scans) wins.
/// Every builder and greedy step that picks a minimum goes through here so ties
/// resolve identically everywhere.
pub(crate) fn first_minimum<I>(candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    candidates
        .into_iter()
        .fold(None, |best, (index, cost)| match best {
            Some((_, best_cost)) if cost >= best_cost => best,
            _ => Some((index, cost)),
        })
}
