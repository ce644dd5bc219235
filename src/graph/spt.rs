use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::first_minimum;
use crate::{CostMatrix, ParentMap, Result};

/// How the shortest-path tree builder treats a tentative distance of exactly zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroCostPolicy {
    /// Zero is an ordinary distance: zero-weight edges are supported
    #[default]
    Settle,
    /// Never select a vertex whose tentative distance is exactly zero.
    ///
    /// Such vertices are left unattached and the build fails as disconnected.
    /// Matches the historical selection scan, which used zero to mean "unreachable".
    LegacySkip,
}

impl ZeroCostPolicy {
    fn is_selectable(self, cost: f64) -> bool {
        match self {
            ZeroCostPolicy::Settle => true,
            ZeroCostPolicy::LegacySkip => cost != 0.,
        }
    }
}

/// Compute a shortest-path tree from `root` with Dijkstra's algorithm in O(v^2) time.
///
/// Selection is a linear scan over unsettled vertices with ties going to the lowest index,
/// same as [super::mst::compute_mst]. Relaxation is strict, so a direct edge from the root
/// is kept when a longer chain would cost the same.
///
/// <https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm#Pseudocode>
pub fn compute_spt(matrix: &CostMatrix, root: usize, policy: ZeroCostPolicy) -> Result<ParentMap> {
    matrix.check_root(root)?;
    let n = matrix.len();

    let mut tree = ParentMap::seed(root, n);
    let mut cost = matrix.row(root).to_vec();
    cost[root] = 0.;
    let mut frontier_join = vec![root; n];

    while let Some((v, distance)) = first_minimum(
        (0..n)
            .filter(|w| {
                !tree.is_attached(*w) && cost[*w].is_finite() && policy.is_selectable(cost[*w])
            })
            .map(|w| (w, cost[w])),
    ) {
        tree.attach(v, frontier_join[v]);
        for w in 0..n {
            if tree.is_attached(w) {
                continue;
            }
            let through_v = distance + matrix[(v, w)];
            if through_v < cost[w] {
                cost[w] = through_v;
                frontier_join[w] = v;
            }
        }
    }

    let unreached = tree.unattached().count();
    if unreached > 0 {
        debug!(
            "SPT from {} left {} of {} vertices unattached ({:?})",
            root, unreached, n, policy
        );
    }
    tree.into_spanning()
}
