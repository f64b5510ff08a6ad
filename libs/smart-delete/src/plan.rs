//! # Delete Planning
//!
//! Pure decision functions of the smart delete engine.
//!
//! Every question the decision tree asks ("is this the whole mesh", "is this
//! selection one island", "is this a small loop") is answered here from a
//! [`MeshSnapshot`] without touching the host, so branch logic can be tested
//! on hand-built snapshots.

use crate::selection::{DeleteType, SelectMode};
use crate::snapshot::MeshSnapshot;
use config::constants::{SmartDeleteConfig, PASS_THROUGH_DEGREE, SPUR_DEGREE};
use serde::{Deserialize, Serialize};

/// Which part of the decision tree an invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// Vertex selection is on
    Vertex,
    /// Edge selection without face selection
    Edge,
    /// Face selection without edge selection
    Face,
    /// Any other combination
    Default,
}

impl Branch {
    /// Picks the branch for a selection mode. Vertex mode wins over the
    /// other flags.
    ///
    /// # Example
    ///
    /// ```rust
    /// use smart_delete::{Branch, SelectMode};
    ///
    /// assert_eq!(Branch::from_mode(SelectMode::new(true, true, false)), Branch::Vertex);
    /// assert_eq!(Branch::from_mode(SelectMode::new(false, true, true)), Branch::Default);
    /// ```
    pub fn from_mode(mode: SelectMode) -> Self {
        if mode.vertex {
            Branch::Vertex
        } else if mode.is_pure_edge() {
            Branch::Edge
        } else if mode.is_pure_face() {
            Branch::Face
        } else {
            Branch::Default
        }
    }
}

/// Why vertices left selected after a dissolve are hard deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexFollowup {
    /// One point with nothing around it to dissolve into
    IsolatedPoint,
    /// The whole mesh is still selected, so the dissolve had nothing to merge
    WholeMesh,
    /// Two points without an edge between them
    DisconnectedPair,
    /// Two points left over
    Pair,
}

/// Decides whether the vertices still selected after a dissolve need a hard
/// delete. Rules are checked in order; an empty selection never deletes.
pub fn vertex_followup(snapshot: &MeshSnapshot) -> Option<VertexFollowup> {
    let remaining = snapshot.selected_vertices();
    match remaining.as_slice() {
        [] => None,
        [_] => Some(VertexFollowup::IsolatedPoint),
        _ if remaining.len() == snapshot.vertex_count() => Some(VertexFollowup::WholeMesh),
        &[a, b] if snapshot.edge_between(a, b).is_none() => Some(VertexFollowup::DisconnectedPair),
        [_, _] => Some(VertexFollowup::Pair),
        _ => None,
    }
}

/// Strategy chosen for an edge-mode delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeStrategy {
    /// Every edge is selected
    DeleteAll,
    /// The selection is made of whole connected pieces
    DeleteIsland,
    /// Every selected edge is free at both ends. Such a selection is always
    /// a whole island, so [`EdgeStrategy::DeleteIsland`] is chosen first.
    DeleteSpurs,
    /// The mesh or island is a triangle, quad or pentagon
    DeleteSmallLoop,
    /// Interior edges; dissolve and merge the faces around them
    Dissolve,
}

impl EdgeStrategy {
    /// Hard delete issued for this strategy, `None` for a dissolve.
    pub fn delete_type(&self) -> Option<DeleteType> {
        match self {
            EdgeStrategy::DeleteAll | EdgeStrategy::DeleteIsland | EdgeStrategy::DeleteSpurs => {
                Some(DeleteType::Edge)
            }
            EdgeStrategy::DeleteSmallLoop => Some(DeleteType::EdgeFace),
            EdgeStrategy::Dissolve => None,
        }
    }
}

/// Chooses how to remove the selected edges of `snapshot`.
///
/// # Example
///
/// ```rust
/// use config::constants::SmartDeleteConfig;
/// use smart_delete::{edge_strategy, EdgeStrategy, MeshSnapshot};
///
/// // A lone selected edge is a whole island of its own.
/// let snapshot = MeshSnapshot::new(
///     vec![true, true],
///     vec![[0, 1]],
///     vec![true],
///     Vec::new(),
///     Vec::new(),
/// )
/// .unwrap();
/// let strategy = edge_strategy(&snapshot, &SmartDeleteConfig::default());
/// assert_eq!(strategy, EdgeStrategy::DeleteAll);
/// ```
pub fn edge_strategy(snapshot: &MeshSnapshot, config: &SmartDeleteConfig) -> EdgeStrategy {
    let selected = snapshot.selected_edges();
    let total = snapshot.edge_count();

    if selected.len() == total {
        return EdgeStrategy::DeleteAll;
    }

    let island = snapshot.edge_island(&selected);
    if island.len() == selected.len() {
        return EdgeStrategy::DeleteIsland;
    }

    // Unreachable after the island rule; kept so the rule order stays intact.
    let degrees = snapshot.degrees();
    let all_spurs = snapshot
        .touched_vertices(&selected)
        .iter()
        .all(|&v| degrees[v] == SPUR_DEGREE);
    if all_spurs {
        return EdgeStrategy::DeleteSpurs;
    }

    if config.is_small_loop(total) || config.is_small_loop(island.len()) {
        return EdgeStrategy::DeleteSmallLoop;
    }

    EdgeStrategy::Dissolve
}

/// Recorded vertices that pass an edge straight through after a dissolve.
///
/// Indices missing from `snapshot` are skipped.
pub fn straighten_candidates(snapshot: &MeshSnapshot, recorded: &[usize]) -> Vec<usize> {
    let degrees = snapshot.degrees();
    recorded
        .iter()
        .copied()
        .filter(|&v| degrees.get(v) == Some(&PASS_THROUGH_DEGREE))
        .collect()
}

/// Selection to restore once the straightening pass is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredSelection {
    /// Vertex indices valid in the post-straighten mesh
    pub indices: Vec<usize>,
    /// False when the removed vertices could not be identified and stale
    /// indices were only bounds-checked
    pub exact: bool,
}

/// Maps vertex indices recorded before the straightening dissolve onto the
/// mesh after it.
///
/// When the vertex count dropped by exactly the number of candidates, those
/// candidates are the removed vertices: survivors are shifted down past them
/// and the candidates themselves are dropped. When nothing was removed the
/// recorded indices stand. Otherwise only indices still in range are kept.
pub fn restore_selection(
    recorded: &[usize],
    candidates: &[usize],
    count_before: usize,
    count_after: usize,
) -> RestoredSelection {
    if count_after == count_before {
        return RestoredSelection {
            indices: recorded.iter().copied().filter(|&v| v < count_after).collect(),
            exact: true,
        };
    }

    if count_before.checked_sub(count_after) == Some(candidates.len()) {
        let mut removed = candidates.to_vec();
        removed.sort_unstable();
        let indices = recorded
            .iter()
            .copied()
            .filter(|v| removed.binary_search(v).is_err())
            .map(|v| v - removed.partition_point(|&r| r < v))
            .filter(|&v| v < count_after)
            .collect();
        return RestoredSelection {
            indices,
            exact: true,
        };
    }

    RestoredSelection {
        indices: recorded.iter().copied().filter(|&v| v < count_after).collect(),
        exact: false,
    }
}

#[cfg(test)]
mod tests;
