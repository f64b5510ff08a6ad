//! # Planning Tests
//!
//! Decision tree checks on hand-built snapshots.

use super::*;

/// Builds a snapshot with no faces from edges and selection lists.
fn wire(vertex_count: usize, edges: &[[usize; 2]], selected_edges: &[usize]) -> MeshSnapshot {
    let mut vertex_selected = vec![false; vertex_count];
    let edge_selected: Vec<bool> = (0..edges.len()).map(|e| selected_edges.contains(&e)).collect();
    for &e in selected_edges {
        for v in edges[e] {
            vertex_selected[v] = true;
        }
    }
    MeshSnapshot::new(vertex_selected, edges.to_vec(), edge_selected, Vec::new(), Vec::new())
        .unwrap()
}

/// Builds a face-less snapshot with the given vertices selected.
fn points(vertex_count: usize, edges: &[[usize; 2]], selected: &[usize]) -> MeshSnapshot {
    let vertex_selected = (0..vertex_count).map(|v| selected.contains(&v)).collect();
    MeshSnapshot::new(
        vertex_selected,
        edges.to_vec(),
        vec![false; edges.len()],
        Vec::new(),
        Vec::new(),
    )
    .unwrap()
}

/// Closed ring of `n` edges.
fn ring(n: usize) -> Vec<[usize; 2]> {
    (0..n).map(|i| [i, (i + 1) % n]).collect()
}

// =============================================================================
// BRANCH TESTS
// =============================================================================

#[test]
fn test_branch_from_mode() {
    assert_eq!(Branch::from_mode(SelectMode::VERTEX), Branch::Vertex);
    assert_eq!(Branch::from_mode(SelectMode::EDGE), Branch::Edge);
    assert_eq!(Branch::from_mode(SelectMode::FACE), Branch::Face);
    assert_eq!(Branch::from_mode(SelectMode::new(true, false, true)), Branch::Vertex);
    assert_eq!(Branch::from_mode(SelectMode::new(false, true, true)), Branch::Default);
    assert_eq!(Branch::from_mode(SelectMode::default()), Branch::Default);
}

// =============================================================================
// VERTEX FOLLOWUP TESTS
// =============================================================================

#[test]
fn test_followup_empty_selection() {
    assert_eq!(vertex_followup(&points(3, &[], &[])), None);
    assert_eq!(vertex_followup(&MeshSnapshot::default()), None);
}

#[test]
fn test_followup_isolated_point() {
    let snapshot = points(3, &[[1, 2]], &[0]);
    assert_eq!(vertex_followup(&snapshot), Some(VertexFollowup::IsolatedPoint));
}

#[test]
fn test_followup_whole_mesh_wins_over_pair() {
    let snapshot = points(2, &[], &[0, 1]);
    assert_eq!(vertex_followup(&snapshot), Some(VertexFollowup::WholeMesh));
}

#[test]
fn test_followup_disconnected_pair() {
    let snapshot = points(4, &[[0, 2], [1, 3]], &[0, 1]);
    assert_eq!(vertex_followup(&snapshot), Some(VertexFollowup::DisconnectedPair));
}

#[test]
fn test_followup_connected_pair() {
    let snapshot = points(4, &[[0, 1], [1, 2]], &[0, 1]);
    assert_eq!(vertex_followup(&snapshot), Some(VertexFollowup::Pair));
}

#[test]
fn test_followup_three_of_many() {
    let snapshot = points(5, &[], &[0, 1, 2]);
    assert_eq!(vertex_followup(&snapshot), None);
}

// =============================================================================
// EDGE STRATEGY TESTS
// =============================================================================

#[test]
fn test_edge_strategy_all_selected() {
    let edges = ring(4);
    let snapshot = wire(4, &edges, &[0, 1, 2, 3]);
    let strategy = edge_strategy(&snapshot, &SmartDeleteConfig::default());
    assert_eq!(strategy, EdgeStrategy::DeleteAll);
    assert_eq!(strategy.delete_type(), Some(DeleteType::Edge));
}

#[test]
fn test_edge_strategy_whole_island() {
    // Two separate triangles, all of the first one selected
    let edges = [[0, 1], [1, 2], [2, 0], [3, 4], [4, 5], [5, 3]];
    let snapshot = wire(6, &edges, &[0, 1, 2]);
    assert_eq!(
        edge_strategy(&snapshot, &SmartDeleteConfig::default()),
        EdgeStrategy::DeleteIsland
    );
}

#[test]
fn test_edge_strategy_loose_edges_are_islands() {
    // Two free-standing edges next to a triangle, both loose edges selected
    let edges = [[0, 1], [2, 3], [4, 5], [5, 6], [6, 4]];
    let snapshot = wire(7, &edges, &[0, 1]);
    assert!(snapshot
        .touched_vertices(&[0, 1])
        .iter()
        .all(|&v| snapshot.vertex_degree(v).unwrap() == SPUR_DEGREE));
    assert_eq!(
        edge_strategy(&snapshot, &SmartDeleteConfig::default()),
        EdgeStrategy::DeleteIsland
    );
}

#[test]
fn test_edge_strategy_small_loop_by_total() {
    let edges = ring(4);
    let snapshot = wire(4, &edges, &[0]);
    let strategy = edge_strategy(&snapshot, &SmartDeleteConfig::default());
    assert_eq!(strategy, EdgeStrategy::DeleteSmallLoop);
    assert_eq!(strategy.delete_type(), Some(DeleteType::EdgeFace));
}

#[test]
fn test_edge_strategy_small_loop_by_island() {
    // A pentagon next to a long ring; one pentagon edge selected
    let mut edges = ring(5);
    edges.extend((0..8).map(|i| [5 + i, 5 + (i + 1) % 8]));
    let snapshot = wire(13, &edges, &[2]);
    assert_eq!(
        edge_strategy(&snapshot, &SmartDeleteConfig::default()),
        EdgeStrategy::DeleteSmallLoop
    );
}

#[test]
fn test_edge_strategy_respects_configured_range() {
    let edges = ring(4);
    let snapshot = wire(4, &edges, &[0]);
    let triangles_only = SmartDeleteConfig::new(false, 3, 3).unwrap();
    assert_eq!(edge_strategy(&snapshot, &triangles_only), EdgeStrategy::Dissolve);
}

#[test]
fn test_edge_strategy_dissolve_on_large_ring() {
    let edges = ring(12);
    let snapshot = wire(12, &edges, &[3, 4]);
    let strategy = edge_strategy(&snapshot, &SmartDeleteConfig::default());
    assert_eq!(strategy, EdgeStrategy::Dissolve);
    assert_eq!(strategy.delete_type(), None);
}

#[test]
fn test_edge_strategy_nothing_selected() {
    let edges = ring(8);
    let snapshot = wire(8, &edges, &[]);
    // An empty selection is trivially its own island
    assert_eq!(
        edge_strategy(&snapshot, &SmartDeleteConfig::default()),
        EdgeStrategy::DeleteIsland
    );
}

// =============================================================================
// SELECTION REPAIR TESTS
// =============================================================================

#[test]
fn test_straighten_candidates_skip_missing() {
    // Path 0-1-2-3: inner vertices have degree 2
    let snapshot = points(4, &[[0, 1], [1, 2], [2, 3]], &[]);
    assert_eq!(straighten_candidates(&snapshot, &[0, 1, 2, 9]), vec![1, 2]);
}

#[test]
fn test_restore_selection_unchanged_count() {
    let restored = restore_selection(&[1, 4, 7], &[], 8, 8);
    assert_eq!(restored.indices, vec![1, 4, 7]);
    assert!(restored.exact);
}

#[test]
fn test_restore_selection_shifts_past_removed() {
    // Vertices 2 and 5 were straightened away
    let restored = restore_selection(&[0, 2, 3, 5, 6], &[5, 2], 8, 6);
    assert_eq!(restored.indices, vec![0, 2, 4]);
    assert!(restored.exact);
}

#[test]
fn test_restore_selection_bounds_guard_when_ambiguous() {
    let restored = restore_selection(&[0, 3, 6, 7], &[3], 8, 5);
    assert_eq!(restored.indices, vec![0, 3]);
    assert!(!restored.exact);
}
