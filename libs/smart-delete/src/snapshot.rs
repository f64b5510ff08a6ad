//! # Mesh Snapshot
//!
//! Committed, read-only view of a mesh and its selection state.
//!
//! A snapshot is produced by [`MeshHost::snapshot`](crate::host::MeshHost::snapshot)
//! after all pending mutations are applied. Every connectivity question the
//! engine asks is answered from a snapshot, and a snapshot is never reused
//! across a mutation: indices and adjacency change when elements are removed.

use crate::error::{DeleteError, DeleteResult};
use hashbrown::{HashMap, HashSet};

/// Immutable mesh state at one point of an invocation.
///
/// # Example
///
/// ```rust
/// use smart_delete::MeshSnapshot;
///
/// // Two vertices joined by one selected edge.
/// let snapshot = MeshSnapshot::new(
///     vec![true, true],
///     vec![[0, 1]],
///     vec![true],
///     Vec::new(),
///     Vec::new(),
/// )
/// .unwrap();
///
/// assert_eq!(snapshot.vertex_degree(0).unwrap(), 1);
/// assert_eq!(snapshot.edge_between(1, 0), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeshSnapshot {
    vertex_selected: Vec<bool>,
    edges: Vec<[usize; 2]>,
    edge_selected: Vec<bool>,
    faces: Vec<Vec<usize>>,
    face_selected: Vec<bool>,
}

impl MeshSnapshot {
    /// Builds a snapshot from per-element selection flags and connectivity.
    ///
    /// Fails with a host error when flag lists and element lists disagree in
    /// length or when an edge or face references a missing vertex.
    pub fn new(
        vertex_selected: Vec<bool>,
        edges: Vec<[usize; 2]>,
        edge_selected: Vec<bool>,
        faces: Vec<Vec<usize>>,
        face_selected: Vec<bool>,
    ) -> DeleteResult<Self> {
        if edges.len() != edge_selected.len() {
            return Err(DeleteError::host(format!(
                "{} edges but {} edge selection flags",
                edges.len(),
                edge_selected.len()
            )));
        }
        if faces.len() != face_selected.len() {
            return Err(DeleteError::host(format!(
                "{} faces but {} face selection flags",
                faces.len(),
                face_selected.len()
            )));
        }

        let count = vertex_selected.len();
        let referenced = edges.iter().flatten().chain(faces.iter().flatten());
        if let Some(&index) = referenced.into_iter().find(|&&v| v >= count) {
            return Err(DeleteError::InvalidIndex { index, count });
        }

        Ok(Self {
            vertex_selected,
            edges,
            edge_selected,
            faces,
            face_selected,
        })
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_selected.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_selected.is_empty()
    }

    /// Returns the edges as vertex index pairs.
    #[inline]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Returns the face loops.
    #[inline]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Checks that a vertex index exists in this snapshot.
    pub fn check_vertex(&self, index: usize) -> DeleteResult<()> {
        if index < self.vertex_count() {
            Ok(())
        } else {
            Err(DeleteError::InvalidIndex {
                index,
                count: self.vertex_count(),
            })
        }
    }

    /// Returns whether a vertex is selected. Missing vertices are not.
    #[inline]
    pub fn is_vertex_selected(&self, index: usize) -> bool {
        self.vertex_selected.get(index).copied().unwrap_or(false)
    }

    /// Indices of selected vertices, ascending.
    pub fn selected_vertices(&self) -> Vec<usize> {
        selected_indices(&self.vertex_selected)
    }

    /// Indices of selected edges, ascending.
    pub fn selected_edges(&self) -> Vec<usize> {
        selected_indices(&self.edge_selected)
    }

    /// Indices of selected faces, ascending.
    pub fn selected_faces(&self) -> Vec<usize> {
        selected_indices(&self.face_selected)
    }

    /// Number of edges incident to `vertex`.
    pub fn vertex_degree(&self, vertex: usize) -> DeleteResult<usize> {
        self.check_vertex(vertex)?;
        Ok(self.edges.iter().filter(|e| e.contains(&vertex)).count())
    }

    /// Degrees of all vertices in one pass.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertex_count()];
        for &[a, b] in &self.edges {
            degrees[a] += 1;
            degrees[b] += 1;
        }
        degrees
    }

    /// Index of the edge joining `a` and `b`, in either direction.
    pub fn edge_between(&self, a: usize, b: usize) -> Option<usize> {
        self.edges
            .iter()
            .position(|&[x, y]| (x == a && y == b) || (x == b && y == a))
    }

    /// Sorted, deduplicated vertices touched by the given edges.
    pub fn touched_vertices(&self, edges: &[usize]) -> Vec<usize> {
        let mut vertices: Vec<usize> = edges
            .iter()
            .filter_map(|&e| self.edges.get(e))
            .flatten()
            .copied()
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    /// Flood fills from the seed edges over vertex adjacency.
    ///
    /// Any mesh edge sharing a vertex with an absorbed edge is absorbed, so
    /// the result is every edge of the connected pieces the seeds touch.
    pub fn edge_island(&self, seeds: &[usize]) -> HashSet<usize> {
        let mut vertex_edges: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, &[a, b]) in self.edges.iter().enumerate() {
            vertex_edges.entry(a).or_default().push(index);
            vertex_edges.entry(b).or_default().push(index);
        }

        let mut island = HashSet::new();
        let mut pending: Vec<usize> = seeds
            .iter()
            .copied()
            .filter(|&e| e < self.edge_count())
            .collect();

        while let Some(edge) = pending.pop() {
            if !island.insert(edge) {
                continue;
            }
            for vertex in self.edges[edge] {
                if let Some(neighbours) = vertex_edges.get(&vertex) {
                    pending.extend(neighbours.iter().filter(|e| !island.contains(*e)));
                }
            }
        }

        island
    }
}

fn selected_indices(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &selected)| selected.then_some(i))
        .collect()
}
