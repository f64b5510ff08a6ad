//! # Edit Mesh
//!
//! In-memory mesh editing session implementing [`MeshHost`].
//!
//! Vertices, edges and polygon faces are stored in flat index lists with a
//! selection flag per element. Removing elements compacts every list while
//! keeping survivors in their original order, the same index behavior an
//! editor exposes to its scripts.
//!
//! ## Example
//!
//! ```rust
//! use smart_delete::{EditMesh, MeshHost, SelectMode, SmartDelete};
//!
//! let mut mesh = EditMesh::grid(4, 4);
//! mesh.set_select_mode(SelectMode::FACE).unwrap();
//! mesh.select_faces(&[0, 5]);
//!
//! SmartDelete::default().execute(&mut mesh).unwrap();
//! assert_eq!(mesh.face_count(), 14);
//! ```

mod topology;


use crate::error::{DeleteError, DeleteResult};
use crate::host::MeshHost;
use crate::selection::{DeleteType, SelectMode};
use crate::snapshot::MeshSnapshot;
use glam::DVec3;
use topology::all_distinct;
use tracing::debug;

/// A polygon mesh inside an editing session.
#[derive(Debug, Clone)]
pub struct EditMesh {
    /// Vertex positions
    positions: Vec<DVec3>,
    /// Vertex selection flags
    vertex_selected: Vec<bool>,
    /// Edges as vertex index pairs, no duplicates
    edges: Vec<[usize; 2]>,
    /// Edge selection flags
    edge_selected: Vec<bool>,
    /// Face loops, at least three distinct vertices each
    faces: Vec<Vec<usize>>,
    /// Face selection flags
    face_selected: Vec<bool>,
    /// Active selection mode
    select_mode: SelectMode,
    /// Whether the session is editing this mesh
    editing: bool,
}

impl Default for EditMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl EditMesh {
    /// Creates an empty mesh in vertex select mode, ready for editing.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            vertex_selected: Vec::new(),
            edges: Vec::new(),
            edge_selected: Vec::new(),
            faces: Vec::new(),
            face_selected: Vec::new(),
            select_mode: SelectMode::VERTEX,
            editing: true,
        }
    }

    /// Creates a flat grid of `columns` x `rows` quads in the XY plane.
    ///
    /// Vertex `(x, y)` has index `y * (columns + 1) + x`.
    pub fn grid(columns: usize, rows: usize) -> Self {
        let mut mesh = Self::new();
        let stride = columns + 1;
        for y in 0..=rows {
            for x in 0..=columns {
                mesh.add_vertex(DVec3::new(x as f64, y as f64, 0.0));
            }
        }
        for y in 0..rows {
            for x in 0..columns {
                let v0 = y * stride + x;
                mesh.add_face(&[v0, v0 + 1, v0 + stride + 1, v0 + stride]);
            }
        }
        mesh
    }

    /// Creates a single regular polygon face with `sides` corners.
    ///
    /// `sides` must be at least 3.
    pub fn polygon(sides: usize) -> Self {
        debug_assert!(sides >= 3, "polygon needs at least 3 sides, got {sides}");
        let mut mesh = Self::new();
        let corners: Vec<usize> = (0..sides)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / sides as f64;
                mesh.add_vertex(DVec3::new(angle.cos(), angle.sin(), 0.0))
            })
            .collect();
        mesh.add_face(&corners);
        mesh
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
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
        self.positions.is_empty()
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns the edges.
    #[inline]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Returns the face loops.
    #[inline]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> usize {
        self.positions.push(position);
        self.vertex_selected.push(false);
        self.positions.len() - 1
    }

    /// Adds an edge between two vertices, returning the existing edge if the
    /// pair is already connected.
    ///
    /// Both vertices must exist and differ.
    pub fn add_edge(&mut self, a: usize, b: usize) -> usize {
        debug_assert!(
            a < self.vertex_count() && b < self.vertex_count(),
            "edge {a}-{b} out of range for {} vertices",
            self.vertex_count()
        );
        debug_assert_ne!(a, b, "degenerate edge at vertex {a}");
        if let Some(index) = self.edge_index(a, b) {
            return index;
        }
        self.edges.push([a, b]);
        self.edge_selected.push(false);
        self.edges.len() - 1
    }

    /// Adds a face loop and any of its edges that are missing.
    ///
    /// Corners must be at least three distinct existing vertices. Meshes
    /// assembled by hand can be checked with [`EditMesh::validate`].
    pub fn add_face(&mut self, corners: &[usize]) -> usize {
        debug_assert!(
            corners.len() >= 3 && all_distinct(corners),
            "face needs at least 3 distinct corners: {corners:?}"
        );
        for i in 0..corners.len() {
            self.add_edge(corners[i], corners[(i + 1) % corners.len()]);
        }
        self.faces.push(corners.to_vec());
        self.face_selected.push(false);
        self.faces.len() - 1
    }

    /// Enters or leaves the editing session.
    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Index of the edge joining `a` and `b`.
    pub fn edge_index(&self, a: usize, b: usize) -> Option<usize> {
        self.edges
            .iter()
            .position(|&[x, y]| (x == a && y == b) || (x == b && y == a))
    }

    /// Number of edges incident to `vertex`.
    pub fn degree(&self, vertex: usize) -> usize {
        self.edges.iter().filter(|e| e.contains(&vertex)).count()
    }

    /// Indices of selected vertices.
    pub fn selected_vertices(&self) -> Vec<usize> {
        flagged(&self.vertex_selected)
    }

    /// Indices of selected edges.
    pub fn selected_edges(&self) -> Vec<usize> {
        flagged(&self.edge_selected)
    }

    /// Indices of selected faces.
    pub fn selected_faces(&self) -> Vec<usize> {
        flagged(&self.face_selected)
    }

    /// Adds vertices to the selection, flushing to edges and faces whose
    /// vertices are all selected.
    pub fn select_vertices(&mut self, vertices: &[usize]) {
        for &v in vertices {
            if let Some(flag) = self.vertex_selected.get_mut(v) {
                *flag = true;
            }
        }
        self.flush_from_vertices();
    }

    /// Adds edges and their vertices to the selection.
    pub fn select_edges(&mut self, edges: &[usize]) {
        for &e in edges {
            if let Some(&[a, b]) = self.edges.get(e) {
                self.edge_selected[e] = true;
                self.vertex_selected[a] = true;
                self.vertex_selected[b] = true;
            }
        }
        self.flush_faces_from_edges();
    }

    /// Adds faces, their edges and their vertices to the selection.
    pub fn select_faces(&mut self, faces: &[usize]) {
        for &f in faces {
            let Some(corners) = self.faces.get(f) else {
                continue;
            };
            self.face_selected[f] = true;
            for i in 0..corners.len() {
                let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
                self.vertex_selected[a] = true;
                if let Some(e) = self.edge_index(a, b) {
                    self.edge_selected[e] = true;
                }
            }
        }
    }

    /// Selects every element.
    pub fn select_all(&mut self) {
        self.vertex_selected.fill(true);
        self.edge_selected.fill(true);
        self.face_selected.fill(true);
    }

    /// Clears every selection flag.
    pub fn deselect_all(&mut self) {
        self.vertex_selected.fill(false);
        self.edge_selected.fill(false);
        self.face_selected.fill(false);
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All edge and face indices are valid
    /// - No duplicate or degenerate edges
    /// - Faces have at least three distinct corners joined by edges
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let count = self.vertex_count();
        for (i, &[a, b]) in self.edges.iter().enumerate() {
            if a >= count || b >= count || a == b {
                return false;
            }
            if self.edge_index(a, b) != Some(i) {
                return false;
            }
        }

        self.faces.iter().all(|corners| {
            let mut sorted = corners.clone();
            sorted.sort_unstable();
            sorted.dedup();
            sorted.len() == corners.len()
                && corners.len() >= 3
                && corners.iter().all(|&v| v < count)
                && (0..corners.len())
                    .all(|i| self.edge_index(corners[i], corners[(i + 1) % corners.len()]).is_some())
        })
    }

    /// Selects edges and faces whose vertices are all selected, and clears
    /// the rest.
    fn flush_from_vertices(&mut self) {
        for (e, &[a, b]) in self.edges.iter().enumerate() {
            self.edge_selected[e] = self.vertex_selected[a] && self.vertex_selected[b];
        }
        for (f, corners) in self.faces.iter().enumerate() {
            self.face_selected[f] = corners.iter().all(|&v| self.vertex_selected[v]);
        }
    }

    /// Selects faces whose edges are all selected.
    fn flush_faces_from_edges(&mut self) {
        for f in 0..self.faces.len() {
            let corners = &self.faces[f];
            let all_edges = (0..corners.len()).all(|i| {
                self.edge_index(corners[i], corners[(i + 1) % corners.len()])
                    .is_some_and(|e| self.edge_selected[e])
            });
            if all_edges {
                self.face_selected[f] = true;
            }
        }
    }

    fn require_editing(&self) -> DeleteResult<()> {
        if self.editing {
            Ok(())
        } else {
            Err(DeleteError::context("mesh is not in edit mode"))
        }
    }

    /// Runs an edit on a copy and keeps it only if the edit succeeds.
    fn transaction(&mut self, edit: impl FnOnce(&mut Self) -> DeleteResult<()>) -> DeleteResult<()> {
        self.require_editing()?;
        let mut working = self.clone();
        edit(&mut working)?;
        *self = working;
        Ok(())
    }
}

impl MeshHost for EditMesh {
    fn is_editable(&self) -> bool {
        self.editing
    }

    fn select_mode(&self) -> SelectMode {
        self.select_mode
    }

    fn set_select_mode(&mut self, mode: SelectMode) -> DeleteResult<()> {
        self.require_editing()?;
        if self.is_empty() {
            return Err(DeleteError::context("mesh has no geometry"));
        }
        self.select_mode = mode;
        self.flush_from_vertices();
        Ok(())
    }

    fn snapshot(&mut self) -> DeleteResult<MeshSnapshot> {
        MeshSnapshot::new(
            self.vertex_selected.clone(),
            self.edges.clone(),
            self.edge_selected.clone(),
            self.faces.clone(),
            self.face_selected.clone(),
        )
    }

    fn can_dissolve_vertices(&self) -> bool {
        self.editing && self.vertex_selected.contains(&true)
    }

    fn dissolve_vertices(&mut self) -> DeleteResult<()> {
        self.transaction(|mesh| mesh.dissolve_selected_vertices())
    }

    fn dissolve_edges(&mut self, use_verts: bool) -> DeleteResult<()> {
        self.transaction(|mesh| mesh.dissolve_selected_edges(use_verts))
    }

    fn delete(&mut self, kind: DeleteType) -> DeleteResult<()> {
        self.transaction(|mesh| {
            mesh.delete_selected(kind);
            Ok(())
        })
    }

    fn deselect_all_vertices(&mut self) -> DeleteResult<()> {
        self.require_editing()?;
        self.deselect_all();
        Ok(())
    }

    fn set_vertex_selected(&mut self, index: usize, selected: bool) -> DeleteResult<()> {
        self.require_editing()?;
        let count = self.vertex_count();
        let flag = self
            .vertex_selected
            .get_mut(index)
            .ok_or(DeleteError::InvalidIndex { index, count })?;
        *flag = selected;
        self.flush_from_vertices();
        debug!(index, selected, "vertex selection changed");
        Ok(())
    }
}

fn flagged(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &on)| on.then_some(i))
        .collect()
}
