//! # Edit Mesh Topology
//!
//! Dissolve and delete primitives of [`EditMesh`].
//!
//! These run on a working copy (see `EditMesh::transaction`), so an error
//! half way through leaves the session mesh untouched.

use super::EditMesh;
use crate::error::{DeleteError, DeleteResult};
use crate::selection::DeleteType;
use tracing::debug;

/// Which elements survive a compaction.
struct Keep {
    vertices: Vec<bool>,
    edges: Vec<bool>,
    faces: Vec<bool>,
}

impl EditMesh {
    // =========================================================================
    // DELETE
    // =========================================================================

    /// Hard deletes the selected elements of the given kind.
    pub(super) fn delete_selected(&mut self, kind: DeleteType) {
        let mut keep = self.keep_all();

        match kind {
            DeleteType::Vertex => {
                for (v, &selected) in self.vertex_selected.iter().enumerate() {
                    keep.vertices[v] = !selected;
                }
            }
            DeleteType::Edge | DeleteType::EdgeFace => {
                let removed = self.edge_selected.clone();
                for (e, &selected) in removed.iter().enumerate() {
                    keep.edges[e] = !selected;
                }
                for (f, corners) in self.faces.iter().enumerate() {
                    keep.faces[f] = !self.face_edges(corners).any(|e| removed[e]);
                }
                if kind == DeleteType::Edge {
                    self.drop_orphaned_vertices(&mut keep, |v, mesh| {
                        mesh.edges
                            .iter()
                            .enumerate()
                            .any(|(e, edge)| removed[e] && edge.contains(&v))
                    });
                }
            }
            DeleteType::Face => {
                let removed = self.face_selected.clone();
                for (f, &selected) in removed.iter().enumerate() {
                    keep.faces[f] = !selected;
                }
                let mut used_by_removed = vec![false; self.edges.len()];
                let mut used_by_kept = vec![false; self.edges.len()];
                for (f, corners) in self.faces.iter().enumerate() {
                    let used = if removed[f] {
                        &mut used_by_removed
                    } else {
                        &mut used_by_kept
                    };
                    for e in self.face_edges(corners) {
                        used[e] = true;
                    }
                }
                for e in 0..self.edges.len() {
                    keep.edges[e] = !(used_by_removed[e] && !used_by_kept[e]);
                }
                self.drop_orphaned_vertices(&mut keep, |v, mesh| {
                    mesh.faces
                        .iter()
                        .enumerate()
                        .any(|(f, corners)| removed[f] && corners.contains(&v))
                });
            }
        }

        debug!(%kind, "deleting selection");
        self.compact(keep);
    }

    /// Marks vertices for removal that lose all their edges and were part of
    /// the removed geometry.
    fn drop_orphaned_vertices(&self, keep: &mut Keep, touched: impl Fn(usize, &Self) -> bool) {
        let mut has_edge = vec![false; self.vertex_count()];
        for (e, &[a, b]) in self.edges.iter().enumerate() {
            if keep.edges[e] {
                has_edge[a] = true;
                has_edge[b] = true;
            }
        }
        for v in 0..self.vertex_count() {
            if !has_edge[v] && touched(v, self) {
                keep.vertices[v] = false;
            }
        }
    }

    // =========================================================================
    // DISSOLVE VERTICES
    // =========================================================================

    /// Dissolves every selected vertex, highest index first so that removals
    /// never shift a vertex still waiting to be processed.
    ///
    /// With the whole mesh selected there is no surrounding geometry to merge
    /// into and nothing changes.
    pub(super) fn dissolve_selected_vertices(&mut self) -> DeleteResult<()> {
        let selected = self.selected_vertices();
        if selected.len() == self.vertex_count() {
            debug!("whole mesh selected, nothing to dissolve into");
            return Ok(());
        }

        for &v in selected.iter().rev() {
            if !self.dissolve_vertex(v)? {
                debug!(vertex = v, "nothing to dissolve into, left in place");
            }
        }
        self.flush_from_vertices();
        Ok(())
    }

    /// Dissolves one vertex. Returns whether it was removed.
    fn dissolve_vertex(&mut self, vertex: usize) -> DeleteResult<bool> {
        match self.degree(vertex) {
            0 | 1 => Ok(false),
            2 => {
                self.join_edges_at(vertex);
                Ok(true)
            }
            _ => {
                self.merge_fan_at(vertex)?;
                Ok(true)
            }
        }
    }

    /// Replaces the two edges of a pass-through vertex with one edge.
    fn join_edges_at(&mut self, vertex: usize) {
        let neighbours: Vec<usize> = self
            .edges
            .iter()
            .filter(|e| e.contains(&vertex))
            .map(|&[a, b]| if a == vertex { b } else { a })
            .collect();
        let (a, b) = (neighbours[0], neighbours[1]);

        for corners in &mut self.faces {
            corners.retain(|&v| v != vertex);
        }
        let bridge = self.add_edge(a, b);

        let mut keep = self.keep_all();
        keep.vertices[vertex] = false;
        for (f, corners) in self.faces.iter().enumerate() {
            keep.faces[f] = corners.len() >= 3;
        }
        debug!(vertex, a, b, bridge, "joined edges");
        self.compact(keep);
    }

    /// Merges the closed fan of faces around an interior vertex into one face.
    fn merge_fan_at(&mut self, vertex: usize) -> DeleteResult<()> {
        let incident: Vec<usize> = (0..self.edges.len())
            .filter(|&e| self.edges[e].contains(&vertex))
            .collect();
        for &e in &incident {
            let [a, b] = self.edges[e];
            if self.faces_with_edge(a, b).len() != 2 {
                return Err(DeleteError::boundary_region());
            }
        }

        let fan: Vec<usize> = (0..self.faces.len())
            .filter(|&f| self.faces[f].contains(&vertex))
            .collect();
        if fan.len() != incident.len() {
            return Err(DeleteError::boundary_region());
        }

        // Each face contributes the path around it that skips `vertex`.
        let mut paths: Vec<Vec<usize>> = fan
            .iter()
            .map(|&f| {
                let corners = &self.faces[f];
                let start = corners.iter().position(|&v| v == vertex).unwrap_or(0);
                corners[start..]
                    .iter()
                    .chain(&corners[..start])
                    .skip(1)
                    .copied()
                    .collect()
            })
            .collect();

        let mut merged = paths.swap_remove(0);
        while !paths.is_empty() {
            let tail = merged.last().copied();
            let next = paths
                .iter()
                .position(|path| path.first().copied() == tail)
                .ok_or_else(DeleteError::boundary_region)?;
            let path = paths.swap_remove(next);
            merged.extend_from_slice(&path[1..]);
        }
        if merged.len() < 2 || merged.first() != merged.last() {
            return Err(DeleteError::boundary_region());
        }
        merged.pop();
        if !all_distinct(&merged) || merged.len() < 3 {
            return Err(DeleteError::boundary_region());
        }

        let mut keep = self.keep_all();
        keep.vertices[vertex] = false;
        for &f in &fan {
            keep.faces[f] = false;
        }
        for &e in &incident {
            keep.edges[e] = false;
        }
        debug!(vertex, faces = fan.len(), corners = merged.len(), "merged face fan");
        self.faces.push(merged);
        self.face_selected.push(false);
        keep.faces.push(true);
        self.compact(keep);
        Ok(())
    }

    // =========================================================================
    // DISSOLVE EDGES
    // =========================================================================

    /// Dissolves every selected edge by merging the two faces it separates.
    ///
    /// Endpoints stay selected. With `use_verts`, endpoints left with two
    /// edges are dissolved as well.
    pub(super) fn dissolve_selected_edges(&mut self, use_verts: bool) -> DeleteResult<()> {
        let pairs: Vec<[usize; 2]> = self
            .selected_edges()
            .into_iter()
            .map(|e| self.edges[e])
            .collect();

        for &[a, b] in &pairs {
            self.merge_faces_across(a, b)?;
        }

        if use_verts {
            let mut endpoints: Vec<usize> = pairs.iter().flatten().copied().collect();
            endpoints.sort_unstable();
            endpoints.dedup();
            for &v in endpoints.iter().rev() {
                if self.degree(v) == 2 {
                    self.join_edges_at(v);
                }
            }
        }
        Ok(())
    }

    /// Removes the edge `a`-`b` and joins its two faces into one.
    fn merge_faces_across(&mut self, a: usize, b: usize) -> DeleteResult<()> {
        let edge = self.edge_index(a, b).ok_or_else(DeleteError::boundary_region)?;
        let sides = self.faces_with_edge(a, b);
        let &[first, second] = sides.as_slice() else {
            return Err(DeleteError::boundary_region());
        };

        // `first` walks x -> y across the shared edge; start it at y so it
        // ends at x, then continue along `second` from x back to y.
        let left = &self.faces[first];
        let (x, y) = if follows(left, a, b) { (a, b) } else { (b, a) };
        let left = rotate_to(left, y);
        let mut right = self.faces[second].clone();
        if follows(&right, x, y) {
            right.reverse();
        }
        let right = rotate_to(&right, x);

        let mut merged = left;
        merged.extend_from_slice(&right[1..right.len() - 1]);
        if !all_distinct(&merged) {
            return Err(DeleteError::boundary_region());
        }

        self.faces[first] = merged;
        self.face_selected[first] = false;
        let mut keep = self.keep_all();
        keep.faces[second] = false;
        keep.edges[edge] = false;
        debug!(a, b, "merged faces across edge");
        self.compact(keep);
        Ok(())
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Faces using `a`-`b` as one of their sides.
    fn faces_with_edge(&self, a: usize, b: usize) -> Vec<usize> {
        (0..self.faces.len())
            .filter(|&f| follows(&self.faces[f], a, b) || follows(&self.faces[f], b, a))
            .collect()
    }

    /// Edge indices along a face loop.
    fn face_edges<'a>(&'a self, corners: &'a [usize]) -> impl Iterator<Item = usize> + 'a {
        (0..corners.len())
            .filter_map(move |i| self.edge_index(corners[i], corners[(i + 1) % corners.len()]))
    }

    fn keep_all(&self) -> Keep {
        Keep {
            vertices: vec![true; self.vertex_count()],
            edges: vec![true; self.edges.len()],
            faces: vec![true; self.faces.len()],
        }
    }

    /// Drops everything not kept, plus edges and faces that lost a vertex,
    /// and renumbers survivors in their original order.
    fn compact(&mut self, keep: Keep) {
        let mut remap = vec![None; self.vertex_count()];
        let mut next = 0;
        for (v, &kept) in keep.vertices.iter().enumerate() {
            if kept {
                remap[v] = Some(next);
                next += 1;
            }
        }

        let positions = std::mem::take(&mut self.positions);
        let vertex_selected = std::mem::take(&mut self.vertex_selected);
        for (v, (position, selected)) in positions.into_iter().zip(vertex_selected).enumerate() {
            if keep.vertices[v] {
                self.positions.push(position);
                self.vertex_selected.push(selected);
            }
        }

        let edges = std::mem::take(&mut self.edges);
        let edge_selected = std::mem::take(&mut self.edge_selected);
        for (e, ([a, b], selected)) in edges.into_iter().zip(edge_selected).enumerate() {
            if let (true, Some(a), Some(b)) = (keep.edges[e], remap[a], remap[b]) {
                self.edges.push([a, b]);
                self.edge_selected.push(selected);
            }
        }

        let faces = std::mem::take(&mut self.faces);
        let face_selected = std::mem::take(&mut self.face_selected);
        for (f, (corners, selected)) in faces.into_iter().zip(face_selected).enumerate() {
            if !keep.faces[f] {
                continue;
            }
            let renumbered: Option<Vec<usize>> = corners.iter().map(|&v| remap[v]).collect();
            if let Some(renumbered) = renumbered {
                self.faces.push(renumbered);
                self.face_selected.push(selected);
            }
        }
    }
}

/// True when `b` directly follows `a` around the loop.
fn follows(corners: &[usize], a: usize, b: usize) -> bool {
    (0..corners.len()).any(|i| corners[i] == a && corners[(i + 1) % corners.len()] == b)
}

/// The loop rotated to start at `start`.
fn rotate_to(corners: &[usize], start: usize) -> Vec<usize> {
    let offset = corners.iter().position(|&v| v == start).unwrap_or(0);
    corners[offset..].iter().chain(&corners[..offset]).copied().collect()
}

pub(super) fn all_distinct(corners: &[usize]) -> bool {
    let mut sorted = corners.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).all(|w| w[0] != w[1])
}
