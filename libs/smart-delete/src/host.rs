//! # Mesh Host
//!
//! Capability surface the engine consumes from a mesh editing host.
//!
//! The host owns the mesh, its selection flags and the editing session.
//! The engine only asks questions through [`MeshHost::snapshot`] and issues
//! the primitive mutations below, one at a time.
//!
//! ## Contract
//!
//! - `snapshot` is a barrier: it reflects every mutation issued before it.
//! - Removing elements compacts indices while keeping the relative order of
//!   the survivors.
//! - A failed mutation reports [`DeleteError::TopologyInvalid`] when the
//!   selection shape is the problem, [`DeleteError::ContextInvalid`] when the
//!   session is not editable, and [`DeleteError::Host`] otherwise.
//!
//! [`DeleteError::TopologyInvalid`]: crate::error::DeleteError::TopologyInvalid
//! [`DeleteError::ContextInvalid`]: crate::error::DeleteError::ContextInvalid
//! [`DeleteError::Host`]: crate::error::DeleteError::Host

use crate::error::DeleteResult;
use crate::selection::{DeleteType, SelectMode};
use crate::snapshot::MeshSnapshot;

/// Primitive queries and mutations of a mesh editing session.
pub trait MeshHost {
    /// True when an active mesh is being edited.
    fn is_editable(&self) -> bool;

    /// Current selection mode flags.
    fn select_mode(&self) -> SelectMode;

    /// Changes the selection mode.
    fn set_select_mode(&mut self, mode: SelectMode) -> DeleteResult<()>;

    /// Commits pending edits and returns the resulting mesh state.
    fn snapshot(&mut self) -> DeleteResult<MeshSnapshot>;

    /// True when dissolving the selected vertices is a valid request.
    fn can_dissolve_vertices(&self) -> bool;

    /// Dissolves the selected vertices, merging the geometry around them.
    fn dissolve_vertices(&mut self) -> DeleteResult<()>;

    /// Dissolves the selected edges, merging the faces on either side.
    ///
    /// With `use_verts`, vertices left with only two edges are dissolved too.
    fn dissolve_edges(&mut self, use_verts: bool) -> DeleteResult<()>;

    /// Hard deletes the selection.
    fn delete(&mut self, kind: DeleteType) -> DeleteResult<()>;

    /// Clears the selection flag of every vertex.
    fn deselect_all_vertices(&mut self) -> DeleteResult<()>;

    /// Sets the selection flag of one vertex.
    fn set_vertex_selected(&mut self, index: usize, selected: bool) -> DeleteResult<()>;
}
