//! # Smart Delete
//!
//! Context-sensitive delete for polygon mesh editing.
//!
//! One command replaces the generic "delete" of a mesh editor. It reads the
//! active selection mode and the connectivity of the selection, then picks a
//! dissolve or hard delete so the result stays free of holes, floating
//! vertices and broken faces. When a dissolve is refused at an open boundary
//! it falls back to a plain delete.
//!
//! ## Architecture
//!
//! ```text
//! SmartDelete ──mutations──→ MeshHost (EditMesh or an editor)
//!      ↑                        │
//!      │                     snapshot
//!      │                        ↓
//!      └── branch / strategy ── plan ←── MeshSnapshot
//! ```
//!
//! - [`operator`]: the decision tree and its recovery paths
//! - [`plan`]: pure predicates over a snapshot
//! - [`snapshot`]: committed view of the mesh and connectivity queries
//! - [`host`]: the primitives a host editor provides
//! - [`edit_mesh`]: in-memory reference host
//! - [`registration`]: menu and key binding installation
//!
//! ## Example
//!
//! ```rust
//! use smart_delete::{EditMesh, MeshHost, SelectMode, SmartDelete, Step};
//!
//! let mut mesh = EditMesh::grid(2, 2);
//! mesh.select_vertices(&[4]);
//!
//! let execution = SmartDelete::default().execute(&mut mesh).unwrap();
//! assert_eq!(execution.steps, vec![Step::DissolveVertices]);
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.select_mode(), SelectMode::VERTEX);
//! ```

pub mod edit_mesh;
pub mod error;
pub mod host;
pub mod operator;
pub mod plan;
pub mod registration;
pub mod selection;
pub mod snapshot;

pub use edit_mesh::EditMesh;
pub use error::{DeleteError, DeleteResult};
pub use host::MeshHost;
pub use operator::{Execution, Report, ReportLevel, SmartDelete, Status, Step};
pub use plan::{edge_strategy, vertex_followup, Branch, EdgeStrategy, VertexFollowup};
pub use registration::{register, CommandDescriptor, KeyConfigs, Menu, Registration};
pub use selection::{DeleteType, SelectMode};
pub use snapshot::MeshSnapshot;
