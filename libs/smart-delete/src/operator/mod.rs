//! # Smart Delete Operator
//!
//! The contextual delete engine.
//!
//! ## Decision Tree
//!
//! ```text
//! select mode
//!  ├─ vertex ──── dissolve verts ─→ snapshot ─→ leftovers? ─→ delete VERT
//!  ├─ edge ────── snapshot ─→ edge_strategy
//!  │               ├─ whole mesh / island / spurs ─→ delete EDGE
//!  │               ├─ small loop ─────────────────→ delete EDGE_FACE
//!  │               └─ dissolve edges ─┬─ boundary error ─→ delete EDGE
//!  │                                  └─ ok ─→ straighten pass, restore selection
//!  ├─ face ────── delete FACE
//!  └─ other ───── dissolve verts
//! ```
//!
//! Every connectivity question is answered from a fresh
//! [`MeshSnapshot`](crate::snapshot::MeshSnapshot) taken after the last
//! mutation; indices recorded before a mutation are remapped or dropped
//! before they are used again.


use crate::error::DeleteResult;
use crate::host::MeshHost;
use crate::plan::{
    edge_strategy, restore_selection, straighten_candidates, vertex_followup, Branch,
    VertexFollowup,
};
use crate::selection::{DeleteType, SelectMode};
use config::constants::{SmartDeleteConfig, BOUNDARY_REGION_REPORT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Completion status of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The command ran
    Finished,
    /// The command was unavailable and did nothing
    Cancelled,
}

/// Severity of a user-facing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportLevel {
    /// The command ran but part of the result is approximate
    Warning,
    /// The requested change could not be made
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Severity
    pub level: ReportLevel,
    /// Message text
    pub message: String,
}

/// One host mutation issued by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Dissolve selected vertices
    DissolveVertices,
    /// Dissolve selected edges
    DissolveEdges { use_verts: bool },
    /// Hard delete
    Delete(DeleteType),
    /// Selection mode change
    SetSelectMode(SelectMode),
    /// All vertices deselected
    DeselectAllVertices,
    /// Vertices added to the selection
    SelectVertices(Vec<usize>),
}

/// Record of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// Completion status
    pub status: Status,
    /// Branch taken, `None` when cancelled
    pub branch: Option<Branch>,
    /// Host mutations in the order they were issued, including any the
    /// host rejected
    pub steps: Vec<Step>,
    /// Messages for the user
    pub reports: Vec<Report>,
}

impl Execution {
    fn cancelled() -> Self {
        Self {
            status: Status::Cancelled,
            branch: None,
            steps: Vec::new(),
            reports: Vec::new(),
        }
    }

    /// True if a dissolve of any kind was attempted.
    pub fn dissolved(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, Step::DissolveVertices | Step::DissolveEdges { .. }))
    }

    /// Hard deletes issued, in order.
    pub fn deletes(&self) -> Vec<DeleteType> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                Step::Delete(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// True if an error was reported to the user.
    pub fn has_error(&self) -> bool {
        self.reports.iter().any(|r| r.level == ReportLevel::Error)
    }
}

/// The smart delete command.
///
/// # Example
///
/// ```rust
/// use smart_delete::{EditMesh, MeshHost, SelectMode, SmartDelete, Status};
///
/// let mut mesh = EditMesh::polygon(4);
/// mesh.set_select_mode(SelectMode::EDGE).unwrap();
/// mesh.select_all();
///
/// let execution = SmartDelete::default().execute(&mut mesh).unwrap();
/// assert_eq!(execution.status, Status::Finished);
/// assert!(mesh.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmartDelete {
    config: SmartDeleteConfig,
}

impl SmartDelete {
    /// Creates the command with the given settings.
    pub fn new(config: SmartDeleteConfig) -> Self {
        Self { config }
    }

    /// Returns the settings.
    pub fn config(&self) -> &SmartDeleteConfig {
        &self.config
    }

    /// True when the command can run against `host`.
    pub fn poll<H: MeshHost + ?Sized>(host: &H) -> bool {
        host.is_editable()
    }

    /// Runs the command.
    ///
    /// Returns the invocation record, or the first unrecoverable host error.
    /// Boundary failures are recovered or reported and never returned.
    pub fn execute<H: MeshHost + ?Sized>(&self, host: &mut H) -> DeleteResult<Execution> {
        if !Self::poll(host) {
            debug!("no editable mesh, smart delete cancelled");
            return Ok(Execution::cancelled());
        }

        let mode = host.select_mode();
        let branch = Branch::from_mode(mode);
        info!(%mode, ?branch, "smart delete");

        let mut invocation = Invocation {
            host,
            config: self.config,
            steps: Vec::new(),
            reports: Vec::new(),
        };

        match branch {
            Branch::Vertex => invocation.vertex_branch(),
            Branch::Edge => {
                invocation.edge_branch()?;
                invocation.restore_edge_mode();
            }
            Branch::Face => invocation.delete(DeleteType::Face)?,
            Branch::Default => invocation.dissolve_vertices()?,
        }

        Ok(Execution {
            status: Status::Finished,
            branch: Some(branch),
            steps: invocation.steps,
            reports: invocation.reports,
        })
    }
}

/// State of one running invocation.
struct Invocation<'a, H: MeshHost + ?Sized> {
    host: &'a mut H,
    config: SmartDeleteConfig,
    steps: Vec<Step>,
    reports: Vec<Report>,
}

impl<H: MeshHost + ?Sized> Invocation<'_, H> {
    // =========================================================================
    // VERTEX MODE
    // =========================================================================

    fn vertex_branch(&mut self) {
        if !self.host.can_dissolve_vertices() {
            debug!("dissolve vertices not applicable, skipping");
            return;
        }

        if let Err(err) = self.dissolve_and_clear_leftovers() {
            warn!(%err, boundary = err.is_boundary_region(), "vertex dissolve failed");
            self.report(ReportLevel::Error, BOUNDARY_REGION_REPORT.to_string());
        }
    }

    fn dissolve_and_clear_leftovers(&mut self) -> DeleteResult<()> {
        self.dissolve_vertices()?;

        let snapshot = self.host.snapshot()?;
        let Some(followup) = vertex_followup(&snapshot) else {
            return Ok(());
        };
        debug!(?followup, "deleting vertices left by dissolve");

        if followup == VertexFollowup::IsolatedPoint {
            let remaining = snapshot.selected_vertices();
            self.select_vertices(&remaining)?;
        }
        self.delete(DeleteType::Vertex)
    }

    // =========================================================================
    // EDGE MODE
    // =========================================================================

    fn edge_branch(&mut self) -> DeleteResult<()> {
        let snapshot = self.host.snapshot()?;
        let strategy = edge_strategy(&snapshot, &self.config);
        info!(
            ?strategy,
            selected = snapshot.selected_edges().len(),
            total = snapshot.edge_count(),
            "edge delete strategy"
        );

        if let Some(kind) = strategy.delete_type() {
            return self.delete(kind);
        }

        match self.dissolve_edges() {
            Ok(()) => self.straighten_and_restore(),
            Err(err) if err.is_boundary_region() => {
                warn!(%err, "edge dissolve hit a boundary, deleting edges instead");
                self.delete(DeleteType::Edge)
            }
            Err(err) => Err(err),
        }
    }

    /// Dissolves pass-through vertices left by an edge dissolve and puts the
    /// dissolve's vertex selection back.
    fn straighten_and_restore(&mut self) -> DeleteResult<()> {
        self.set_select_mode(SelectMode::VERTEX)?;

        let dissolved = self.host.snapshot()?;
        let recorded = dissolved.selected_vertices();
        let candidates = straighten_candidates(&dissolved, &recorded);
        debug!(?recorded, ?candidates, "straightening pass");

        self.deselect_all_vertices()?;
        if !candidates.is_empty() {
            self.select_vertices(&candidates)?;
            self.dissolve_vertices()?;
        }

        let straightened = self.host.snapshot()?;
        let restored = restore_selection(
            &recorded,
            &candidates,
            dissolved.vertex_count(),
            straightened.vertex_count(),
        );
        if !restored.exact {
            warn!(
                before = dissolved.vertex_count(),
                after = straightened.vertex_count(),
                "could not track removed vertices, restoring in-range indices only"
            );
            self.report(
                ReportLevel::Warning,
                "Selection could not be fully restored".to_string(),
            );
        }

        self.deselect_all_vertices()?;
        for &index in &restored.indices {
            straightened.check_vertex(index)?;
        }
        self.select_vertices(&restored.indices)
    }

    /// Puts the session back in edge mode. Failures are ignored: the mesh may
    /// have been emptied by the delete.
    fn restore_edge_mode(&mut self) {
        if !self.host.is_editable() {
            debug!("session left edit mode, not restoring edge mode");
            return;
        }
        if let Err(err) = self.set_select_mode(SelectMode::EDGE) {
            debug!(%err, "edge mode not restored");
        }
    }

    // =========================================================================
    // HOST STEPS
    // =========================================================================

    fn dissolve_vertices(&mut self) -> DeleteResult<()> {
        self.steps.push(Step::DissolveVertices);
        self.host.dissolve_vertices()
    }

    fn dissolve_edges(&mut self) -> DeleteResult<()> {
        let use_verts = self.config.use_verts;
        self.steps.push(Step::DissolveEdges { use_verts });
        self.host.dissolve_edges(use_verts)
    }

    fn delete(&mut self, kind: DeleteType) -> DeleteResult<()> {
        self.steps.push(Step::Delete(kind));
        self.host.delete(kind)
    }

    fn set_select_mode(&mut self, mode: SelectMode) -> DeleteResult<()> {
        self.steps.push(Step::SetSelectMode(mode));
        self.host.set_select_mode(mode)
    }

    fn deselect_all_vertices(&mut self) -> DeleteResult<()> {
        self.steps.push(Step::DeselectAllVertices);
        self.host.deselect_all_vertices()
    }

    fn select_vertices(&mut self, indices: &[usize]) -> DeleteResult<()> {
        self.steps.push(Step::SelectVertices(indices.to_vec()));
        for &index in indices {
            self.host.set_vertex_selected(index, true)?;
        }
        Ok(())
    }

    fn report(&mut self, level: ReportLevel, message: String) {
        self.reports.push(Report { level, message });
    }
}
