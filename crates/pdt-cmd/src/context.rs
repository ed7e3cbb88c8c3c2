//! Per-command context
//!
//! [`SelectionContext`] is a snapshot of the document state the preconditions
//! and resolvers look at. It is captured once when a command starts and never
//! carried over to the next command.

use lin_alg::f64::Vec3;
use pdt_mesh::{ActiveObject, EdgeIndex, FaceIndex, GeomSet, GeometryDocument, ObjectIndex, VertexIndex};
use pdt_settings::SceneSettings;

use crate::args::ParsedCommand;
use crate::error::CmdResult;
use crate::resolve;

/// Read-only view of the selection at the start of a command
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    pub active: Option<ActiveObject>,
    pub verts: Vec<VertexIndex>,
    pub edges: Vec<EdgeIndex>,
    pub faces: Vec<FaceIndex>,
    /// Oldest first; the last entry is the active vertex
    pub history: Vec<VertexIndex>,
    pub objects: Vec<ObjectIndex>,
}

impl SelectionContext {
    /// Snapshot the document
    pub fn capture(doc: &dyn GeometryDocument) -> Self {
        Self {
            active: doc.active_object(),
            verts: doc.selected_vertices(),
            edges: doc.selected_edges(),
            faces: doc.selected_faces(),
            history: doc.selection_history(),
            objects: doc.selected_objects(),
        }
    }

    /// Whether the active object is being edited
    pub fn is_editing(&self) -> bool {
        self.active.map_or(false, |a| a.is_editing())
    }

    /// World origin of the active object, or zero without one
    pub fn origin(&self) -> Vec3 {
        self.active.map_or_else(Vec3::new_zero, |a| a.origin)
    }

    pub fn active_vertex(&self) -> Option<VertexIndex> {
        self.history.last().copied()
    }

    /// The selected mesh elements as one region
    pub fn region(&self) -> GeomSet {
        GeomSet {
            verts: self.verts.clone(),
            edges: self.edges.clone(),
            faces: self.faces.clone(),
        }
    }
}

/// Everything a command handler works with
pub struct CommandContext<'a> {
    /// The document being edited
    pub doc: &'a mut dyn GeometryDocument,
    /// Session settings; resolvers and handlers may update them
    pub settings: &'a mut SceneSettings,
    pub selection: SelectionContext,
    /// Whether to suppress output messages
    pub quiet: bool,
}

impl<'a> CommandContext<'a> {
    /// Create a context, capturing the current selection
    pub fn new(doc: &'a mut dyn GeometryDocument, settings: &'a mut SceneSettings) -> Self {
        let selection = SelectionContext::capture(&*doc);
        Self {
            doc,
            settings,
            selection,
            quiet: false,
        }
    }

    /// Set the quiet flag
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Resolve the command's arguments to a vector
    pub fn resolve(&mut self, cmd: &ParsedCommand) -> CmdResult<Vec3> {
        resolve::resolve(cmd, &self.selection, &*self.doc, self.settings)
    }

    /// Print a message (unless quiet mode is enabled)
    pub fn print(&self, msg: &str) {
        if !self.quiet {
            log::info!("{}", msg);
        }
    }
}
