//! PDT Command System
//!
//! Precision drawing commands for editing meshes and placing the cursor and
//! pivot from typed input.
//!
//! # Overview
//!
//! A command is two letters followed by numbers:
//!
//! ```text
//! CA1,2,3      put the cursor at (1, 2, 3)
//! GD0,0,0.5    move the selection up by 0.5
//! NI2,45       new vertex 2 units from the active vertex at 45 degrees
//! SP50         split the selected edges, first cut at the midpoint
//! ```
//!
//! The first letter picks the operation, the second how the numbers are read
//! (absolute, delta, distance-angle or percent).
//!
//! # Example
//!
//! ```rust
//! use pdt_cmd::{CommandExecutor, Outcome};
//! use pdt_mesh::{EditMesh, ObjectMode, Scene, SceneObject, VertexIndex};
//! use pdt_settings::SceneSettings;
//!
//! let mut scene = Scene::new();
//! let cube = scene.add_object(SceneObject::new("Cube").with_mesh(EditMesh::cube(2.0)));
//! scene.set_active(cube).unwrap();
//! scene.set_mode(ObjectMode::Edit).unwrap();
//! scene.edit_mesh_mut().unwrap().select_vertex(VertexIndex(0)).unwrap();
//!
//! let mut settings = SceneSettings::new();
//! let mut executor = CommandExecutor::new();
//! let outcome = executor.execute(&mut scene, &mut settings, "VD0,0,-1").unwrap();
//! assert!(matches!(outcome, Outcome::GeometryCreated(_)));
//! assert_eq!(scene.edit_mesh().unwrap().vertex_count(), 9);
//! ```
//!
//! # Architecture
//!
//! - **Parser**: splits the text into opcode, mode and numbers
//! - **Resolver**: turns the numbers into a position or offset
//! - **Guards**: precondition checks on the captured selection
//! - **Dispatcher**: one handler per opcode and mode
//! - **CommandExecutor**: runs the pipeline and reports errors
//! - **Session**: serializes commands from several threads

mod args;
pub mod commands;
mod context;
mod error;
mod executor;
pub mod guards;
mod outcome;
mod parser;
pub mod resolve;
mod session;
mod sink;

// Re-export main types
pub use args::{Mode, Opcode, ParsedCommand};
pub use commands::{dispatch, MERGE_DISTANCE};
pub use context::{CommandContext, SelectionContext};
pub use error::{CmdError, CmdResult, ErrorKind, ParseError};
pub use executor::CommandExecutor;
pub use outcome::Outcome;
pub use parser::{parse_command, NumberPolicy};
pub use session::Session;
pub use sink::{CollectingSink, ErrorSink, LogSink};

// Capabilities the dispatcher needs from a host document
pub use pdt_mesh::{
    ActiveObject, ActiveObjectProvider, GeometryDocument, GeometryMutator, PercentPointProvider,
    PercentTarget, SelectionProvider, ViewDirectionProvider,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::args::{Mode, Opcode, ParsedCommand};
    pub use crate::error::{CmdError, CmdResult};
    pub use crate::executor::CommandExecutor;
    pub use crate::parser::{parse_command, NumberPolicy};
    pub use crate::session::Session;
    pub use pdt_mesh::GeometryDocument;
}
