//! Error types for mesh and scene operations

use thiserror::Error;

/// Result type for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur when editing a mesh or scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Vertex index is out of bounds
    #[error("Vertex index {0} is out of bounds (count: {1})")]
    VertexOutOfBounds(u32, usize),

    /// Edge index is out of bounds
    #[error("Edge index {0} is out of bounds (count: {1})")]
    EdgeOutOfBounds(u32, usize),

    /// Face index is out of bounds
    #[error("Face index {0} is out of bounds (count: {1})")]
    FaceOutOfBounds(u32, usize),

    /// Object index is out of bounds
    #[error("Object index {0} is out of bounds (count: {1})")]
    ObjectOutOfBounds(u32, usize),

    /// Edge connects a vertex to itself
    #[error("Invalid edge: vertex {0} to vertex {1}")]
    InvalidEdge(u32, u32),

    /// Edge already exists
    #[error("Vertices {0} and {1} are already connected")]
    DuplicateEdge(u32, u32),

    /// Face has fewer than three distinct vertices
    #[error("Face needs at least 3 distinct vertices, got {0}")]
    DegenerateFace(usize),

    /// No active object in the scene
    #[error("No active object")]
    NoActiveObject,

    /// The active object is not in edit mode
    #[error("Object '{0}' is not in edit mode")]
    NotInEditMode(String),
}

impl MeshError {
    pub(crate) fn vertex_out_of_bounds(index: u32, count: usize) -> Self {
        MeshError::VertexOutOfBounds(index, count)
    }
}
