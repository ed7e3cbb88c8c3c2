//! Scene objects

use std::fmt;

use lin_alg::f64::Vec3;

use crate::index::VertexIndex;
use crate::mesh::EditMesh;

/// Interaction mode of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectMode {
    /// Whole-object transforms
    #[default]
    Object,
    /// Mesh editing
    Edit,
}

impl ObjectMode {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectMode::Object => "OBJECT",
            ObjectMode::Edit => "EDIT",
        }
    }
}

impl fmt::Display for ObjectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named mesh object placed in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    /// World-space origin; mesh positions are relative to it
    pub location: Vec3,
    pub mode: ObjectMode,
    /// Object-level selection flag
    pub selected: bool,
    pub mesh: EditMesh,
}

impl SceneObject {
    /// Create an empty object at the world origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: Vec3::new_zero(),
            mode: ObjectMode::Object,
            selected: false,
            mesh: EditMesh::new(),
        }
    }

    /// Builder: place the object
    pub fn with_location(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    /// Builder: use `mesh` as the object's geometry
    pub fn with_mesh(mut self, mesh: EditMesh) -> Self {
        self.mesh = mesh;
        self
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.mode == ObjectMode::Edit
    }

    /// World-space position of a vertex
    pub fn world_position(&self, v: VertexIndex) -> Option<Vec3> {
        self.mesh.position(v).map(|p| p + self.location)
    }
}
