//! PDT Mesh
//!
//! Geometry side of the precision drawing command interpreter:
//!
//! - [`EditMesh`] - editable polygon mesh with selection masks and history
//! - [`Scene`] - objects, the 3D cursor and the view basis
//! - [`GeometryDocument`] - the capability traits commands are written against
//!
//! # Architecture
//!
//! Elements live in flat arrays and reference each other by typed index.
//! Faces are vertex loops; every consecutive pair of a loop is also an edge.
//! Topology operations that delete elements compact the arrays and hand back
//! a [`Remap`] so callers can follow their indices.
//!
//! # Example
//!
//! ```rust
//! use pdt_mesh::{EditMesh, GeomSet, FaceIndex};
//!
//! let mut mesh = EditMesh::plane(2.0);
//! let cap = mesh
//!     .extrude_region(&GeomSet { faces: vec![FaceIndex(0)], ..GeomSet::default() })
//!     .unwrap();
//!
//! assert_eq!(cap.faces.len(), 1);
//! assert_eq!(mesh.face_count(), 5);
//! ```

mod document;
mod error;
mod geom;
mod index;
mod mesh;
mod object;
mod ops;
pub mod percent;
mod primitives;
mod scene;
mod spatial;

pub use document::{
    ActiveObject, ActiveObjectProvider, GeometryDocument, GeometryMutator, PercentPointProvider,
    PercentTarget, SelectionProvider, ViewDirectionProvider,
};
pub use error::{MeshError, MeshResult};
pub use geom::{GeomSet, Remap};
pub use index::{EdgeIndex, FaceIndex, ObjectIndex, VertexIndex, INVALID_INDEX};
pub use mesh::{Edge, EditMesh, Face};
pub use object::{ObjectMode, SceneObject};
pub use scene::{Scene, ViewBasis};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::document::{
        ActiveObjectProvider, GeometryDocument, GeometryMutator, PercentPointProvider,
        SelectionProvider, ViewDirectionProvider,
    };
    pub use crate::{EditMesh, GeomSet, ObjectMode, Scene, SceneObject};
}
