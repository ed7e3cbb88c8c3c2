//! Geometry sets and index remapping

use crate::index::{EdgeIndex, FaceIndex, VertexIndex};

/// A set of mesh elements, used for region operations and selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeomSet {
    pub verts: Vec<VertexIndex>,
    pub edges: Vec<EdgeIndex>,
    pub faces: Vec<FaceIndex>,
}

impl GeomSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single vertex
    pub fn vertex(v: VertexIndex) -> Self {
        Self {
            verts: vec![v],
            ..Self::default()
        }
    }

    /// A set holding only vertices
    pub fn vertices(verts: impl IntoIterator<Item = VertexIndex>) -> Self {
        Self {
            verts: verts.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether the set holds no elements
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }

    /// Element counts as `(verts, edges, faces)`
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.verts.len(), self.edges.len(), self.faces.len())
    }
}

/// Old-to-new index tables produced when elements are removed from a mesh
///
/// `None` marks an element that no longer exists.
#[derive(Debug, Clone, Default)]
pub struct Remap {
    pub verts: Vec<Option<VertexIndex>>,
    pub edges: Vec<Option<EdgeIndex>>,
    pub faces: Vec<Option<FaceIndex>>,
}

impl Remap {
    pub fn vertex(&self, v: VertexIndex) -> Option<VertexIndex> {
        self.verts.get(v.as_usize()).copied().flatten()
    }

    pub fn edge(&self, e: EdgeIndex) -> Option<EdgeIndex> {
        self.edges.get(e.as_usize()).copied().flatten()
    }

    pub fn face(&self, f: FaceIndex) -> Option<FaceIndex> {
        self.faces.get(f.as_usize()).copied().flatten()
    }

    /// Translate a set through the tables, dropping removed elements
    pub fn apply(&self, geom: &GeomSet) -> GeomSet {
        GeomSet {
            verts: geom.verts.iter().filter_map(|&v| self.vertex(v)).collect(),
            edges: geom.edges.iter().filter_map(|&e| self.edge(e)).collect(),
            faces: geom.faces.iter().filter_map(|&f| self.face(f)).collect(),
        }
    }
}
