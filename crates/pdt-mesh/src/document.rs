//! Capability traits the command interpreter works against
//!
//! The interpreter never touches a concrete scene type. It reads state and
//! applies edits through these traits, bundled as [`GeometryDocument`], so any
//! host that implements them can drive it. [`Scene`] is the in-memory
//! implementation.
//!
//! Mesh-level queries and mutations act on the active object's mesh while it
//! is in edit mode and use object-local coordinates.

use lin_alg::f64::Vec3;

use crate::error::{MeshError, MeshResult};
use crate::geom::GeomSet;
use crate::index::{EdgeIndex, FaceIndex, ObjectIndex, VertexIndex};
use crate::object::ObjectMode;
use crate::percent;
use crate::scene::Scene;

/// Snapshot of the active object
#[derive(Debug, Clone, Copy)]
pub struct ActiveObject {
    pub index: ObjectIndex,
    pub mode: ObjectMode,
    /// World-space origin of the object
    pub origin: Vec3,
}

impl ActiveObject {
    #[inline]
    pub fn is_editing(&self) -> bool {
        self.mode == ObjectMode::Edit
    }
}

/// What a percent point will be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PercentTarget {
    Cursor,
    Pivot,
    Vertex,
    Object,
}

/// Active object, object selection and the 3D cursor
pub trait ActiveObjectProvider {
    /// The active object, if any
    fn active_object(&self) -> Option<ActiveObject>;

    /// Objects currently selected, in scene order
    fn selected_objects(&self) -> Vec<ObjectIndex>;

    /// World-space location of an object
    fn object_location(&self, object: ObjectIndex) -> Option<Vec3>;

    /// World-space location of the 3D cursor
    fn cursor_location(&self) -> Vec3;
}

/// Selection state of the mesh being edited
pub trait SelectionProvider {
    fn selected_vertices(&self) -> Vec<VertexIndex>;

    fn selected_edges(&self) -> Vec<EdgeIndex>;

    fn selected_faces(&self) -> Vec<FaceIndex>;

    /// Individually selected vertices, oldest first; the last is the active vertex
    fn selection_history(&self) -> Vec<VertexIndex>;

    /// Object-local position of a vertex
    fn vertex_position(&self, v: VertexIndex) -> Option<Vec3>;
}

/// Polar offsets in the plane of the current view
pub trait ViewDirectionProvider {
    /// World-space offset of `distance` at `angle` degrees, measured from the
    /// view's horizontal towards its vertical
    fn view_polar(&self, distance: f64, angle: f64) -> Vec3;
}

/// Points a percentage of the way between selected references
pub trait PercentPointProvider {
    /// Object-local in edit mode, world-space in object mode; `None` when the
    /// selection does not define two endpoints
    fn percent_point(
        &self,
        object: ObjectIndex,
        flip: bool,
        percent: f64,
        target: PercentTarget,
    ) -> Option<Vec3>;
}

/// Edits applied by commands
pub trait GeometryMutator {
    fn set_cursor_location(&mut self, location: Vec3);

    fn set_object_location(&mut self, object: ObjectIndex, location: Vec3) -> MeshResult<()>;

    /// Add an unselected vertex at an object-local position
    fn new_vertex(&mut self, co: Vec3) -> MeshResult<VertexIndex>;

    fn new_edge(&mut self, a: VertexIndex, b: VertexIndex) -> MeshResult<EdgeIndex>;

    fn set_vertex_position(&mut self, v: VertexIndex, co: Vec3) -> MeshResult<()>;

    fn translate(&mut self, verts: &[VertexIndex], offset: Vec3) -> MeshResult<()>;

    /// Cut each edge `cuts` times, returning the new vertices
    fn subdivide_edges(&mut self, edges: &[EdgeIndex], cuts: usize) -> MeshResult<Vec<VertexIndex>>;

    /// Extrude a region in place, returning the extruded geometry
    fn extrude_region(&mut self, geom: &GeomSet) -> MeshResult<GeomSet>;

    /// Copy a region in place, returning the copy
    fn duplicate_region(&mut self, geom: &GeomSet) -> MeshResult<GeomSet>;

    /// Merge vertices closer than `tolerance`, returning how many were removed
    fn merge_near(&mut self, verts: &[VertexIndex], tolerance: f64) -> MeshResult<usize>;

    /// Replace the selection with exactly `geom`
    fn set_selection(&mut self, geom: &GeomSet) -> MeshResult<()>;

    fn clear_history(&mut self) -> MeshResult<()>;
}

/// Everything the interpreter needs from a host document
///
/// Implemented automatically for any type with all the capabilities, so
/// handlers take `&mut dyn GeometryDocument`.
pub trait GeometryDocument:
    ActiveObjectProvider + SelectionProvider + ViewDirectionProvider + PercentPointProvider + GeometryMutator
{
}

impl<T> GeometryDocument for T where
    T: ActiveObjectProvider
        + SelectionProvider
        + ViewDirectionProvider
        + PercentPointProvider
        + GeometryMutator
        + ?Sized
{
}

// =============================================================================
// Scene implementation
// =============================================================================

impl ActiveObjectProvider for Scene {
    fn active_object(&self) -> Option<ActiveObject> {
        let index = self.active_index()?;
        let object = self.object(index)?;
        Some(ActiveObject {
            index,
            mode: object.mode,
            origin: object.location,
        })
    }

    fn selected_objects(&self) -> Vec<ObjectIndex> {
        Scene::selected_objects(self)
    }

    fn object_location(&self, object: ObjectIndex) -> Option<Vec3> {
        self.object(object).map(|o| o.location)
    }

    fn cursor_location(&self) -> Vec3 {
        self.cursor()
    }
}

impl SelectionProvider for Scene {
    fn selected_vertices(&self) -> Vec<VertexIndex> {
        self.edit_mesh()
            .map(|m| m.selected_vertices())
            .unwrap_or_default()
    }

    fn selected_edges(&self) -> Vec<EdgeIndex> {
        self.edit_mesh()
            .map(|m| m.selected_edges())
            .unwrap_or_default()
    }

    fn selected_faces(&self) -> Vec<FaceIndex> {
        self.edit_mesh()
            .map(|m| m.selected_faces())
            .unwrap_or_default()
    }

    fn selection_history(&self) -> Vec<VertexIndex> {
        self.edit_mesh()
            .map(|m| m.history().to_vec())
            .unwrap_or_default()
    }

    fn vertex_position(&self, v: VertexIndex) -> Option<Vec3> {
        self.edit_mesh().ok()?.position(v)
    }
}

impl ViewDirectionProvider for Scene {
    fn view_polar(&self, distance: f64, angle: f64) -> Vec3 {
        self.view().polar(distance, angle)
    }
}

impl PercentPointProvider for Scene {
    fn percent_point(
        &self,
        object: ObjectIndex,
        flip: bool,
        percent: f64,
        target: PercentTarget,
    ) -> Option<Vec3> {
        let point = percent::percent_point(self, object, flip, percent);
        log::debug!("Percent point {}% for {:?}: {:?}", percent, target, point);
        point
    }
}

impl GeometryMutator for Scene {
    fn set_cursor_location(&mut self, location: Vec3) {
        self.set_cursor(location);
    }

    fn set_object_location(&mut self, object: ObjectIndex, location: Vec3) -> MeshResult<()> {
        let count = self.object_count();
        let obj = self
            .object_mut(object)
            .ok_or(MeshError::ObjectOutOfBounds(object.0, count))?;
        obj.location = location;
        Ok(())
    }

    fn new_vertex(&mut self, co: Vec3) -> MeshResult<VertexIndex> {
        Ok(self.edit_mesh_mut()?.add_vertex(co))
    }

    fn new_edge(&mut self, a: VertexIndex, b: VertexIndex) -> MeshResult<EdgeIndex> {
        self.edit_mesh_mut()?.add_edge(a, b)
    }

    fn set_vertex_position(&mut self, v: VertexIndex, co: Vec3) -> MeshResult<()> {
        self.edit_mesh_mut()?.set_position(v, co)
    }

    fn translate(&mut self, verts: &[VertexIndex], offset: Vec3) -> MeshResult<()> {
        self.edit_mesh_mut()?.translate(verts, offset)
    }

    fn subdivide_edges(&mut self, edges: &[EdgeIndex], cuts: usize) -> MeshResult<Vec<VertexIndex>> {
        self.edit_mesh_mut()?.subdivide_edges(edges, cuts)
    }

    fn extrude_region(&mut self, geom: &GeomSet) -> MeshResult<GeomSet> {
        self.edit_mesh_mut()?.extrude_region(geom)
    }

    fn duplicate_region(&mut self, geom: &GeomSet) -> MeshResult<GeomSet> {
        self.edit_mesh_mut()?.duplicate_region(geom)
    }

    fn merge_near(&mut self, verts: &[VertexIndex], tolerance: f64) -> MeshResult<usize> {
        self.edit_mesh_mut()?.merge_by_distance(verts, tolerance)
    }

    fn set_selection(&mut self, geom: &GeomSet) -> MeshResult<()> {
        self.edit_mesh_mut()?.set_selection(geom)
    }

    fn clear_history(&mut self) -> MeshResult<()> {
        self.edit_mesh_mut()?.clear_history();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::EditMesh;
    use crate::object::SceneObject;

    fn editing_scene() -> Scene {
        let mut scene = Scene::new();
        let obj = scene.add_object(
            SceneObject::new("Cube")
                .with_location(Vec3::new(1.0, 2.0, 3.0))
                .with_mesh(EditMesh::cube(2.0)),
        );
        scene.set_active(obj).unwrap();
        scene.set_mode(ObjectMode::Edit).unwrap();
        scene
    }

    #[test]
    fn test_active_object_snapshot() {
        let scene = editing_scene();
        let active = scene.active_object().unwrap();
        assert!(active.is_editing());
        assert!((active.origin.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let mut scene = editing_scene();
        let doc: &mut dyn GeometryDocument = &mut scene;
        let v = doc.new_vertex(Vec3::new(5.0, 0.0, 0.0)).unwrap();
        doc.set_selection(&GeomSet::vertex(v)).unwrap();
        assert_eq!(doc.selected_vertices(), vec![v]);
        assert!((doc.vertex_position(v).unwrap().x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_mutators_need_edit_mode() {
        let mut scene = editing_scene();
        scene.set_mode(ObjectMode::Object).unwrap();
        assert!(matches!(
            scene.new_vertex(Vec3::new_zero()),
            Err(MeshError::NotInEditMode(_))
        ));
        assert!(SelectionProvider::selected_vertices(&scene).is_empty());
    }
}
