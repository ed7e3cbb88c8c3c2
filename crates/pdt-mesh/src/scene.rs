//! In-memory scene: objects, the 3D cursor and the view basis

use lin_alg::f64::Vec3;

use crate::error::{MeshError, MeshResult};
use crate::index::ObjectIndex;
use crate::mesh::EditMesh;
use crate::object::{ObjectMode, SceneObject};

/// Screen-space axes of the current view, in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct ViewBasis {
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for ViewBasis {
    /// Front view: screen right is +X, screen up is +Z
    fn default() -> Self {
        Self {
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

impl ViewBasis {
    pub fn new(right: Vec3, up: Vec3) -> Self {
        Self { right, up }
    }

    /// Offset of `distance` at `angle_deg` within the screen plane
    pub fn polar(&self, distance: f64, angle_deg: f64) -> Vec3 {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        self.right * (distance * cos) + self.up * (distance * sin)
    }
}

/// Object list plus the scene-level state commands act on
///
/// At most one object, the active one, is in edit mode.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    active: Option<ObjectIndex>,
    cursor: Vec3,
    view: ViewBasis,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the cursor at the origin
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            active: None,
            cursor: Vec3::new_zero(),
            view: ViewBasis::default(),
        }
    }

    /// Add an object, returning its index
    pub fn add_object(&mut self, object: SceneObject) -> ObjectIndex {
        let index = ObjectIndex::from(self.objects.len());
        log::debug!("Added object '{}' as {:?}", object.name, index);
        self.objects.push(object);
        index
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object(&self, index: ObjectIndex) -> Option<&SceneObject> {
        self.objects.get(index.as_usize())
    }

    pub fn object_mut(&mut self, index: ObjectIndex) -> Option<&mut SceneObject> {
        self.objects.get_mut(index.as_usize())
    }

    /// Look up an object by name
    pub fn find(&self, name: &str) -> Option<ObjectIndex> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .map(ObjectIndex::from)
    }

    fn check_object(&self, index: ObjectIndex) -> MeshResult<()> {
        if index.as_usize() < self.objects.len() {
            Ok(())
        } else {
            Err(MeshError::ObjectOutOfBounds(index.0, self.objects.len()))
        }
    }

    // =========================================================================
    // Active object and modes
    // =========================================================================

    /// Make an object active; a previously active object leaves edit mode
    pub fn set_active(&mut self, index: ObjectIndex) -> MeshResult<()> {
        self.check_object(index)?;
        if let Some(prev) = self.active.filter(|&p| p != index) {
            self.objects[prev.as_usize()].mode = ObjectMode::Object;
        }
        self.active = Some(index);
        Ok(())
    }

    pub fn clear_active(&mut self) {
        if let Some(prev) = self.active.take() {
            self.objects[prev.as_usize()].mode = ObjectMode::Object;
        }
    }

    #[inline]
    pub fn active_index(&self) -> Option<ObjectIndex> {
        self.active
    }

    pub fn active(&self) -> Option<&SceneObject> {
        self.active.and_then(|i| self.objects.get(i.as_usize()))
    }

    pub fn active_mut(&mut self) -> Option<&mut SceneObject> {
        self.active.and_then(|i| self.objects.get_mut(i.as_usize()))
    }

    /// Switch the active object's mode
    pub fn set_mode(&mut self, mode: ObjectMode) -> MeshResult<()> {
        let active = self.active_mut().ok_or(MeshError::NoActiveObject)?;
        active.mode = mode;
        log::debug!("'{}' entered {} mode", active.name, mode);
        Ok(())
    }

    /// Set an object's selection flag
    pub fn select_object(&mut self, index: ObjectIndex, selected: bool) -> MeshResult<()> {
        self.check_object(index)?;
        self.objects[index.as_usize()].selected = selected;
        Ok(())
    }

    pub fn selected_objects(&self) -> Vec<ObjectIndex> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected)
            .map(|(i, _)| ObjectIndex::from(i))
            .collect()
    }

    /// The mesh being edited, if the active object is in edit mode
    pub fn edit_mesh(&self) -> MeshResult<&EditMesh> {
        let active = self.active().ok_or(MeshError::NoActiveObject)?;
        if active.is_editing() {
            Ok(&active.mesh)
        } else {
            Err(MeshError::NotInEditMode(active.name.clone()))
        }
    }

    pub fn edit_mesh_mut(&mut self) -> MeshResult<&mut EditMesh> {
        let active = self.active_mut().ok_or(MeshError::NoActiveObject)?;
        if active.is_editing() {
            Ok(&mut active.mesh)
        } else {
            Err(MeshError::NotInEditMode(active.name.clone()))
        }
    }

    // =========================================================================
    // Cursor and view
    // =========================================================================

    #[inline]
    pub fn cursor(&self) -> Vec3 {
        self.cursor
    }

    pub fn set_cursor(&mut self, location: Vec3) {
        self.cursor = location;
    }

    pub fn view(&self) -> &ViewBasis {
        &self.view
    }

    pub fn set_view(&mut self, view: ViewBasis) {
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_polar_default() {
        let view = ViewBasis::default();
        let p = view.polar(2.0, 90.0);
        assert!(p.x.abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!((p.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_edit_object() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::new("A"));
        let b = scene.add_object(SceneObject::new("B"));
        scene.set_active(a).unwrap();
        scene.set_mode(ObjectMode::Edit).unwrap();
        assert!(scene.edit_mesh().is_ok());

        scene.set_active(b).unwrap();
        assert_eq!(scene.object(a).unwrap().mode, ObjectMode::Object);
        assert!(matches!(scene.edit_mesh(), Err(MeshError::NotInEditMode(_))));
    }

    #[test]
    fn test_no_active_object() {
        let mut scene = Scene::new();
        assert_eq!(scene.set_mode(ObjectMode::Edit), Err(MeshError::NoActiveObject));
        assert!(scene.set_active(ObjectIndex(3)).is_err());
        assert_eq!(scene.find("missing"), None);
    }

    #[test]
    fn test_selected_objects() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::new("A"));
        let b = scene.add_object(SceneObject::new("B"));
        scene.select_object(b, true).unwrap();
        assert_eq!(scene.selected_objects(), vec![b]);
        scene.select_object(a, true).unwrap();
        assert_eq!(scene.selected_objects(), vec![a, b]);
    }
}
