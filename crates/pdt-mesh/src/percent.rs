//! Percent-along points between two selected references

use lin_alg::f64::Vec3;

use crate::index::ObjectIndex;
use crate::mesh::EditMesh;
use crate::scene::Scene;

/// Point `percent` of the way from `start` to `end`
///
/// With `flip` the distance is measured from `end` instead.
pub fn interpolate(start: Vec3, end: Vec3, percent: f64, flip: bool) -> Vec3 {
    let percent = if flip { 100.0 - percent } else { percent };
    start + (end - start) * (percent / 100.0)
}

/// Object-local endpoints for an edit-mode percent point
///
/// Tried in order: the last two history entries, exactly two selected
/// vertices, exactly one selected edge.
pub fn edit_endpoints(mesh: &EditMesh) -> Option<(Vec3, Vec3)> {
    let history = mesh.history();
    if let [.., a, b] = history {
        return Some((mesh.position(*a)?, mesh.position(*b)?));
    }

    let verts = mesh.selected_vertices();
    if let [a, b] = verts.as_slice() {
        return Some((mesh.position(*a)?, mesh.position(*b)?));
    }

    let edges = mesh.selected_edges();
    if let [e] = edges.as_slice() {
        let [a, b] = mesh.edge(*e)?.verts;
        return Some((mesh.position(a)?, mesh.position(b)?));
    }
    None
}

/// Percent point for `object`, or `None` if the selection does not define one
///
/// In edit mode the result is object-local. In object mode exactly two objects
/// must be selected and the point runs from the other one to `object`.
pub fn percent_point(scene: &Scene, object: ObjectIndex, flip: bool, percent: f64) -> Option<Vec3> {
    let target = scene.object(object)?;
    if target.is_editing() {
        let (start, end) = edit_endpoints(&target.mesh)?;
        return Some(interpolate(start, end, percent, flip));
    }

    let selected = scene.selected_objects();
    if selected.len() != 2 || !selected.contains(&object) {
        return None;
    }
    let other = selected.iter().copied().find(|&i| i != object)?;
    let start = scene.object(other)?.location;
    Some(interpolate(start, target.location, percent, flip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{EdgeIndex, VertexIndex};
    use crate::object::{ObjectMode, SceneObject};

    fn line_mesh() -> EditMesh {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Vec3::new(10.0, 0.0, 0.0));
        let c = mesh.add_vertex(Vec3::new(10.0, 10.0, 0.0));
        mesh.add_edge(a, b).unwrap();
        mesh.add_edge(b, c).unwrap();
        mesh
    }

    #[test]
    fn test_interpolate_flip() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 0.0, 0.0);
        assert!((interpolate(a, b, 25.0, false).x - 2.5).abs() < 1e-12);
        assert!((interpolate(a, b, 25.0, true).x - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_history_takes_precedence() {
        let mut mesh = line_mesh();
        mesh.select_vertex(VertexIndex(2)).unwrap();
        mesh.select_vertex(VertexIndex(1)).unwrap();
        mesh.select_vertex(VertexIndex(0)).unwrap();
        let (start, end) = edit_endpoints(&mesh).unwrap();
        assert!((start.x - 10.0).abs() < 1e-12);
        assert!(end.x.abs() < 1e-12);
    }

    #[test]
    fn test_single_edge() {
        let mut mesh = line_mesh();
        mesh.select_edge(EdgeIndex(1)).unwrap();
        let (start, end) = edit_endpoints(&mesh).unwrap();
        assert!((start.y - 0.0).abs() < 1e-12);
        assert!((end.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_ambiguous_selection() {
        let mut mesh = line_mesh();
        assert!(edit_endpoints(&mesh).is_none());
        mesh.select_edge(EdgeIndex(0)).unwrap();
        mesh.select_edge(EdgeIndex(1)).unwrap();
        assert!(edit_endpoints(&mesh).is_none());
    }

    #[test]
    fn test_object_mode_two_objects() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::new("A"));
        let b = scene.add_object(
            SceneObject::new("B").with_location(Vec3::new(0.0, 0.0, 8.0)),
        );
        scene.set_active(b).unwrap();
        assert!(percent_point(&scene, b, false, 50.0).is_none());

        scene.select_object(a, true).unwrap();
        scene.select_object(b, true).unwrap();
        let p = percent_point(&scene, b, false, 25.0).unwrap();
        assert!((p.z - 2.0).abs() < 1e-12);

        scene.set_mode(ObjectMode::Edit).unwrap();
        assert!(percent_point(&scene, b, false, 25.0).is_none());
    }
}
