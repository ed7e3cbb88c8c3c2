//! Starter meshes

use lin_alg::f64::Vec3;

use crate::index::VertexIndex;
use crate::mesh::EditMesh;

impl EditMesh {
    /// Axis-aligned cube centred on the origin with edge length `size`
    ///
    /// Faces are wound counter-clockwise seen from outside.
    pub fn cube(size: f64) -> Self {
        let h = size * 0.5;
        let mut mesh = EditMesh::new();
        let v: Vec<VertexIndex> = [
            (-h, -h, -h),
            (h, -h, -h),
            (h, h, -h),
            (-h, h, -h),
            (-h, -h, h),
            (h, -h, h),
            (h, h, h),
            (-h, h, h),
        ]
        .into_iter()
        .map(|(x, y, z)| mesh.add_vertex(Vec3::new(x, y, z)))
        .collect();

        const QUADS: [[usize; 4]; 6] = [
            [0, 3, 2, 1], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // front
            [1, 2, 6, 5], // right
            [2, 3, 7, 6], // back
            [3, 0, 4, 7], // left
        ];
        for quad in QUADS {
            let added = mesh.add_face(&quad.map(|i| v[i]));
            debug_assert!(added.is_ok(), "cube face {:?} rejected", quad);
        }
        mesh
    }

    /// Square in the XY plane centred on the origin
    pub fn plane(size: f64) -> Self {
        let h = size * 0.5;
        let mut mesh = EditMesh::new();
        let a = mesh.add_vertex(Vec3::new(-h, -h, 0.0));
        let b = mesh.add_vertex(Vec3::new(h, -h, 0.0));
        let c = mesh.add_vertex(Vec3::new(h, h, 0.0));
        let d = mesh.add_vertex(Vec3::new(-h, h, 0.0));
        let added = mesh.add_face(&[a, b, c, d]);
        debug_assert!(added.is_ok(), "plane face rejected");
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = EditMesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.edge_count(), 12);
        assert_eq!(cube.face_count(), 6);
        assert!((cube.position(VertexIndex(6)).unwrap().x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_counts() {
        let plane = EditMesh::plane(1.0);
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.edge_count(), 4);
        assert_eq!(plane.face_count(), 1);
    }
}
