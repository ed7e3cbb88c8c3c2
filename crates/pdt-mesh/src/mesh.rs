//! Editable polygon mesh with selection state
//!
//! Vertices hold object-local positions. Edges and faces reference vertices by
//! index; faces are vertex loops whose consecutive pairs are always present as
//! edges. Removing elements compacts the arrays and returns a [`Remap`].

use ahash::AHashSet;
use bitvec::prelude::*;
use lin_alg::f64::Vec3;
use smallvec::SmallVec;

use crate::error::{MeshError, MeshResult};
use crate::geom::{GeomSet, Remap};
use crate::index::{EdgeIndex, FaceIndex, VertexIndex};

pub(crate) type Mask = BitVec<u64, Lsb0>;

/// An edge between two vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub verts: [VertexIndex; 2],
}

impl Edge {
    /// Whether the edge joins `a` and `b` in either direction
    #[inline]
    pub fn connects(&self, a: VertexIndex, b: VertexIndex) -> bool {
        self.verts == [a, b] || self.verts == [b, a]
    }

    /// The endpoint opposite `v`
    pub fn other(&self, v: VertexIndex) -> Option<VertexIndex> {
        match self.verts {
            [a, b] if a == v => Some(b),
            [a, b] if b == v => Some(a),
            _ => None,
        }
    }
}

/// A polygon given by its vertex loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub verts: SmallVec<[VertexIndex; 4]>,
}

impl Face {
    /// Consecutive vertex pairs around the loop, closing back to the first
    pub fn loop_pairs(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |i| (self.verts[i], self.verts[(i + 1) % n]))
    }

    pub fn uses_pair(&self, a: VertexIndex, b: VertexIndex) -> bool {
        self.loop_pairs().any(|(u, w)| (u == a && w == b) || (u == b && w == a))
    }
}

/// Unordered key for an edge between `a` and `b`
#[inline]
pub(crate) fn edge_key(a: VertexIndex, b: VertexIndex) -> (u32, u32) {
    if a.0 <= b.0 {
        (a.0, b.0)
    } else {
        (b.0, a.0)
    }
}

/// Editable mesh of one object
#[derive(Debug, Clone, Default)]
pub struct EditMesh {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,
    /// Edges incident to each vertex
    pub(crate) vert_edges: Vec<SmallVec<[EdgeIndex; 4]>>,
    pub(crate) vert_select: Mask,
    pub(crate) edge_select: Mask,
    pub(crate) face_select: Mask,
    /// Individually selected vertices, most recent last
    pub(crate) history: Vec<VertexIndex>,
}

impl EditMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn position(&self, v: VertexIndex) -> Option<Vec3> {
        self.positions.get(v.as_usize()).copied()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn edge(&self, e: EdgeIndex) -> Option<&Edge> {
        self.edges.get(e.as_usize())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn face(&self, f: FaceIndex) -> Option<&Face> {
        self.faces.get(f.as_usize())
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Edges incident to a vertex
    pub fn edges_of(&self, v: VertexIndex) -> &[EdgeIndex] {
        self.vert_edges
            .get(v.as_usize())
            .map(|e| e.as_slice())
            .unwrap_or(&[])
    }

    /// Find the edge joining two vertices
    pub fn find_edge(&self, a: VertexIndex, b: VertexIndex) -> Option<EdgeIndex> {
        self.vert_edges
            .get(a.as_usize())?
            .iter()
            .copied()
            .find(|e| self.edges[e.as_usize()].connects(a, b))
    }

    /// Faces whose loop contains the pair `a`-`b`
    pub fn faces_with_edge(&self, a: VertexIndex, b: VertexIndex) -> Vec<FaceIndex> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.uses_pair(a, b))
            .map(|(i, _)| FaceIndex::from(i))
            .collect()
    }

    /// Vertices within `tolerance` of `point`
    pub fn vertices_near(&self, point: Vec3, tolerance: f64) -> Vec<VertexIndex> {
        let tol_sq = tolerance * tolerance;
        self.positions
            .iter()
            .enumerate()
            .filter(|(_, p)| (**p - point).magnitude_squared() <= tol_sq)
            .map(|(i, _)| VertexIndex::from(i))
            .collect()
    }

    pub(crate) fn check_vertex(&self, v: VertexIndex) -> MeshResult<()> {
        if v.as_usize() < self.positions.len() {
            Ok(())
        } else {
            Err(MeshError::vertex_out_of_bounds(v.0, self.positions.len()))
        }
    }

    pub(crate) fn check_edge(&self, e: EdgeIndex) -> MeshResult<()> {
        if e.as_usize() < self.edges.len() {
            Ok(())
        } else {
            Err(MeshError::EdgeOutOfBounds(e.0, self.edges.len()))
        }
    }

    pub(crate) fn check_face(&self, f: FaceIndex) -> MeshResult<()> {
        if f.as_usize() < self.faces.len() {
            Ok(())
        } else {
            Err(MeshError::FaceOutOfBounds(f.0, self.faces.len()))
        }
    }

    pub(crate) fn check_geom(&self, geom: &GeomSet) -> MeshResult<()> {
        geom.verts.iter().try_for_each(|&v| self.check_vertex(v))?;
        geom.edges.iter().try_for_each(|&e| self.check_edge(e))?;
        geom.faces.iter().try_for_each(|&f| self.check_face(f))
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Add an unselected vertex
    pub fn add_vertex(&mut self, co: Vec3) -> VertexIndex {
        let index = VertexIndex::from(self.positions.len());
        self.positions.push(co);
        self.vert_edges.push(SmallVec::new());
        self.vert_select.push(false);
        index
    }

    /// Add an edge; fails if the vertices are already connected
    pub fn add_edge(&mut self, a: VertexIndex, b: VertexIndex) -> MeshResult<EdgeIndex> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Err(MeshError::InvalidEdge(a.0, b.0));
        }
        if self.find_edge(a, b).is_some() {
            return Err(MeshError::DuplicateEdge(a.0, b.0));
        }
        Ok(self.push_edge(a, b))
    }

    /// Return the edge joining `a` and `b`, creating it if needed
    pub(crate) fn ensure_edge(&mut self, a: VertexIndex, b: VertexIndex) -> MeshResult<EdgeIndex> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Err(MeshError::InvalidEdge(a.0, b.0));
        }
        Ok(match self.find_edge(a, b) {
            Some(e) => e,
            None => self.push_edge(a, b),
        })
    }

    pub(crate) fn push_edge(&mut self, a: VertexIndex, b: VertexIndex) -> EdgeIndex {
        let index = EdgeIndex::from(self.edges.len());
        self.edges.push(Edge { verts: [a, b] });
        self.vert_edges[a.as_usize()].push(index);
        self.vert_edges[b.as_usize()].push(index);
        self.edge_select.push(false);
        index
    }

    /// Add a face over a loop of distinct vertices, creating missing edges
    pub fn add_face(&mut self, verts: &[VertexIndex]) -> MeshResult<FaceIndex> {
        verts.iter().try_for_each(|&v| self.check_vertex(v))?;
        let distinct: AHashSet<VertexIndex> = verts.iter().copied().collect();
        if distinct.len() < 3 || distinct.len() != verts.len() {
            return Err(MeshError::DegenerateFace(distinct.len()));
        }

        let face = Face {
            verts: verts.iter().copied().collect(),
        };
        for (a, b) in face.loop_pairs() {
            self.ensure_edge(a, b)?;
        }

        let index = FaceIndex::from(self.faces.len());
        self.faces.push(face);
        self.face_select.push(false);
        Ok(index)
    }

    pub fn set_position(&mut self, v: VertexIndex, co: Vec3) -> MeshResult<()> {
        self.check_vertex(v)?;
        self.positions[v.as_usize()] = co;
        Ok(())
    }

    /// Move vertices by `offset`; each vertex moves once even if listed twice
    pub fn translate(&mut self, verts: &[VertexIndex], offset: Vec3) -> MeshResult<()> {
        verts.iter().try_for_each(|&v| self.check_vertex(v))?;
        let unique: AHashSet<VertexIndex> = verts.iter().copied().collect();
        for v in unique {
            let p = &mut self.positions[v.as_usize()];
            *p = *p + offset;
        }
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn is_vertex_selected(&self, v: VertexIndex) -> bool {
        self.vert_select.get(v.as_usize()).map(|b| *b).unwrap_or(false)
    }

    pub fn is_edge_selected(&self, e: EdgeIndex) -> bool {
        self.edge_select.get(e.as_usize()).map(|b| *b).unwrap_or(false)
    }

    pub fn is_face_selected(&self, f: FaceIndex) -> bool {
        self.face_select.get(f.as_usize()).map(|b| *b).unwrap_or(false)
    }

    /// Select a vertex individually, making it the active vertex
    pub fn select_vertex(&mut self, v: VertexIndex) -> MeshResult<()> {
        self.check_vertex(v)?;
        self.vert_select.set(v.as_usize(), true);
        self.history.retain(|&h| h != v);
        self.history.push(v);
        Ok(())
    }

    /// Select an edge and its vertices
    pub fn select_edge(&mut self, e: EdgeIndex) -> MeshResult<()> {
        self.check_edge(e)?;
        self.edge_select.set(e.as_usize(), true);
        for v in self.edges[e.as_usize()].verts {
            self.vert_select.set(v.as_usize(), true);
        }
        Ok(())
    }

    /// Select a face with its edges and vertices
    pub fn select_face(&mut self, f: FaceIndex) -> MeshResult<()> {
        self.check_face(f)?;
        self.face_select.set(f.as_usize(), true);
        let pairs: Vec<_> = self.faces[f.as_usize()].loop_pairs().collect();
        for (a, b) in pairs {
            self.vert_select.set(a.as_usize(), true);
            if let Some(e) = self.find_edge(a, b) {
                self.edge_select.set(e.as_usize(), true);
            }
        }
        Ok(())
    }

    /// Select every element
    pub fn select_all(&mut self) {
        self.vert_select.fill(true);
        self.edge_select.fill(true);
        self.face_select.fill(true);
    }

    /// Deselect everything, which also empties the selection history
    pub fn deselect_all(&mut self) {
        self.vert_select.fill(false);
        self.edge_select.fill(false);
        self.face_select.fill(false);
        self.history.clear();
    }

    /// Make `geom` exactly the selection
    ///
    /// History entries that are no longer selected are dropped.
    pub fn set_selection(&mut self, geom: &GeomSet) -> MeshResult<()> {
        self.check_geom(geom)?;
        self.vert_select.fill(false);
        self.edge_select.fill(false);
        self.face_select.fill(false);
        for v in &geom.verts {
            self.vert_select.set(v.as_usize(), true);
        }
        for e in &geom.edges {
            self.edge_select.set(e.as_usize(), true);
        }
        for f in &geom.faces {
            self.face_select.set(f.as_usize(), true);
        }
        let selected = &self.vert_select;
        self.history.retain(|v| selected[v.as_usize()]);
        Ok(())
    }

    pub fn selected_vertices(&self) -> Vec<VertexIndex> {
        self.vert_select.iter_ones().map(VertexIndex::from).collect()
    }

    pub fn selected_edges(&self) -> Vec<EdgeIndex> {
        self.edge_select.iter_ones().map(EdgeIndex::from).collect()
    }

    pub fn selected_faces(&self) -> Vec<FaceIndex> {
        self.face_select.iter_ones().map(FaceIndex::from).collect()
    }

    /// The whole selection as a set
    pub fn selection(&self) -> GeomSet {
        GeomSet {
            verts: self.selected_vertices(),
            edges: self.selected_edges(),
            faces: self.selected_faces(),
        }
    }

    pub fn history(&self) -> &[VertexIndex] {
        &self.history
    }

    /// The last individually selected vertex
    pub fn active_vertex(&self) -> Option<VertexIndex> {
        self.history.last().copied()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// `verts` ordered by selection history first, then by index
    pub(crate) fn history_order(&self, verts: &AHashSet<VertexIndex>) -> Vec<VertexIndex> {
        let mut ordered: Vec<VertexIndex> = Vec::with_capacity(verts.len());
        for &v in &self.history {
            if verts.contains(&v) && !ordered.contains(&v) {
                ordered.push(v);
            }
        }
        let mut rest: Vec<VertexIndex> = verts
            .iter()
            .copied()
            .filter(|v| !ordered.contains(v))
            .collect();
        rest.sort_unstable();
        ordered.extend(rest);
        ordered
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove elements; edges and faces using removed vertices or edges go too
    pub fn remove(&mut self, geom: &GeomSet) -> MeshResult<Remap> {
        self.check_geom(geom)?;
        let mut dead_v: Mask = bitvec![u64, Lsb0; 0; self.positions.len()];
        let mut dead_e: Mask = bitvec![u64, Lsb0; 0; self.edges.len()];
        let mut dead_f: Mask = bitvec![u64, Lsb0; 0; self.faces.len()];
        for v in &geom.verts {
            dead_v.set(v.as_usize(), true);
        }
        for e in &geom.edges {
            dead_e.set(e.as_usize(), true);
        }
        for f in &geom.faces {
            dead_f.set(f.as_usize(), true);
        }

        for (i, edge) in self.edges.iter().enumerate() {
            if edge.verts.iter().any(|v| dead_v[v.as_usize()]) {
                dead_e.set(i, true);
            }
        }
        for (i, face) in self.faces.iter().enumerate() {
            let touches_dead = face.loop_pairs().any(|(a, b)| {
                dead_v[a.as_usize()]
                    || self
                        .find_edge(a, b)
                        .map_or(true, |e| dead_e[e.as_usize()])
            });
            if touches_dead {
                dead_f.set(i, true);
            }
        }

        Ok(self.compact(&dead_v, &dead_e, &dead_f))
    }

    /// Redirect vertex references through `target` (`target[i] == i` keeps
    /// vertex `i`) and drop what collapses.
    pub(crate) fn weld(&mut self, target: &[u32]) -> Remap {
        let nv = self.positions.len();
        let mut dead_v: Mask = bitvec![u64, Lsb0; 0; nv];
        for (i, &t) in target.iter().enumerate().take(nv) {
            if t as usize != i {
                dead_v.set(i, true);
                if self.vert_select[i] {
                    self.vert_select.set(t as usize, true);
                }
            }
        }
        let map = |v: VertexIndex| VertexIndex(target[v.as_usize()]);

        let mut dead_e: Mask = bitvec![u64, Lsb0; 0; self.edges.len()];
        let mut seen: AHashSet<(u32, u32)> = AHashSet::with_capacity(self.edges.len());
        for (i, edge) in self.edges.iter_mut().enumerate() {
            edge.verts = [map(edge.verts[0]), map(edge.verts[1])];
            let [a, b] = edge.verts;
            if a == b || !seen.insert(edge_key(a, b)) {
                dead_e.set(i, true);
            }
        }

        let mut dead_f: Mask = bitvec![u64, Lsb0; 0; self.faces.len()];
        for (i, face) in self.faces.iter_mut().enumerate() {
            let mut verts: SmallVec<[VertexIndex; 4]> = SmallVec::new();
            for &v in &face.verts {
                let v = map(v);
                if verts.last() != Some(&v) {
                    verts.push(v);
                }
            }
            while verts.len() > 1 && verts.first() == verts.last() {
                verts.pop();
            }
            if verts.len() < 3 {
                dead_f.set(i, true);
            }
            face.verts = verts;
        }

        for v in &mut self.history {
            *v = map(*v);
        }
        self.history.dedup();

        self.compact(&dead_v, &dead_e, &dead_f)
    }

    /// Drop dead elements, renumber the survivors and rebuild adjacency
    pub(crate) fn compact(&mut self, dead_v: &Mask, dead_e: &Mask, dead_f: &Mask) -> Remap {
        let mut remap = Remap::default();

        let mut positions = Vec::with_capacity(self.positions.len());
        let mut vert_select = Mask::with_capacity(self.positions.len());
        for (i, &co) in self.positions.iter().enumerate() {
            if dead_v[i] {
                remap.verts.push(None);
            } else {
                remap.verts.push(Some(VertexIndex::from(positions.len())));
                positions.push(co);
                vert_select.push(self.vert_select[i]);
            }
        }

        let mut edges = Vec::with_capacity(self.edges.len());
        let mut edge_select = Mask::with_capacity(self.edges.len());
        for (i, edge) in self.edges.iter().enumerate() {
            let mapped = match (remap.vertex(edge.verts[0]), remap.vertex(edge.verts[1])) {
                (Some(a), Some(b)) if !dead_e[i] => Some(Edge { verts: [a, b] }),
                _ => None,
            };
            match mapped {
                Some(e) => {
                    remap.edges.push(Some(EdgeIndex::from(edges.len())));
                    edges.push(e);
                    edge_select.push(self.edge_select[i]);
                }
                None => remap.edges.push(None),
            }
        }

        let mut faces = Vec::with_capacity(self.faces.len());
        let mut face_select = Mask::with_capacity(self.faces.len());
        for (i, face) in self.faces.iter().enumerate() {
            let verts: Option<SmallVec<[VertexIndex; 4]>> =
                face.verts.iter().map(|&v| remap.vertex(v)).collect();
            match verts {
                Some(verts) if !dead_f[i] => {
                    remap.faces.push(Some(FaceIndex::from(faces.len())));
                    faces.push(Face { verts });
                    face_select.push(self.face_select[i]);
                }
                _ => remap.faces.push(None),
            }
        }

        self.history = self
            .history
            .iter()
            .filter_map(|&v| remap.vertex(v))
            .collect();
        self.positions = positions;
        self.edges = edges;
        self.faces = faces;
        self.vert_select = vert_select;
        self.edge_select = edge_select;
        self.face_select = face_select;
        self.rebuild_adjacency();

        remap
    }

    pub(crate) fn rebuild_adjacency(&mut self) {
        self.vert_edges = vec![SmallVec::new(); self.positions.len()];
        for (i, edge) in self.edges.iter().enumerate() {
            for v in edge.verts {
                self.vert_edges[v.as_usize()].push(EdgeIndex::from(i));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3::new(x, y, z)
    }

    fn square() -> EditMesh {
        let mut mesh = EditMesh::new();
        let a = mesh.add_vertex(v(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(v(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(v(1.0, 1.0, 0.0));
        let d = mesh.add_vertex(v(0.0, 1.0, 0.0));
        mesh.add_face(&[a, b, c, d]).unwrap();
        mesh
    }

    #[test]
    fn test_add_face_creates_edges() {
        let mesh = square();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.find_edge(VertexIndex(3), VertexIndex(0)).is_some());
    }

    #[test]
    fn test_add_edge_errors() {
        let mut mesh = square();
        assert_eq!(
            mesh.add_edge(VertexIndex(0), VertexIndex(1)),
            Err(MeshError::DuplicateEdge(0, 1))
        );
        assert_eq!(
            mesh.add_edge(VertexIndex(2), VertexIndex(2)),
            Err(MeshError::InvalidEdge(2, 2))
        );
        assert!(mesh.add_edge(VertexIndex(0), VertexIndex(9)).is_err());
        assert!(mesh.add_face(&[VertexIndex(0), VertexIndex(1), VertexIndex(0)]).is_err());
    }

    #[test]
    fn test_select_face_flushes_down() {
        let mut mesh = square();
        mesh.select_face(FaceIndex(0)).unwrap();
        assert_eq!(mesh.selected_vertices().len(), 4);
        assert_eq!(mesh.selected_edges().len(), 4);
        assert!(mesh.history().is_empty());
    }

    #[test]
    fn test_select_vertex_history() {
        let mut mesh = square();
        mesh.select_vertex(VertexIndex(2)).unwrap();
        mesh.select_vertex(VertexIndex(0)).unwrap();
        mesh.select_vertex(VertexIndex(2)).unwrap();
        assert_eq!(mesh.history(), &[VertexIndex(0), VertexIndex(2)]);
        assert_eq!(mesh.active_vertex(), Some(VertexIndex(2)));

        mesh.set_selection(&GeomSet::vertex(VertexIndex(0))).unwrap();
        assert_eq!(mesh.history(), &[VertexIndex(0)]);
    }

    #[test]
    fn test_translate_unique() {
        let mut mesh = square();
        mesh.translate(&[VertexIndex(1), VertexIndex(1)], v(0.0, 0.0, 2.0))
            .unwrap();
        assert_eq!(mesh.position(VertexIndex(1)).unwrap().z, 2.0);
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let mut mesh = square();
        mesh.select_vertex(VertexIndex(3)).unwrap();
        let remap = mesh.remove(&GeomSet::vertex(VertexIndex(0))).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.edge_count(), 2);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(remap.vertex(VertexIndex(0)), None);
        assert_eq!(remap.vertex(VertexIndex(3)), Some(VertexIndex(2)));
        assert_eq!(mesh.history(), &[VertexIndex(2)]);
        assert_eq!(mesh.edges_of(VertexIndex(0)).len(), 1);
    }

    #[test]
    fn test_weld_collapses_edge_and_face() {
        let mut mesh = square();
        // fold vertex 1 onto vertex 0
        let remap = mesh.weld(&[0, 0, 2, 3]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.edge_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces()[0].verts.len(), 3);
        assert_eq!(remap.vertex(VertexIndex(1)), None);
    }

    #[test]
    fn test_vertices_near() {
        let mesh = square();
        let near = mesh.vertices_near(v(1.0, 1.0, 0.00001), 0.0001);
        assert_eq!(near, vec![VertexIndex(2)]);
    }
}
