//! Topology operations on [`EditMesh`]
//!
//! These are the building blocks the command layer reaches through
//! [`GeometryMutator`](crate::GeometryMutator): edge subdivision, region
//! extrusion, duplication and merge-by-distance.

use ahash::{AHashMap, AHashSet};
use bitvec::prelude::*;
use lin_alg::f64::Vec3;
use smallvec::SmallVec;

use crate::error::MeshResult;
use crate::geom::GeomSet;
use crate::index::{EdgeIndex, FaceIndex, VertexIndex};
use crate::mesh::{edge_key, EditMesh, Face, Mask};
use crate::spatial::SpatialGrid;

/// Insert `chain` into a face loop between `a` and `b`, in loop orientation
fn insert_chain(face: &mut Face, a: VertexIndex, b: VertexIndex, chain: &[VertexIndex]) {
    let n = face.verts.len();
    for i in 0..n {
        let (u, w) = (face.verts[i], face.verts[(i + 1) % n]);
        if u == a && w == b {
            face.verts.insert_many(i + 1, chain.iter().copied());
            return;
        }
        if u == b && w == a {
            face.verts.insert_many(i + 1, chain.iter().rev().copied());
            return;
        }
    }
}

fn dedup_preserving<T: Copy + Eq + std::hash::Hash>(items: &[T]) -> Vec<T> {
    let mut seen = AHashSet::with_capacity(items.len());
    items.iter().copied().filter(|x| seen.insert(*x)).collect()
}

impl EditMesh {
    /// Split each edge into `cuts + 1` equal segments
    ///
    /// New vertices are placed along the edge and spliced into every face that
    /// uses it. A selected edge passes its selection to the pieces and the new
    /// vertices. Returns the created vertices, grouped per edge in input order
    /// and running from the edge's first vertex to its second.
    pub fn subdivide_edges(
        &mut self,
        edges: &[EdgeIndex],
        cuts: usize,
    ) -> MeshResult<Vec<VertexIndex>> {
        edges.iter().try_for_each(|&e| self.check_edge(e))?;
        if cuts == 0 {
            return Ok(Vec::new());
        }

        let mut created = Vec::with_capacity(edges.len() * cuts);
        for e in dedup_preserving(edges) {
            let [a, b] = self.edges[e.as_usize()].verts;
            let pa = self.positions[a.as_usize()];
            let pb = self.positions[b.as_usize()];
            let selected = self.is_edge_selected(e);

            let mut chain: SmallVec<[VertexIndex; 4]> = SmallVec::with_capacity(cuts);
            for k in 1..=cuts {
                let t = k as f64 / (cuts + 1) as f64;
                let v = self.add_vertex(pa + (pb - pa) * t);
                if selected {
                    self.vert_select.set(v.as_usize(), true);
                }
                chain.push(v);
            }

            // the original edge keeps its index and becomes the first segment
            self.edges[e.as_usize()].verts = [a, chain[0]];
            let mut prev = chain[0];
            for &v in chain.iter().skip(1).chain(std::iter::once(&b)) {
                let piece = self.push_edge(prev, v);
                if selected {
                    self.edge_select.set(piece.as_usize(), true);
                }
                prev = v;
            }

            for face in &mut self.faces {
                insert_chain(face, a, b, &chain);
            }
            created.extend(chain);
        }

        self.rebuild_adjacency();
        log::debug!("Subdivided {} edge(s), {} new vertices", edges.len(), created.len());
        Ok(created)
    }

    /// Extrude a region, returning the newly created cap geometry
    ///
    /// Faces in `geom` are copied to a cap joined to the originals by side
    /// faces along the region boundary; the original faces and any geometry
    /// they enclose are removed. Edges not used by a region face sweep out a
    /// quad, and lone vertices sweep out an edge. The cap sits on top of the
    /// source, so callers translate the returned vertices afterwards.
    pub fn extrude_region(&mut self, geom: &GeomSet) -> MeshResult<GeomSet> {
        self.check_geom(geom)?;

        let region_faces = dedup_preserving(&geom.faces);
        let in_region: AHashSet<FaceIndex> = region_faces.iter().copied().collect();

        let mut usage: AHashMap<(u32, u32), usize> = AHashMap::new();
        let mut face_verts: AHashSet<VertexIndex> = AHashSet::new();
        for f in &region_faces {
            for (a, b) in self.faces[f.as_usize()].loop_pairs() {
                *usage.entry(edge_key(a, b)).or_default() += 1;
                face_verts.insert(a);
            }
        }

        // boundary pairs keep their face's winding so side faces line up
        let mut boundary: Vec<(VertexIndex, VertexIndex)> = Vec::new();
        for f in &region_faces {
            for (a, b) in self.faces[f.as_usize()].loop_pairs() {
                if usage.get(&edge_key(a, b)) == Some(&1) {
                    boundary.push((a, b));
                }
            }
        }

        let loose_edges: Vec<EdgeIndex> = dedup_preserving(&geom.edges)
            .into_iter()
            .filter(|e| {
                let [a, b] = self.edges[e.as_usize()].verts;
                !usage.contains_key(&edge_key(a, b))
            })
            .collect();
        let edge_verts: AHashSet<VertexIndex> = loose_edges
            .iter()
            .flat_map(|e| self.edges[e.as_usize()].verts)
            .collect();
        let loose_verts: Vec<VertexIndex> = dedup_preserving(&geom.verts)
            .into_iter()
            .filter(|v| !face_verts.contains(v) && !edge_verts.contains(v))
            .collect();

        let sources: AHashSet<VertexIndex> = face_verts
            .iter()
            .chain(edge_verts.iter())
            .chain(loose_verts.iter())
            .copied()
            .collect();

        let mut out = GeomSet::new();
        let mut dup: AHashMap<VertexIndex, VertexIndex> = AHashMap::with_capacity(sources.len());
        for v in self.history_order(&sources) {
            let nv = self.add_vertex(self.positions[v.as_usize()]);
            dup.insert(v, nv);
            out.verts.push(nv);
        }

        for f in &region_faces {
            let cap: SmallVec<[VertexIndex; 4]> = self.faces[f.as_usize()]
                .verts
                .iter()
                .map(|v| dup[v])
                .collect();
            out.faces.push(self.add_face(&cap)?);
        }
        let mut cap_edges: AHashSet<EdgeIndex> = AHashSet::new();
        for f in &out.faces {
            let pairs: Vec<_> = self.faces[f.as_usize()].loop_pairs().collect();
            for (a, b) in pairs {
                if let Some(e) = self.find_edge(a, b) {
                    if cap_edges.insert(e) {
                        out.edges.push(e);
                    }
                }
            }
        }

        for &(a, b) in &boundary {
            self.add_face(&[a, b, dup[&b], dup[&a]])?;
        }
        for e in &loose_edges {
            let [a, b] = self.edges[e.as_usize()].verts;
            let ne = self.ensure_edge(dup[&a], dup[&b])?;
            if cap_edges.insert(ne) {
                out.edges.push(ne);
            }
            self.add_face(&[a, b, dup[&b], dup[&a]])?;
        }
        for v in &loose_verts {
            self.ensure_edge(*v, dup[v])?;
        }

        if !region_faces.is_empty() {
            let mut dead_v: Mask = bitvec![u64, Lsb0; 0; self.vertex_count()];
            let mut dead_e: Mask = bitvec![u64, Lsb0; 0; self.edge_count()];
            let mut dead_f: Mask = bitvec![u64, Lsb0; 0; self.face_count()];
            for f in &region_faces {
                dead_f.set(f.as_usize(), true);
            }

            // interior edges only bordered by region faces
            for (&(a, b), &count) in &usage {
                if count < 2 {
                    continue;
                }
                let (a, b) = (VertexIndex(a), VertexIndex(b));
                if let Some(e) = self.find_edge(a, b) {
                    let swallowed = self
                        .faces_with_edge(a, b)
                        .iter()
                        .all(|f| in_region.contains(f));
                    if swallowed {
                        dead_e.set(e.as_usize(), true);
                    }
                }
            }
            for v in &face_verts {
                if self.edges_of(*v).iter().all(|e| dead_e[e.as_usize()]) {
                    dead_v.set(v.as_usize(), true);
                }
            }

            let remap = self.compact(&dead_v, &dead_e, &dead_f);
            out = remap.apply(&out);
        }

        log::debug!(
            "Extruded region: {} vert(s), {} edge(s), {} face(s) created",
            out.verts.len(),
            out.edges.len(),
            out.faces.len()
        );
        Ok(out)
    }

    /// Copy a region, returning the copy
    ///
    /// Edges of listed faces and vertices of listed edges and faces are
    /// copied along with them. The copy is not connected to the source.
    pub fn duplicate_region(&mut self, geom: &GeomSet) -> MeshResult<GeomSet> {
        self.check_geom(geom)?;

        let faces = dedup_preserving(&geom.faces);
        let mut pairs: Vec<(VertexIndex, VertexIndex)> = Vec::new();
        let mut seen: AHashSet<(u32, u32)> = AHashSet::new();
        let edge_pairs = geom.edges.iter().map(|e| {
            let [a, b] = self.edges[e.as_usize()].verts;
            (a, b)
        });
        let face_pairs = faces
            .iter()
            .flat_map(|f| self.faces[f.as_usize()].loop_pairs());
        for (a, b) in edge_pairs.chain(face_pairs) {
            if seen.insert(edge_key(a, b)) {
                pairs.push((a, b));
            }
        }

        let sources: AHashSet<VertexIndex> = geom
            .verts
            .iter()
            .copied()
            .chain(pairs.iter().flat_map(|&(a, b)| [a, b]))
            .collect();

        let mut out = GeomSet::new();
        let mut dup: AHashMap<VertexIndex, VertexIndex> = AHashMap::with_capacity(sources.len());
        for v in self.history_order(&sources) {
            let nv = self.add_vertex(self.positions[v.as_usize()]);
            dup.insert(v, nv);
            out.verts.push(nv);
        }
        for (a, b) in pairs {
            out.edges.push(self.ensure_edge(dup[&a], dup[&b])?);
        }
        for f in faces {
            let copy: SmallVec<[VertexIndex; 4]> = self.faces[f.as_usize()]
                .verts
                .iter()
                .map(|v| dup[v])
                .collect();
            out.faces.push(self.add_face(&copy)?);
        }

        log::debug!(
            "Duplicated region: {} vert(s), {} edge(s), {} face(s)",
            out.verts.len(),
            out.edges.len(),
            out.faces.len()
        );
        Ok(out)
    }

    /// Merge vertices of `verts` lying within `tolerance` of each other
    ///
    /// The lowest-indexed vertex of each cluster survives, and is selected if
    /// any vertex merged into it was. Returns how many vertices were removed.
    pub fn merge_by_distance(&mut self, verts: &[VertexIndex], tolerance: f64) -> MeshResult<usize> {
        verts.iter().try_for_each(|&v| self.check_vertex(v))?;
        let mut candidates = verts.to_vec();
        candidates.sort_unstable();
        candidates.dedup();

        let mut grid = SpatialGrid::with_capacity(tolerance, candidates.len());
        for (slot, v) in candidates.iter().enumerate() {
            grid.insert(self.positions[v.as_usize()], slot);
        }

        let tol_sq = tolerance * tolerance;
        let mut target: Vec<u32> = (0..self.vertex_count() as u32).collect();
        let mut merged: Mask = bitvec![u64, Lsb0; 0; candidates.len()];
        let mut neighbors = Vec::new();
        let mut removed = 0;

        for (slot, &v) in candidates.iter().enumerate() {
            if merged[slot] {
                continue;
            }
            let p: Vec3 = self.positions[v.as_usize()];
            grid.query_neighbors(p, &mut neighbors);
            for &other in &neighbors {
                if other <= slot || merged[other] {
                    continue;
                }
                let q = self.positions[candidates[other].as_usize()];
                if (q - p).magnitude_squared() <= tol_sq {
                    target[candidates[other].as_usize()] = v.0;
                    merged.set(other, true);
                    removed += 1;
                }
            }
        }

        if removed > 0 {
            self.weld(&target);
            log::debug!("Merged {} vertex(es) within {}", removed, tolerance);
        }
        Ok(removed)
    }
}
