//! Spatial hash grid for merge-by-distance

use ahash::AHashMap;
use lin_alg::f64::Vec3;

/// Uniform cubic cells, each storing the indices of the points inside it.
///
/// Neighbor queries visit the 3×3×3 block of cells around the query point, so
/// every point within `cell_size` of it is returned (plus some farther ones).
pub(crate) struct SpatialGrid {
    cells: AHashMap<(i64, i64, i64), Vec<usize>>,
    cell_size: f64,
}

impl SpatialGrid {
    pub fn with_capacity(cell_size: f64, expected_points: usize) -> Self {
        Self {
            cells: AHashMap::with_capacity(expected_points),
            // zero tolerance still needs a usable cell
            cell_size: cell_size.max(f64::EPSILON),
        }
    }

    /// Cell holding `pos`; coordinates beyond the `i64` range clamp to the
    /// outermost cells
    fn cell_key(&self, pos: Vec3) -> (i64, i64, i64) {
        (
            (pos.x / self.cell_size).floor() as i64,
            (pos.y / self.cell_size).floor() as i64,
            (pos.z / self.cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, pos: Vec3, idx: usize) {
        let key = self.cell_key(pos);
        self.cells.entry(key).or_default().push(idx);
    }

    pub fn query_neighbors(&self, pos: Vec3, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy, cz) = self.cell_key(pos);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    // cells past the clamped edge do not exist
                    let key = match (cx.checked_add(dx), cy.checked_add(dy), cz.checked_add(dz)) {
                        (Some(x), Some(y), Some(z)) => (x, y, z),
                        _ => continue,
                    };
                    if let Some(indices) = self.cells.get(&key) {
                        out.extend_from_slice(indices);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_within_cell_size() {
        let mut grid = SpatialGrid::with_capacity(0.001, 4);
        grid.insert(Vec3::new(0.0, 0.0, 0.0), 0);
        grid.insert(Vec3::new(0.0005, 0.0, 0.0), 1);
        grid.insert(Vec3::new(5.0, 0.0, 0.0), 2);

        let mut out = Vec::new();
        grid.query_neighbors(Vec3::new(0.0, 0.0, 0.0), &mut out);
        assert!(out.contains(&0));
        assert!(out.contains(&1));
        assert!(!out.contains(&2));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut grid = SpatialGrid::with_capacity(1.0, 2);
        grid.insert(Vec3::new(-0.1, -0.1, -0.1), 0);

        let mut out = Vec::new();
        grid.query_neighbors(Vec3::new(0.1, 0.1, 0.1), &mut out);
        assert_eq!(out, vec![0]);
    }

    #[test]
    fn test_huge_coordinates_clamp() {
        let mut grid = SpatialGrid::with_capacity(0.0001, 2);
        grid.insert(Vec3::new(1e300, 0.0, 0.0), 0);
        grid.insert(Vec3::new(-1e300, 0.0, 0.0), 1);

        let mut out = Vec::new();
        grid.query_neighbors(Vec3::new(1e300, 0.0, 0.0), &mut out);
        assert_eq!(out, vec![0]);
        grid.query_neighbors(Vec3::new(-1e300, 0.0, 0.0), &mut out);
        assert_eq!(out, vec![1]);
    }
}
