//! What a successful command did

use std::fmt;

use lin_alg::f64::Vec3;
use pdt_mesh::GeomSet;

#[derive(Debug, Clone)]
pub enum Outcome {
    /// The 3D cursor was placed at this world location
    CursorPlaced(Vec3),
    /// The pivot point was placed at this world location
    PivotPlaced(Vec3),
    /// This many vertices were moved
    VerticesMoved(usize),
    /// This many objects were moved
    ObjectsMoved(usize),
    /// New geometry, which is also the new selection
    GeometryCreated(GeomSet),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::CursorPlaced(v) => {
                write!(f, " Cursor placed at [{:.4}, {:.4}, {:.4}]", v.x, v.y, v.z)
            }
            Outcome::PivotPlaced(v) => {
                write!(f, " Pivot placed at [{:.4}, {:.4}, {:.4}]", v.x, v.y, v.z)
            }
            Outcome::VerticesMoved(n) => write!(f, " Moved {} vertex(es)", n),
            Outcome::ObjectsMoved(n) => write!(f, " Moved {} object(s)", n),
            Outcome::GeometryCreated(geom) => {
                let (v, e, fc) = geom.counts();
                write!(f, " Created {} vertex(es), {} edge(s), {} face(s)", v, e, fc)
            }
        }
    }
}
