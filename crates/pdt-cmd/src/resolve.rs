//! Addressing-mode resolution
//!
//! Turns a command's numeric arguments into a vector:
//!
//! - Absolute: the arguments are a position
//! - Delta: the arguments are an offset; the handler picks the base
//! - Polar: distance and angle in the working plane
//! - Percent: a point along the selected reference, from the document

use lin_alg::f64::Vec3;
use pdt_mesh::{GeometryDocument, ViewDirectionProvider};
use pdt_settings::{SceneSettings, WorkingPlane};

use crate::args::{Mode, ParsedCommand};
use crate::context::SelectionContext;
use crate::error::{CmdError, CmdResult};

/// Mirror an angle through 180 degrees
pub fn flip_angle(angle: f64) -> f64 {
    if angle > 0.0 {
        angle - 180.0
    } else {
        angle + 180.0
    }
}

fn set_axis(v: &mut Vec3, axis: usize, value: f64) {
    match axis {
        0 => v.x = value,
        1 => v.y = value,
        _ => v.z = value,
    }
}

/// Offset of `distance` at `angle` degrees in `plane`
///
/// The angle is measured from the plane's first axis towards its second.
pub fn polar_offset<V>(distance: f64, angle: f64, plane: WorkingPlane, view: &V) -> Vec3
where
    V: ViewDirectionProvider + ?Sized,
{
    match plane.axes() {
        Some((i, j)) => {
            let (sin, cos) = angle.to_radians().sin_cos();
            let mut v = Vec3::new_zero();
            set_axis(&mut v, i, distance * cos);
            set_axis(&mut v, j, distance * sin);
            v
        }
        None => view.view_polar(distance, angle),
    }
}

/// Resolve a command whose argument count has been checked
///
/// Polar input with `flip_angle` set stores the flipped angle in
/// `settings.angle`. Percent input fails with [`CmdError::NoResult`] when the
/// selection has no usable reference.
pub fn resolve(
    cmd: &ParsedCommand,
    selection: &SelectionContext,
    doc: &dyn GeometryDocument,
    settings: &mut SceneSettings,
) -> CmdResult<Vec3> {
    match cmd.mode {
        Mode::Absolute | Mode::Delta => Ok(cmd.vector()),
        Mode::Polar => {
            let distance = cmd.get_float_or(0, 0.0);
            let mut angle = cmd.get_float_or(1, 0.0);
            if settings.flip_angle {
                angle = flip_angle(angle);
                settings.angle = angle;
            }
            Ok(polar_offset(distance, angle, settings.plane, doc))
        }
        Mode::Percent => {
            let active = selection.active.ok_or(CmdError::NoActiveObject)?;
            let percent = cmd.get_float_or(0, 0.0);
            doc.percent_point(
                active.index,
                settings.flip_percent,
                percent,
                cmd.opcode.percent_target(),
            )
            .ok_or(CmdError::NoResult)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedView;

    impl ViewDirectionProvider for FixedView {
        fn view_polar(&self, distance: f64, _angle: f64) -> Vec3 {
            Vec3::new(0.0, distance, 0.0)
        }
    }

    #[test]
    fn test_flip_angle() {
        assert_eq!(flip_angle(30.0), -150.0);
        assert_eq!(flip_angle(-30.0), 150.0);
        assert_eq!(flip_angle(0.0), 180.0);
    }

    #[test]
    fn test_polar_planes() {
        let v = polar_offset(2.0, 90.0, WorkingPlane::XY, &FixedView);
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 2.0).abs() < 1e-9);
        assert_eq!(v.z, 0.0);

        let v = polar_offset(2.0, 0.0, WorkingPlane::YZ, &FixedView);
        assert_eq!(v.x, 0.0);
        assert!((v.y - 2.0).abs() < 1e-9);
        assert!(v.z.abs() < 1e-9);

        let v = polar_offset(3.0, 45.0, WorkingPlane::ViewAligned, &FixedView);
        assert_eq!(v.y, 3.0);
    }
}
