//! Working plane and reference mode enums
//!
//! Both are stored in [`SceneSettings`](crate::SceneSettings) and can be set
//! by name from configuration or the interactive prompt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingError;

/// Plane used as the basis for distance/angle input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkingPlane {
    /// Axes 0 and 1
    #[default]
    XY,
    /// Axes 0 and 2
    XZ,
    /// Axes 1 and 2
    YZ,
    /// Plane of the current view, resolved by the host
    ViewAligned,
}

impl WorkingPlane {
    /// Axis indices `(i, j)` used for the cosine and sine components.
    ///
    /// Returns `None` for [`WorkingPlane::ViewAligned`], whose basis depends on
    /// the view and is not known to the settings layer.
    pub const fn axes(self) -> Option<(usize, usize)> {
        match self {
            WorkingPlane::XY => Some((0, 1)),
            WorkingPlane::XZ => Some((0, 2)),
            WorkingPlane::YZ => Some((1, 2)),
            WorkingPlane::ViewAligned => None,
        }
    }

    /// Short name as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            WorkingPlane::XY => "XY",
            WorkingPlane::XZ => "XZ",
            WorkingPlane::YZ => "YZ",
            WorkingPlane::ViewAligned => "VIEW",
        }
    }
}

impl fmt::Display for WorkingPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkingPlane {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XY" => Ok(WorkingPlane::XY),
            "XZ" => Ok(WorkingPlane::XZ),
            "YZ" => Ok(WorkingPlane::YZ),
            "VIEW" | "LO" => Ok(WorkingPlane::ViewAligned),
            other => Err(SettingError::invalid(
                "plane",
                format!("'{}' is not one of XY, XZ, YZ, VIEW", other),
            )),
        }
    }
}

/// What delta and polar offsets are added to for cursor and pivot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferenceMode {
    /// Offset from the current cursor/pivot location
    #[default]
    Relative,
    /// Offset from the active vertex (Edit mode) or the object origin (Object mode)
    SelectionRelative,
}

impl ReferenceMode {
    /// Short name as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            ReferenceMode::Relative => "REL",
            ReferenceMode::SelectionRelative => "SEL",
        }
    }
}

impl fmt::Display for ReferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReferenceMode {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REL" | "RELATIVE" => Ok(ReferenceMode::Relative),
            "SEL" | "SELECTED" | "SELECTION" => Ok(ReferenceMode::SelectionRelative),
            other => Err(SettingError::invalid(
                "reference_mode",
                format!("'{}' is not one of REL, SEL", other),
            )),
        }
    }
}
