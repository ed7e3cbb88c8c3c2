//! Session-wide settings shared by every command

use lin_alg::f64::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SettingError;
use crate::plane::{ReferenceMode, WorkingPlane};
use crate::serde_helpers::vec3_serde;

/// Names accepted by [`SceneSettings::set_by_name`] and [`SceneSettings::get_by_name`]
pub const SETTING_NAMES: &[&str] = &[
    "reference_mode",
    "flip_angle",
    "flip_percent",
    "extend",
    "plane",
    "pivot",
    "angle",
    "strict_numbers",
];

/// Settings owned by the host session and passed to every command
///
/// These are the only values the interpreter carries from one command to the
/// next. The polar resolver writes `angle` when angle flipping is on, and the
/// pivot commands write `pivot_location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Base for delta and polar cursor/pivot offsets
    pub reference_mode: ReferenceMode,
    /// Rotate polar angles by 180 degrees
    pub flip_angle: bool,
    /// Measure percentages from the other end (`100 - p`)
    pub flip_percent: bool,
    /// Percent vertex extrusion connects to all selected vertices, not just the active one
    pub extend_edge_on_extrude: bool,
    /// Plane used for polar input
    pub plane: WorkingPlane,
    /// Pivot point location in world space
    #[serde(with = "vec3_serde")]
    pub pivot_location: Vec3,
    /// Last polar angle in degrees, overwritten when `flip_angle` transforms it
    pub angle: f64,
    /// Reject unparsable numeric arguments instead of reading them as 0.0
    pub strict_numbers: bool,
    /// Message of the last rejected command, empty when the last command succeeded
    #[serde(skip)]
    pub last_error: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self {
            reference_mode: ReferenceMode::Relative,
            flip_angle: false,
            flip_percent: false,
            extend_edge_on_extrude: false,
            plane: WorkingPlane::XY,
            pivot_location: Vec3::new_zero(),
            angle: 0.0,
            strict_numbers: false,
            last_error: String::new(),
        }
    }

    /// Load settings from a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingError> {
        serde_json::from_str(json).map_err(|e| SettingError::Deserialization(e.to_string()))
    }

    /// Serialize settings to JSON (the last error is not persisted)
    pub fn to_json(&self) -> Result<String, SettingError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingError::Serialization(e.to_string()))
    }

    /// Set a setting from its string form
    pub fn set_by_name(&mut self, name: &str, value: &str) -> Result<(), SettingError> {
        match name {
            "reference_mode" => self.reference_mode = value.parse()?,
            "flip_angle" => self.flip_angle = parse_bool(name, value)?,
            "flip_percent" => self.flip_percent = parse_bool(name, value)?,
            "extend" => self.extend_edge_on_extrude = parse_bool(name, value)?,
            "plane" => self.plane = value.parse()?,
            "pivot" => self.pivot_location = parse_vec3(name, value)?,
            "angle" => self.angle = parse_float(name, value)?,
            "strict_numbers" => self.strict_numbers = parse_bool(name, value)?,
            _ => return Err(SettingError::NotFound(name.to_string())),
        }
        log::debug!("setting {} = {}", name, value);
        Ok(())
    }

    /// Get a setting in its string form
    pub fn get_by_name(&self, name: &str) -> Result<String, SettingError> {
        let value = match name {
            "reference_mode" => self.reference_mode.to_string(),
            "flip_angle" => on_off(self.flip_angle),
            "flip_percent" => on_off(self.flip_percent),
            "extend" => on_off(self.extend_edge_on_extrude),
            "plane" => self.plane.to_string(),
            "pivot" => format!(
                "{}, {}, {}",
                self.pivot_location.x, self.pivot_location.y, self.pivot_location.z
            ),
            "angle" => self.angle.to_string(),
            "strict_numbers" => on_off(self.strict_numbers),
            _ => return Err(SettingError::NotFound(name.to_string())),
        };
        Ok(value)
    }

    /// Record the message of a rejected command
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = message.into();
    }

    /// Forget the last error
    pub fn clear_error(&mut self) {
        self.last_error.clear();
    }

    /// Whether the last command was rejected
    pub fn has_error(&self) -> bool {
        !self.last_error.is_empty()
    }
}

fn on_off(b: bool) -> String {
    let s = if b { "on" } else { "off" };
    s.to_string()
}

fn parse_bool(name: &str, value: &str) -> Result<bool, SettingError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(SettingError::invalid(name, format!("'{}' is not a boolean", other))),
    }
}

fn parse_float(name: &str, value: &str) -> Result<f64, SettingError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingError::invalid(name, format!("'{}' is not a number", value.trim())))
}

/// Accepts `x, y, z` with optional surrounding brackets or parentheses
fn parse_vec3(name: &str, value: &str) -> Result<Vec3, SettingError> {
    let inner = value
        .trim()
        .trim_start_matches(|c: char| c == '[' || c == '(')
        .trim_end_matches(|c: char| c == ']' || c == ')');
    let parts = inner
        .split(',')
        .map(|p| parse_float(name, p))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(SettingError::invalid(
            name,
            format!("expected 3 components, got {}", parts.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SceneSettings::new();
        assert_eq!(settings.reference_mode, ReferenceMode::Relative);
        assert_eq!(settings.plane, WorkingPlane::XY);
        assert!(!settings.flip_angle);
        assert!(!settings.strict_numbers);
        assert!(!settings.has_error());
    }

    #[test]
    fn test_set_by_name() {
        let mut settings = SceneSettings::new();
        settings.set_by_name("flip_angle", "on").unwrap();
        settings.set_by_name("plane", "yz").unwrap();
        settings.set_by_name("reference_mode", "SEL").unwrap();
        settings.set_by_name("pivot", "[1, 2.5, -3]").unwrap();

        assert!(settings.flip_angle);
        assert_eq!(settings.plane, WorkingPlane::YZ);
        assert_eq!(settings.reference_mode, ReferenceMode::SelectionRelative);
        assert_eq!(settings.pivot_location.y, 2.5);
        assert_eq!(settings.get_by_name("pivot").unwrap(), "1, 2.5, -3");
    }

    #[test]
    fn test_set_by_name_errors() {
        let mut settings = SceneSettings::new();
        assert_eq!(
            settings.set_by_name("bogus", "1"),
            Err(SettingError::NotFound("bogus".to_string()))
        );
        assert!(settings.set_by_name("flip_angle", "maybe").is_err());
        assert!(settings.set_by_name("pivot", "1, 2").is_err());
    }

    #[test]
    fn test_every_name_readable() {
        let settings = SceneSettings::new();
        for name in SETTING_NAMES {
            assert!(settings.get_by_name(name).is_ok(), "{} not readable", name);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = SceneSettings::new();
        settings.flip_percent = true;
        settings.plane = WorkingPlane::XZ;
        settings.pivot_location = Vec3::new(4.0, 5.0, 6.0);
        settings.record_error("not persisted");

        let json = settings.to_json().unwrap();
        let restored = SceneSettings::from_json(&json).unwrap();

        assert!(restored.flip_percent);
        assert_eq!(restored.plane, WorkingPlane::XZ);
        assert_eq!(restored.pivot_location.z, 6.0);
        assert!(!restored.has_error());
    }

    #[test]
    fn test_json_partial() {
        let settings = SceneSettings::from_json(r#"{ "flip_angle": true }"#).unwrap();
        assert!(settings.flip_angle);
        assert_eq!(settings.plane, WorkingPlane::XY);
    }
}
