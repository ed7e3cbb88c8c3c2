//! PDT Settings
//!
//! Session-wide configuration for the precision drawing command interpreter.
//!
//! Settings live for the whole host session and are passed by reference into
//! every command, so there is no ambient global state. The interpreter mutates
//! only a few of them:
//!
//! - `angle` when polar input is flipped
//! - `pivot_location` for pivot commands
//! - `last_error` after a rejected command
//!
//! # Example
//!
//! ```rust
//! use pdt_settings::{SceneSettings, WorkingPlane};
//!
//! let mut settings = SceneSettings::new();
//! settings.set_by_name("plane", "XZ").unwrap();
//! assert_eq!(settings.plane, WorkingPlane::XZ);
//! ```

mod error;
mod plane;
pub mod serde_helpers;
mod settings;

pub use error::SettingError;
pub use plane::{ReferenceMode, WorkingPlane};
pub use settings::{SceneSettings, SETTING_NAMES};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::{ReferenceMode, SceneSettings, SettingError, WorkingPlane};
}
