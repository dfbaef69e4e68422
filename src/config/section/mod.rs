//! Configuration section definitions.
//!
//! Each module corresponds to a section in `gltf-preview.toml`:
//!
//! | Module        | TOML Section    | Purpose                                   |
//! |---------------|-----------------|-------------------------------------------|
//! | `engine`      | `[engine]`      | Preferred rendering engine per glTF major |
//! | `environment` | `[environment]` | Default ambient-reflection resources      |
//! | `scan`        | `[scan]`        | Keys that denote external resources       |
//! | `surface`     | `[surface]`     | Extension install directory               |

mod engine;
mod environment;
mod scan;
mod surface;

pub use engine::{Engine, EngineConfig};
pub use environment::{EnvironmentConfig, ReflectionEngine};
pub use scan::ScanConfig;
pub use surface::SurfaceConfig;
