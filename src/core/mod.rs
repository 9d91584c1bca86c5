// Platform-free logic; host tests include these files directly.
pub mod asset;
pub mod camera;
pub mod constants;
pub mod glyphs;
pub mod hover;
pub mod orbit;
pub mod scene;

pub use asset::{LoadError, LoadProgress, MeshVertex, SceneMesh};
pub use constants::*;
pub use hover::{HoverEffect, HoverSession, MediaKind, PopupSpec};
pub use orbit::{ControlEvent, OrbitControls};
pub use scene::{RotationState, ViewerState};
