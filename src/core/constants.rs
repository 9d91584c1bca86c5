use glam::Vec3;

// Behaviour constants shared by the pure viewer/popup logic.

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 2.0, 2.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6; // keeps the eye off the poles

// Model placement
pub const MODEL_FIT_EXTENT: f32 = 2.0; // largest box dimension after fitting
pub const AUTO_ROTATE_STEP_RAD: f32 = 0.01; // yaw added per frame

// Lights (linear RGB, intensity folded in by the renderer)
pub const AMBIENT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const AMBIENT_INTENSITY: f32 = 1.0;
pub const DIRECTIONAL_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const DIRECTIONAL_INTENSITY: f32 = 2.0;
pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

// Popup timing (milliseconds)
pub const POPUP_ACTIVATE_DELAY_MS: i32 = 10;
pub const POPUP_REMOVE_DELAY_MS: i32 = 300;
