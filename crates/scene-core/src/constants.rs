// Shared scene, timing and shading constants used by the web frontend.

// Entry transition timing (seconds, measured from load completion)
pub const LOADER_HOLD_SEC: f32 = 1.0; // keeps near-instant loads from flashing
pub const FADE_DELAY_SEC: f32 = 0.5; // extra wait after the hold before alpha moves
pub const FADE_DURATION_SEC: f32 = 1.5;
pub const PANEL_DELAY_SEC: f32 = 2.0; // independent of the fade timers

// Animation
pub const ROTATION_RATE_X: f32 = -0.1; // radians per second
pub const ROTATION_RATE_Y: f32 = 0.2;

// Viewport
pub const PIXEL_RATIO_CAP: f32 = 2.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 25.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_EYE: [f32; 3] = [7.0, 7.0, 7.0];
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;

// Shading defaults (0xRRGGBB, sRGB as edited in the control panel)
pub const DEFAULT_COLOR: u32 = 0xffffff;
pub const DEFAULT_DIRECTIONAL_LIGHT_COLOR: u32 = 0x80ff00;
pub const DEFAULT_DIRECTIONAL_LIGHT_ENABLED: bool = false;
pub const DEFAULT_POINT_LIGHT_COLOR: u32 = 0xff8929;
pub const DEFAULT_POINT_LIGHT_ENABLED: bool = true;

pub const CLEAR_COLOR: u32 = 0x0c0c0c;
pub const TONE_MAPPING_EXPOSURE: f32 = 1.0;

// Light placement consumed by the shading program
pub const DIRECTIONAL_LIGHT_POSITION: [f32; 3] = [0.0, 0.0, 3.0];
pub const POINT_LIGHT_POSITION: [f32; 3] = [0.0, 2.5, 0.0];

// Scene layout
pub const TORUS_KNOT_POSITION: [f32; 3] = [3.0, 0.0, 0.0];
pub const CAPSULE_POSITION: [f32; 3] = [-3.0, 0.0, 0.0];

// Procedural geometry
pub const TORUS_KNOT_RADIUS: f32 = 0.6;
pub const TORUS_KNOT_TUBE: f32 = 0.25;
pub const TORUS_KNOT_TUBULAR_SEGMENTS: u32 = 128;
pub const TORUS_KNOT_RADIAL_SEGMENTS: u32 = 32;
pub const TORUS_KNOT_P: u32 = 2;
pub const TORUS_KNOT_Q: u32 = 3;

pub const CAPSULE_RADIUS: f32 = 1.0;
pub const CAPSULE_LENGTH: f32 = 1.0;
pub const CAPSULE_CAP_SEGMENTS: u32 = 4;
pub const CAPSULE_RADIAL_SEGMENTS: u32 = 8;

// Assets
pub const DEFAULT_MODEL_URL: &str = "models/icosphere.obj";
