/// Page wiring and GPU tuning for the web frontend.
///
/// Kept free of web-sys types so host tests can `include!` this file.
// DOM hooks (must match static/index.html)
pub const CANVAS_ID: &str = "webgl";
pub const LOADER_SELECTOR: &str = ".loading";
pub const PANEL_ID: &str = "controls";

// Multisampling: requested count, falls back to 1 when the format can't do it
pub const MSAA_SAMPLES: u32 = 4;

// Orbit input
pub const WHEEL_DEADZONE_PX: f64 = 0.5;

// Uniform block sizes in bytes (must match the WGSL structs)
pub const GLOBALS_UNIFORM_SIZE: u64 = 112;
pub const SHADING_UNIFORM_SIZE: u64 = 64;
pub const OBJECT_UNIFORM_SIZE: u64 = 112;
pub const OVERLAY_UNIFORM_SIZE: u64 = 16;

// Query string keys accepted as overrides
pub const QUERY_KEYS: [&str; 6] = ["hold", "fadeDelay", "fade", "panelDelay", "pixelRatioCap", "model"];
