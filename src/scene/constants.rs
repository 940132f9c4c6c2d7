use glam::Vec3;

// Shared scene/interaction tuning constants used by the web frontend.

// Backdrop
pub const BACKGROUND_HEX: u32 = 0x0e0e11;
pub const FOG_NEAR: f32 = 25.0;
pub const FOG_FAR: f32 = 60.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 22.0);
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.08;
pub const ORBIT_ZOOM_SPEED: f32 = 0.8;
pub const ORBIT_PAN_SPEED: f32 = 1.2;
pub const ORBIT_ROTATE_SPEED: f32 = 0.6;
pub const ORBIT_MIN_DISTANCE: f32 = 8.0;
pub const ORBIT_MAX_DISTANCE: f32 = 60.0;
pub const ORBIT_ZOOM_BASE: f32 = 0.95; // per wheel notch, raised to zoom speed

// Lights (intensity, and where the directional ones shine from)
pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const FRONT_LIGHT_INTENSITY: f32 = 0.8;
pub const FRONT_LIGHT_FROM: Vec3 = CAMERA_START;
pub const TOP_LIGHT_INTENSITY: f32 = 0.5;
pub const TOP_LIGHT_FROM: Vec3 = Vec3::new(0.0, 10.0, 0.0);

// Ball layout: x in ±7, y in 1.2..4.2, z in ±3
pub const BALL_RADIUS: f32 = 1.0;
pub const BALL_SPREAD_X: f32 = 14.0;
pub const BALL_Y_MIN: f32 = 1.2;
pub const BALL_Y_SPAN: f32 = 3.0;
pub const BALL_SPREAD_Z: f32 = 6.0;
pub const BALL_RENDER_ORDER: i32 = 1;

// Ball materials
pub const BASE_EMISSIVE_INTENSITY: f32 = 0.2;
pub const HIGHLIGHT_EMISSIVE_INTENSITY: f32 = 0.8;
pub const HIGHLIGHT_ROUGHNESS: f32 = 0.2;
pub const HIGHLIGHT_METALNESS: f32 = 0.3;

// Selected-ball breathing
pub const PULSE_SPEED: f32 = 0.02; // radians per frame
pub const PULSE_INTENSITY: f32 = 0.3;
pub const PULSE_BASELINE: f32 = 0.8;
pub const PULSE_SCALE_GAIN: f32 = 0.1;

// Deferred interaction timing
pub const PICK_DELAY_MS: u32 = 50;
pub const CLOSE_GRACE_MS: u32 = 250;

// Stars
pub const STAR_RADIUS_MIN: f32 = 50.0;
pub const STAR_RADIUS_SPAN: f32 = 150.0;
pub const STAR_PHASE_STEP: f32 = 0.01;
pub const STAR_WAVE_MIN: f32 = 0.2;
pub const STAR_WAVE_SPAN: f32 = 0.3;
pub const STAR_OPACITY_MIN: f32 = 0.6;
pub const STAR_OPACITY_SPAN: f32 = 0.2;

/// (count, point size, drift speed) from distant background to foreground.
pub const STAR_TIERS: [(usize, f32, f32); 4] = [
    (2500, 0.1, 0.0008),
    (1200, 0.2, 0.0015),
    (600, 0.35, 0.002),
    (300, 0.6, 0.0025),
];

// External resources
pub const DATA_URL: &str = "data.json";
