// Camera and point rendering constants for the web frontend.

// Perspective camera: fixed eye on +Z looking at the origin
pub const CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// World-space size of one particle quad
pub const POINT_SIZE: f32 = 0.05;

// Near-black background
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// DOM ids the frontend binds to
pub const CANVAS_ID: &str = "app-canvas";
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const AUDIO_TOGGLE_ICON_ID: &str = "audio-toggle-icon";

// Icon classes mirrored onto the toggle button
pub const ICON_MUTED: &str = "fas fa-volume-mute";
pub const ICON_UNMUTED: &str = "fas fa-volume-up";
