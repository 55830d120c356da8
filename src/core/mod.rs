//! Pure engine core: no platform APIs, testable on the host.
//!
//! The wasm frontend owns the WebAudio graph and the WebGPU surface; these
//! modules own every decision about *what* happens and *when*.

pub mod constants;
pub mod drone;
pub mod scene;
pub mod timeline;

pub use constants::*;
pub use drone::*;
pub use scene::*;
pub use timeline::Timeline;
