//! Browser backends for storage, timers and rendering.
//!
//! Only compiled for `wasm32`; native builds and tests use the in-memory
//! backends from `game::storage`, `game::timer` and `game::surface`.

#[cfg(target_arch = "wasm32")]
pub mod web;
