// src/engine/mod.rs
mod engine;
pub mod types;

pub use engine::Engine;
