//! Binary maze map codec, procedural generator, and text renderer.

pub mod constants;
pub mod error;
pub mod map;
pub mod rng;
