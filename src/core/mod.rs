// src/core/mod.rs
pub mod crypto;
pub mod ops;

pub use ops::{execute, Context};
