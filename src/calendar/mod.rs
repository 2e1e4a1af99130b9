pub mod types;
pub mod parse;
pub mod classify;
pub mod palette;
pub mod engine;

pub use engine::CronProjectionEngine;
pub use palette::{ColorRule, JobPalette};
pub use types::*;
