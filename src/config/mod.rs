//! Configuration management module

mod settings;

pub use settings::*;
