//! Rewrites the fixed ELF header so that section header metadata is destroyed while the fields a
//! loader needs (entry point, program headers) survive.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod transform;

pub use minielf::{Class, Data};

pub use config::{parse_class, parse_data, Config, ConfigError};
pub use transform::{transform, ByteOrder, Error};
