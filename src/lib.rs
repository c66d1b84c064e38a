pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod git;
pub mod resolver;
pub mod ui;

pub use error::{GitverError, Result};
pub use resolver::{LabelResolution, Resolution, Resolver};
