//! Shared library for the Sweepcast podcast/blog site
//!
//! Holds the pieces used by the server binary: the error taxonomy,
//! configuration loading, database models and schema initialization, and the
//! text formatting helpers shared between episode normalization and blog
//! excerpts.

pub mod config;
pub mod db;
pub mod error;
pub mod text;

pub use error::{Error, Result};
