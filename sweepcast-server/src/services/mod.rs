//! External service clients

pub mod spotify;
pub mod summary;
