//! Data models

pub mod deploy;
pub mod status;
