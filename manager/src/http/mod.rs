//! Manager text-interface protocol

pub mod client;
pub mod command;
pub mod endpoint;
pub mod response;
