//! Authentication module

pub mod basic;
