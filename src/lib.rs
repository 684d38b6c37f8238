//! Count Vision CLI

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod session_store;
