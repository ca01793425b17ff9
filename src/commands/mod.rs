//! CLI commands

pub mod list;
pub mod render;
pub mod show;
