//! CLI module graph.

pub mod command;
pub mod config;
pub mod dashboard;
pub mod facets;
pub mod output;
pub mod paths;
pub mod render;
