//! Infrastructure layer (adapters/implementations).
//!
//! This module contains IO-heavy integrations (git CLI, SQLite, TCP, terminal).

pub mod app_config;
pub mod db;
pub mod editor;
pub mod git;
pub mod hash;
pub mod locale;
pub mod prompt;
pub mod renderer;
pub mod server;
pub mod workspace;
