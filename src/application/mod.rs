//! Application layer (use-cases, policies).
//!
//! This module orchestrates domain logic through collaborator traits
//! without depending on the git CLI, storage or a terminal.

pub mod history;
