//! Domain types for githistory
//! Defines the data passed between entry points, the orchestration and its collaborators.

pub mod error;
pub mod history;
pub mod session;

pub use error::*;
pub use history::*;
pub use session::*;
