//! History view use-case: root resolution, session ids, concurrent lookups
//! and view addressing.

mod coordinator;
mod fingerprint;
mod orchestrator;
mod root_resolver;
mod traits;
mod view_request;

pub use coordinator::{InitializationResults, gather};
pub use fingerprint::{fingerprint, session_id, session_key};
pub use orchestrator::show_history;
pub use root_resolver::{RootResolver, fallback_root, root_for_file};
pub use traits::*;
pub use view_request::{build_address, build_title, query_parameters};
