//! Repository implementations for data access in githistory.

mod session;

pub use session::SessionRepository;

use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;

pub type DbConn = Arc<Mutex<Connection>>;
