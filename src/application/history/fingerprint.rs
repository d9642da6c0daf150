use crate::domain::{BranchSelection, RepositoryRoot};
use crate::infra::hash::hash128;
use std::path::Path;

/// Composite key a session id is derived from.
///
/// Only these four fields participate. Branch name, locale and search text are
/// left out so switching branches or typing a query keeps the same session.
pub fn session_key(
    port: u16,
    selection: BranchSelection,
    file: Option<&Path>,
    root: &RepositoryRoot,
) -> String {
    let file = file
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{port}:{selection}:{file}:{root}")
}

pub fn fingerprint(composite: &str) -> String {
    format!("{:032x}", hash128(composite))
}

pub fn session_id(
    port: u16,
    selection: BranchSelection,
    file: Option<&Path>,
    root: &RepositoryRoot,
) -> String {
    fingerprint(&session_key(port, selection, file, root))
}
