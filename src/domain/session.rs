use super::history::BranchSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persisted view state, keyed by the session id.
///
/// A rendering surface reads this back by id. Every write replaces the whole
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub id: String,
    pub workspace_folder: PathBuf,
    pub repository_root: PathBuf,
    pub branch_name: String,
    pub selection: BranchSelection,
    /// Reserved for the search box of the view. Always empty when written here.
    #[serde(default)]
    pub search_text: String,
    pub file_path: Option<PathBuf>,
    pub line_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(flatten)]
    pub state: SessionState,
    pub updated_at: String,
}
