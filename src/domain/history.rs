use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Which branches a history view is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchSelection {
    #[default]
    Current,
    All,
}

impl fmt::Display for BranchSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchSelection::Current => write!(f, "current"),
            BranchSelection::All => write!(f, "all"),
        }
    }
}

impl FromStr for BranchSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" => Ok(BranchSelection::Current),
            "all" => Ok(BranchSelection::All),
            _ => Err(format!("Invalid branch selection: {}", s)),
        }
    }
}

/// Top of a git working tree.
///
/// Paths are normalized lexically on construction so that `/repo`, `/repo/`
/// and `/repo/./` compare equal. Symlinks are not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryRoot(PathBuf);

impl RepositoryRoot {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(normalize_path(path.as_ref()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Final path segment, or the whole path for filesystem roots.
    pub fn basename(&self) -> String {
        basename(&self.0)
    }

    pub fn contains(&self, path: &Path) -> bool {
        normalize_path(path).starts_with(&self.0)
    }
}

impl fmt::Display for RepositoryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for RepositoryRoot {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// File details attached to a commit, as shown in a commit view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFileDetails {
    pub current_path: Option<PathBuf>,
    pub previous_path: Option<PathBuf>,
}

impl CommitFileDetails {
    /// Current path wins; renamed or deleted files fall back to their prior path.
    pub fn target_path(&self) -> Option<&Path> {
        self.current_path
            .as_deref()
            .or(self.previous_path.as_deref())
    }
}

/// A node in a commit tree view that wraps commit file details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitTreeNode {
    pub label: String,
    pub details: CommitFileDetails,
}

/// Everything a file-history request can be invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryTarget {
    CommitDetails(CommitFileDetails),
    TreeNode(CommitTreeNode),
    /// A plain filesystem path.
    File(PathBuf),
    /// Any object carrying a resource address, e.g. `file:///repo/a.ts`.
    Resource(String),
    /// Shapes we do not know how to read a file from.
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDocument {
    pub path: PathBuf,
    pub is_untitled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditor {
    pub document: EditorDocument,
    /// Zero-based line where the current selection starts.
    pub selection_start_line: u32,
}

impl ActiveEditor {
    pub fn file(path: impl Into<PathBuf>, selection_start_line: u32) -> Self {
        Self {
            document: EditorDocument {
                path: path.into(),
                is_untitled: false,
            },
            selection_start_line,
        }
    }

    /// The saved file behind this editor, if any.
    pub fn saved_file(&self) -> Option<&Path> {
        if self.document.is_untitled {
            None
        } else {
            Some(&self.document.path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    pub label: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOptions {
    pub placeholder: String,
    pub match_on_detail: bool,
}

/// Everything gathered for one history view. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub id: String,
    pub workspace_folder: PathBuf,
    pub repository_root: RepositoryRoot,
    pub branch_name: String,
    pub selection: BranchSelection,
    pub file_path: Option<PathBuf>,
    pub line_number: Option<u32>,
    pub locale: String,
    pub server_port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPlacement {
    #[default]
    Active,
    Beside,
}

/// Outbound message asking the host to display a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub command: String,
    pub address: String,
    pub placement: ViewPlacement,
    pub title: String,
}

/// What a successful history request produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescriptor {
    pub id: String,
    pub address: String,
    pub title: String,
}
