//! Repository queries backed by the `git` CLI.

use crate::application::history::{RepositoryService, RepositoryServiceFactory};
use crate::domain::{GitError, normalize_path};
use anyhow::{Context, Result};
use async_trait::async_trait;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;

const NOT_A_REPOSITORY: &str = "not a git repository";

pub struct GitCliFactory {
    git: PathBuf,
    scan_depth: usize,
}

impl GitCliFactory {
    /// Uses the first `git` found on `PATH`.
    pub fn new(scan_depth: usize) -> Result<Self, GitError> {
        let git = which::which("git").map_err(|_| GitError::NotInstalled)?;
        Ok(Self::with_binary(git, scan_depth))
    }

    pub fn with_binary(git: PathBuf, scan_depth: usize) -> Self {
        Self { git, scan_depth }
    }
}

#[async_trait]
impl RepositoryServiceFactory for GitCliFactory {
    async fn create(
        &self,
        workspace: &Path,
        path_hint: &Path,
    ) -> Result<Arc<dyn RepositoryService>> {
        Ok(Arc::new(GitCliService::new(
            self.git.clone(),
            workspace,
            path_hint,
            self.scan_depth,
        )))
    }
}

/// Git queries scoped to the directory of a path hint.
pub struct GitCliService {
    git: PathBuf,
    working_dir: PathBuf,
    scan_depth: usize,
}

impl GitCliService {
    pub fn new(git: PathBuf, workspace: &Path, path_hint: &Path, scan_depth: usize) -> Self {
        Self {
            git,
            working_dir: working_dir_for(workspace, path_hint),
            scan_depth,
        }
    }

    async fn run(&self, args: &[&str], cwd: &Path) -> Result<String, GitError> {
        let output = Command::new(&self.git)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(GitError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.to_lowercase().contains(NOT_A_REPOSITORY) {
                return Err(GitError::NotARepository(cwd.to_path_buf()));
            }
            return Err(GitError::CommandFailed {
                args: args.join(" "),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn toplevel(&self, cwd: &Path) -> Result<PathBuf, GitError> {
        let out = self.run(&["rev-parse", "--show-toplevel"], cwd).await?;
        Ok(PathBuf::from(out))
    }
}

#[async_trait]
impl RepositoryService for GitCliService {
    async fn list_roots(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let enclosing = match self.toplevel(path).await {
            Ok(root) => Some(root),
            Err(err) => {
                log::debug!("{} has no enclosing repository: {}", path.display(), err);
                None
            }
        };
        let nested = find_nested_roots(path.to_path_buf(), self.scan_depth).await?;

        // git reports resolved paths while the walk does not, so dedupe on
        // the canonical form and keep the first spelling seen.
        let mut seen: Vec<PathBuf> = Vec::new();
        let mut roots: Vec<PathBuf> = Vec::new();
        for root in enclosing.into_iter().chain(nested) {
            let key = std::fs::canonicalize(&root).unwrap_or_else(|_| normalize_path(&root));
            if !seen.contains(&key) {
                seen.push(key);
                roots.push(normalize_path(&root));
            }
        }
        Ok(roots)
    }

    async fn current_root(&self) -> Result<PathBuf> {
        Ok(self.toplevel(&self.working_dir).await?)
    }

    async fn current_branch(&self) -> Result<String> {
        let branch = self.run(&["branch", "--show-current"], &self.working_dir).await?;
        if !branch.is_empty() {
            return Ok(branch);
        }
        // Detached HEAD.
        Ok(self
            .run(&["rev-parse", "--short", "HEAD"], &self.working_dir)
            .await?)
    }
}

/// Directories below `path` (inclusive) that hold a `.git` entry.
///
/// Ignore files are not honoured: nested checkouts are commonly ignored by the
/// outer repository.
async fn find_nested_roots(path: PathBuf, max_depth: usize) -> Result<Vec<PathBuf>> {
    tokio::task::spawn_blocking(move || {
        WalkBuilder::new(&path)
            .standard_filters(false)
            .hidden(true)
            .max_depth(Some(max_depth))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|kind| kind.is_dir()))
            .filter(|entry| entry.path().join(".git").exists())
            .map(|entry| entry.into_path())
            .collect::<Vec<PathBuf>>()
    })
    .await
    .context("Repository scan task failed")
}

/// Nearest existing directory at or above `path_hint`, else the workspace.
fn working_dir_for(workspace: &Path, path_hint: &Path) -> PathBuf {
    path_hint
        .ancestors()
        .find(|candidate| candidate.is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| workspace.to_path_buf())
}
