use super::traits::{BackingService, LocaleProvider, RepositoryService};
use crate::domain::{RepositoryRoot, ServerInfo};
use anyhow::{Context, Result};
use std::path::Path;

/// Facts needed to render a history view, gathered in one fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationResults {
    pub repository_root: RepositoryRoot,
    pub branch_name: String,
    pub server: ServerInfo,
    pub locale: String,
    pub workspace_roots: Vec<RepositoryRoot>,
}

impl InitializationResults {
    pub fn has_multiple_roots(&self) -> bool {
        self.workspace_roots.len() > 1
    }
}

/// Runs the five lookups concurrently.
///
/// The first failure wins and every other result is discarded. Lookups own
/// their timeouts.
pub async fn gather(
    service: &dyn RepositoryService,
    server: &dyn BackingService,
    locale: &dyn LocaleProvider,
    workspace: &Path,
) -> Result<InitializationResults> {
    let (repository_root, branch_name, server, locale, workspace_roots) = tokio::try_join!(
        async {
            service
                .current_root()
                .await
                .context("Failed to confirm repository root")
        },
        async {
            service
                .current_branch()
                .await
                .context("Failed to read current branch")
        },
        async {
            server
                .start(workspace)
                .await
                .context("Failed to start history server")
        },
        async { locale.detect().await.context("Failed to detect locale") },
        async {
            service
                .list_roots(workspace)
                .await
                .context("Failed to list workspace repositories")
        },
    )?;

    Ok(InitializationResults {
        repository_root: RepositoryRoot::new(repository_root),
        branch_name,
        server,
        locale,
        workspace_roots: workspace_roots
            .into_iter()
            .map(RepositoryRoot::new)
            .collect(),
    })
}
