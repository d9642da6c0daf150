use crate::domain::{
    ActiveEditor, PromptOptions, RenderRequest, SelectionItem, ServerInfo, SessionRecord,
    SessionState,
};
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[async_trait]
pub trait WorkspaceResolver: Send + Sync {
    /// Workspace folder owning `path_hint`, or the default folder when no hint is given.
    async fn resolve(&self, path_hint: Option<&Path>) -> Option<PathBuf>;
}

#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// Repository roots intersecting `path`, in discovery order.
    async fn list_roots(&self, path: &Path) -> Result<Vec<PathBuf>>;
    async fn current_root(&self) -> Result<PathBuf>;
    async fn current_branch(&self) -> Result<String>;
}

#[async_trait]
pub trait RepositoryServiceFactory: Send + Sync {
    async fn create(
        &self,
        workspace: &Path,
        path_hint: &Path,
    ) -> Result<Arc<dyn RepositoryService>>;
}

/// The long-lived service a rendering surface talks to.
#[async_trait]
pub trait BackingService: Send + Sync {
    /// Starts the service if needed. Calling it again returns the running instance.
    async fn start(&self, workspace: &Path) -> Result<ServerInfo>;
    async fn shutdown(&self);
}

#[async_trait]
pub trait LocaleProvider: Send + Sync {
    async fn detect(&self) -> Result<String>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates or fully replaces the state stored under `state.id`.
    async fn initialize(&self, state: SessionState) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<SessionRecord>>;
}

#[async_trait]
pub trait SelectionPrompt: Send + Sync {
    /// Index of the chosen item, or `None` when the user dismissed the prompt.
    async fn select_one(
        &self,
        items: Vec<SelectionItem>,
        options: PromptOptions,
    ) -> Option<usize>;
}

/// Host-owned display surface. Delivery is fire-and-forget.
pub trait Renderer: Send + Sync {
    fn render(&self, request: RenderRequest);
}

pub trait EditorHost: Send + Sync {
    fn active_editor(&self) -> Option<ActiveEditor>;
}
