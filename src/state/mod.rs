use crate::application::history::{
    BackingService, EditorHost, LocaleProvider, Renderer, RepositoryServiceFactory,
    SelectionPrompt, SessionStore, WorkspaceResolver,
};
use crate::domain::{BranchSelection, ViewPlacement};
use crate::infra::app_config::AppConfig;
use crate::infra::db::Database;
use crate::infra::git::GitCliFactory;
use crate::infra::locale::EnvLocale;
use crate::infra::server::LocalServer;
use crate::infra::workspace::ConfiguredWorkspaces;
use anyhow::Result;
use std::sync::Arc;

/// How produced views are addressed and placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub preview_base: String,
    pub render_command: String,
    pub placement: ViewPlacement,
    pub selection: BranchSelection,
}

impl ViewSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            preview_base: config.preview_base.clone(),
            render_command: config.render_command.clone(),
            placement: config.placement,
            selection: BranchSelection::Current,
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Collaborators shared by every history request.
///
/// Built once at startup. The backing service lives as long as the context;
/// call [`HistoryContext::shutdown`] before exit to release it.
pub struct HistoryContext {
    pub workspace: Arc<dyn WorkspaceResolver>,
    pub repositories: Arc<dyn RepositoryServiceFactory>,
    pub server: Arc<dyn BackingService>,
    pub locale: Arc<dyn LocaleProvider>,
    pub store: Arc<dyn SessionStore>,
    pub prompt: Arc<dyn SelectionPrompt>,
    pub renderer: Arc<dyn Renderer>,
    pub editor: Arc<dyn EditorHost>,
    pub settings: ViewSettings,
}

impl HistoryContext {
    /// Wires the git CLI, the SQLite session store and the local server.
    /// The host supplies how it prompts, renders and tracks the active editor.
    pub fn from_config(
        config: &AppConfig,
        db: &Database,
        prompt: Arc<dyn SelectionPrompt>,
        renderer: Arc<dyn Renderer>,
        editor: Arc<dyn EditorHost>,
    ) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(db.session_repo());
        Ok(Self {
            workspace: Arc::new(ConfiguredWorkspaces::new(config.workspace_folders.clone())),
            repositories: Arc::new(GitCliFactory::new(config.root_scan_depth)?),
            server: Arc::new(LocalServer::new(config.server_host.clone(), store.clone())),
            locale: Arc::new(EnvLocale),
            store,
            prompt,
            renderer,
            editor,
            settings: ViewSettings::from_config(config),
        })
    }

    pub async fn shutdown(&self) {
        self.server.shutdown().await;
    }
}
