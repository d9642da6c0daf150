//! In-memory collaborators for unit tests.

use crate::application::history::{
    BackingService, EditorHost, LocaleProvider, Renderer, RepositoryService,
    RepositoryServiceFactory, SelectionPrompt, SessionStore, WorkspaceResolver, root_for_file,
};
use crate::domain::{
    ActiveEditor, PromptOptions, RenderRequest, RepositoryRoot, SelectionItem, ServerInfo,
    SessionRecord, SessionState,
};
use crate::state::{HistoryContext, ViewSettings};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct ScriptedPrompt {
    choice: Option<usize>,
    shown: Mutex<Vec<Vec<SelectionItem>>>,
}

impl ScriptedPrompt {
    pub fn choosing(choice: Option<usize>) -> Self {
        Self {
            choice,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.shown.lock().len()
    }

    pub fn last_items(&self) -> Vec<SelectionItem> {
        self.shown.lock().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl SelectionPrompt for ScriptedPrompt {
    async fn select_one(
        &self,
        items: Vec<SelectionItem>,
        _options: PromptOptions,
    ) -> Option<usize> {
        self.shown.lock().push(items);
        self.choice
    }
}

#[derive(Clone)]
pub struct FakeRepository {
    root: PathBuf,
    branch: String,
    roots: Vec<PathBuf>,
    fail_branch: bool,
}

impl FakeRepository {
    pub fn new(root: &str, branch: &str, roots: &[&str]) -> Self {
        Self {
            root: PathBuf::from(root),
            branch: branch.to_string(),
            roots: roots.iter().map(PathBuf::from).collect(),
            fail_branch: false,
        }
    }

    pub fn failing_branch(mut self) -> Self {
        self.fail_branch = true;
        self
    }
}

#[async_trait]
impl RepositoryService for FakeRepository {
    async fn list_roots(&self, _path: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.roots.clone())
    }

    async fn current_root(&self) -> Result<PathBuf> {
        Ok(self.root.clone())
    }

    async fn current_branch(&self) -> Result<String> {
        if self.fail_branch {
            return Err(anyhow!("branch lookup exploded"));
        }
        Ok(self.branch.clone())
    }
}

/// Hands out repositories bound to the deepest known root containing the hint.
pub struct FakeRepositoryFactory {
    pub roots: Vec<PathBuf>,
    pub branch: String,
    pub fail_branch: bool,
    pub canonical_root: Option<PathBuf>,
    pub hints: Mutex<Vec<PathBuf>>,
}

impl FakeRepositoryFactory {
    pub fn new(roots: &[&str]) -> Self {
        Self {
            roots: roots.iter().map(PathBuf::from).collect(),
            branch: "main".to_string(),
            fail_branch: false,
            canonical_root: None,
            hints: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RepositoryServiceFactory for FakeRepositoryFactory {
    async fn create(
        &self,
        workspace: &Path,
        path_hint: &Path,
    ) -> Result<Arc<dyn RepositoryService>> {
        self.hints.lock().push(path_hint.to_path_buf());
        let candidates: Vec<RepositoryRoot> =
            self.roots.iter().map(RepositoryRoot::new).collect();
        let root = self.canonical_root.clone().unwrap_or_else(|| {
            root_for_file(&candidates, path_hint)
                .map(RepositoryRoot::into_path_buf)
                .unwrap_or_else(|| workspace.to_path_buf())
        });
        Ok(Arc::new(FakeRepository {
            root,
            branch: self.branch.clone(),
            roots: self.roots.clone(),
            fail_branch: self.fail_branch,
        }))
    }
}

pub struct FakeServer {
    port: Option<u16>,
    starts: AtomicUsize,
}

impl FakeServer {
    pub fn new(port: u16) -> Self {
        Self {
            port: Some(port),
            starts: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            port: None,
            starts: AtomicUsize::new(0),
        }
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingService for FakeServer {
    async fn start(&self, _workspace: &Path) -> Result<ServerInfo> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        let port = self.port.ok_or_else(|| anyhow!("port unavailable"))?;
        Ok(ServerInfo {
            host: "127.0.0.1".to_string(),
            port,
        })
    }

    async fn shutdown(&self) {}
}

pub struct FakeLocale(String);

impl FakeLocale {
    pub fn new(locale: &str) -> Self {
        Self(locale.to_string())
    }
}

#[async_trait]
impl LocaleProvider for FakeLocale {
    async fn detect(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    states: Mutex<HashMap<String, SessionState>>,
    writes: AtomicUsize,
    pub fail: bool,
}

impl MemoryStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn state(&self, id: &str) -> Option<SessionState> {
        self.states.lock().get(id).cloned()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn initialize(&self, state: SessionState) -> Result<()> {
        if self.fail {
            return Err(anyhow!("disk full"));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.states.lock().insert(state.id.clone(), state);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<SessionRecord>> {
        Ok(self.state(id).map(|state| SessionRecord {
            state,
            updated_at: "now".to_string(),
        }))
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    requests: Mutex<Vec<RenderRequest>>,
}

impl RecordingRenderer {
    pub fn requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, request: RenderRequest) {
        self.requests.lock().push(request);
    }
}

pub struct FixedWorkspace(pub Option<PathBuf>);

#[async_trait]
impl WorkspaceResolver for FixedWorkspace {
    async fn resolve(&self, _path_hint: Option<&Path>) -> Option<PathBuf> {
        self.0.clone()
    }
}

pub struct FixedEditor(pub Option<ActiveEditor>);

impl EditorHost for FixedEditor {
    fn active_editor(&self) -> Option<ActiveEditor> {
        self.0.clone()
    }
}

/// A fully faked context whose collaborators stay inspectable.
pub struct Harness {
    pub workspace: Option<PathBuf>,
    pub factory: Arc<FakeRepositoryFactory>,
    pub server: Arc<FakeServer>,
    pub store: Arc<MemoryStore>,
    pub prompt: Arc<ScriptedPrompt>,
    pub renderer: Arc<RecordingRenderer>,
    pub editor: Option<ActiveEditor>,
    pub locale: String,
}

impl Harness {
    pub fn new(workspace: &str, roots: &[&str]) -> Self {
        Self {
            workspace: Some(PathBuf::from(workspace)),
            factory: Arc::new(FakeRepositoryFactory::new(roots)),
            server: Arc::new(FakeServer::new(9000)),
            store: Arc::new(MemoryStore::default()),
            prompt: Arc::new(ScriptedPrompt::choosing(Some(0))),
            renderer: Arc::new(RecordingRenderer::default()),
            editor: None,
            locale: "en-US".to_string(),
        }
    }

    pub fn without_workspace(mut self) -> Self {
        self.workspace = None;
        self
    }

    pub fn with_editor(mut self, editor: ActiveEditor) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    pub fn with_prompt_choice(mut self, choice: Option<usize>) -> Self {
        self.prompt = Arc::new(ScriptedPrompt::choosing(choice));
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.factory_mut().branch = branch.to_string();
        self
    }

    pub fn with_failing_branch(mut self) -> Self {
        self.factory_mut().fail_branch = true;
        self
    }

    pub fn with_canonical_root(mut self, root: &str) -> Self {
        self.factory_mut().canonical_root = Some(PathBuf::from(root));
        self
    }

    pub fn with_failing_server(mut self) -> Self {
        self.server = Arc::new(FakeServer::failing());
        self
    }

    pub fn with_failing_store(mut self) -> Self {
        self.store = Arc::new(MemoryStore {
            fail: true,
            ..MemoryStore::default()
        });
        self
    }

    fn factory_mut(&mut self) -> &mut FakeRepositoryFactory {
        Arc::get_mut(&mut self.factory).expect("factory is shared before the context is built")
    }

    pub fn context(&self) -> HistoryContext {
        HistoryContext {
            workspace: Arc::new(FixedWorkspace(self.workspace.clone())),
            repositories: self.factory.clone(),
            server: self.server.clone(),
            locale: Arc::new(FakeLocale::new(&self.locale)),
            store: self.store.clone(),
            prompt: self.prompt.clone(),
            renderer: self.renderer.clone(),
            editor: Arc::new(FixedEditor(self.editor.clone())),
            settings: ViewSettings {
                preview_base: "githistory://authority/git-history".to_string(),
                ..ViewSettings::default()
            },
        }
    }
}
