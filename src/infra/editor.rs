use crate::application::history::EditorHost;
use crate::domain::ActiveEditor;

/// Editor state fixed at startup, e.g. from command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct StaticEditor {
    active: Option<ActiveEditor>,
}

impl StaticEditor {
    pub fn new(active: Option<ActiveEditor>) -> Self {
        Self { active }
    }
}

impl EditorHost for StaticEditor {
    fn active_editor(&self) -> Option<ActiveEditor> {
        self.active.clone()
    }
}
