use crate::application::history::WorkspaceResolver;
use crate::domain::normalize_path;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Workspace folders from the config file, or the current directory.
pub struct ConfiguredWorkspaces {
    folders: Vec<PathBuf>,
}

impl ConfiguredWorkspaces {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        let folders = if folders.is_empty() {
            std::env::current_dir().into_iter().collect()
        } else {
            folders
        };
        Self::from_folders(folders)
    }

    pub fn from_folders(folders: Vec<PathBuf>) -> Self {
        Self {
            folders: folders.iter().map(|folder| normalize_path(folder)).collect(),
        }
    }

    fn folder_for(&self, hint: &Path) -> Option<PathBuf> {
        let hint = normalize_path(hint);
        self.folders
            .iter()
            .filter(|folder| hint.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .cloned()
    }
}

#[async_trait]
impl WorkspaceResolver for ConfiguredWorkspaces {
    async fn resolve(&self, path_hint: Option<&Path>) -> Option<PathBuf> {
        match path_hint {
            Some(hint) => self.folder_for(hint),
            None => self.folders.first().cloned(),
        }
    }
}
