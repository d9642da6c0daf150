use super::traits::SelectionPrompt;
use crate::domain::{PromptOptions, RepositoryRoot, SelectionItem};
use std::path::Path;

const PICK_REPOSITORY_PLACEHOLDER: &str = "Select a repository";

/// Picks one repository root out of the roots found in a workspace.
pub struct RootResolver<'a> {
    prompt: &'a dyn SelectionPrompt,
}

impl<'a> RootResolver<'a> {
    pub fn new(prompt: &'a dyn SelectionPrompt) -> Self {
        Self { prompt }
    }

    /// Returns `None` when the user dismissed the prompt.
    pub async fn resolve(
        &self,
        candidates: Vec<RepositoryRoot>,
        workspace: &Path,
    ) -> Option<RepositoryRoot> {
        if candidates.len() <= 1 {
            return Some(fallback_root(&candidates, workspace));
        }

        let items = candidates.iter().map(selection_item).collect();
        let options = PromptOptions {
            placeholder: PICK_REPOSITORY_PLACEHOLDER.to_string(),
            match_on_detail: true,
        };

        let Some(index) = self.prompt.select_one(items, options).await else {
            log::debug!("Repository selection dismissed");
            return None;
        };

        let chosen = candidates.into_iter().nth(index);
        if chosen.is_none() {
            log::warn!("Repository prompt returned out-of-range index {}", index);
        }
        chosen
    }
}

/// Root used when there is nothing to choose between: the only candidate, or
/// the workspace folder itself when no repository was found.
pub fn fallback_root(candidates: &[RepositoryRoot], workspace: &Path) -> RepositoryRoot {
    candidates
        .first()
        .cloned()
        .unwrap_or_else(|| RepositoryRoot::new(workspace))
}

/// Deepest candidate containing `file`, if any.
pub fn root_for_file(candidates: &[RepositoryRoot], file: &Path) -> Option<RepositoryRoot> {
    candidates
        .iter()
        .filter(|root| root.contains(file))
        .max_by_key(|root| root.as_path().components().count())
        .cloned()
}

fn selection_item(root: &RepositoryRoot) -> SelectionItem {
    SelectionItem {
        label: root.basename(),
        detail: root.to_string(),
    }
}
