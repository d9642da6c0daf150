//! Entry points that turn an invocation into an optional `(file, line)` pair
//! and hand it to the history orchestration.

use crate::application::history::show_history;
use crate::domain::{HistoryTarget, ViewDescriptor};
use crate::state::HistoryContext;
use anyhow::Result;
use std::path::PathBuf;

const FILE_SCHEME: &str = "file://";

/// History of one file.
///
/// The file comes from `target` when it names one, otherwise from the active
/// editor. Nothing is shown when there is no editor or its document was never
/// saved.
pub async fn view_file_history(
    ctx: &HistoryContext,
    target: Option<HistoryTarget>,
) -> Result<Option<ViewDescriptor>> {
    let file = match target.as_ref().and_then(target_file) {
        Some(file) => file,
        None => {
            let Some(file) = active_file(ctx) else {
                log::debug!("File history requested without a saved active file");
                return Ok(None);
            };
            file
        }
    };

    show_history(ctx, Some(file), None).await
}

/// History of the line where the active editor's selection starts.
pub async fn view_line_history(ctx: &HistoryContext) -> Result<Option<ViewDescriptor>> {
    let Some(editor) = ctx.editor.active_editor() else {
        log::debug!("Line history requested without an active editor");
        return Ok(None);
    };
    let Some(file) = editor.saved_file().map(|path| path.to_path_buf()) else {
        log::debug!("Line history requested for an untitled document");
        return Ok(None);
    };

    let Some(line) = editor.selection_start_line.checked_add(1) else {
        log::debug!("Selection line {} is out of range", editor.selection_start_line);
        return Ok(None);
    };
    show_history(ctx, Some(file), Some(line)).await
}

/// History of a whole repository in the workspace.
pub async fn view_branch_history(ctx: &HistoryContext) -> Result<Option<ViewDescriptor>> {
    show_history(ctx, None, None).await
}

/// File path named by a history target, if it names one.
pub fn target_file(target: &HistoryTarget) -> Option<PathBuf> {
    match target {
        HistoryTarget::CommitDetails(details) => details.target_path().map(PathBuf::from),
        HistoryTarget::TreeNode(node) => node.details.target_path().map(PathBuf::from),
        HistoryTarget::File(path) => Some(path.clone()),
        HistoryTarget::Resource(address) => resource_path(address),
        HistoryTarget::Unsupported(shape) => {
            log::debug!("Ignoring unsupported history target: {}", shape);
            None
        }
    }
}

fn resource_path(address: &str) -> Option<PathBuf> {
    if let Some(rest) = address.strip_prefix(FILE_SCHEME) {
        let decoded = urlencoding::decode(rest).ok()?;
        return Some(PathBuf::from(decoded.into_owned()));
    }
    if address.contains("://") {
        log::debug!("Ignoring non-file resource {}", address);
        return None;
    }
    Some(PathBuf::from(address))
}

fn active_file(ctx: &HistoryContext) -> Option<PathBuf> {
    ctx.editor
        .active_editor()
        .and_then(|editor| editor.saved_file().map(|path| path.to_path_buf()))
}
