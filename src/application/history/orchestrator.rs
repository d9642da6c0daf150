use super::coordinator::gather;
use super::fingerprint::session_id;
use super::root_resolver::{RootResolver, fallback_root, root_for_file};
use super::view_request::{build_address, build_title};
use crate::domain::{RenderRequest, RepositoryRoot, SessionState, ViewDescriptor, ViewRequest};
use crate::state::HistoryContext;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Opens a history view for `file` (and `line`), or for the whole workspace.
///
/// Returns `Ok(None)` when there is nothing to show: no workspace could be
/// resolved or the user dismissed the repository prompt. Any lookup or store
/// failure is returned as an error, and in that case no state is written and
/// nothing is rendered.
pub async fn show_history(
    ctx: &HistoryContext,
    file: Option<PathBuf>,
    line: Option<u32>,
) -> Result<Option<ViewDescriptor>> {
    let Some(workspace) = ctx.workspace.resolve(file.as_deref()).await else {
        log::debug!("No workspace folder for {:?}, nothing to show", file);
        return Ok(None);
    };

    let Some(root) = choose_root(ctx, &workspace, file.as_deref()).await? else {
        return Ok(None);
    };

    let service = ctx
        .repositories
        .create(&workspace, root.as_path())
        .await
        .with_context(|| format!("Failed to open repository {}", root))?;

    let results = gather(
        service.as_ref(),
        ctx.server.as_ref(),
        ctx.locale.as_ref(),
        &workspace,
    )
    .await?;

    if results.repository_root != root {
        log::debug!(
            "Repository root confirmed as {} (resolved {})",
            results.repository_root,
            root
        );
    }

    let selection = ctx.settings.selection;
    let id = session_id(
        results.server.port,
        selection,
        file.as_deref(),
        &results.repository_root,
    );

    let request = ViewRequest {
        id,
        workspace_folder: workspace,
        repository_root: results.repository_root.clone(),
        branch_name: results.branch_name.clone(),
        selection,
        file_path: file,
        line_number: line,
        locale: results.locale.clone(),
        server_port: results.server.port,
    };

    ctx.store
        .initialize(session_state(&request))
        .await
        .with_context(|| format!("Failed to store session {}", request.id))?;

    let descriptor = ViewDescriptor {
        id: request.id.clone(),
        address: build_address(&ctx.settings.preview_base, &request),
        title: build_title(&request, results.has_multiple_roots()),
    };

    log::info!("Opening {} ({})", descriptor.title, descriptor.id);
    ctx.renderer.render(RenderRequest {
        command: ctx.settings.render_command.clone(),
        address: descriptor.address.clone(),
        placement: ctx.settings.placement,
        title: descriptor.title.clone(),
    });

    Ok(Some(descriptor))
}

/// A file pins its root; otherwise the user picks among several.
async fn choose_root(
    ctx: &HistoryContext,
    workspace: &Path,
    file: Option<&Path>,
) -> Result<Option<RepositoryRoot>> {
    let hint = file.unwrap_or(workspace);
    let service = ctx
        .repositories
        .create(workspace, hint)
        .await
        .with_context(|| format!("Failed to open repository service for {}", workspace.display()))?;

    let candidates: Vec<RepositoryRoot> = service
        .list_roots(workspace)
        .await
        .context("Failed to list workspace repositories")?
        .into_iter()
        .map(RepositoryRoot::new)
        .collect();

    if let Some(root) = file.and_then(|file| root_for_file(&candidates, file)) {
        return Ok(Some(root));
    }

    if candidates.len() > 1 {
        return Ok(RootResolver::new(ctx.prompt.as_ref())
            .resolve(candidates, workspace)
            .await);
    }

    Ok(Some(fallback_root(&candidates, workspace)))
}

fn session_state(request: &ViewRequest) -> SessionState {
    SessionState {
        id: request.id.clone(),
        workspace_folder: request.workspace_folder.clone(),
        repository_root: request.repository_root.as_path().to_path_buf(),
        branch_name: request.branch_name.clone(),
        selection: request.selection,
        search_text: String::new(),
        file_path: request.file_path.clone(),
        line_number: request.line_number,
    }
}
