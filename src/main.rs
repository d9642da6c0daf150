//! githistory CLI entry point.
//!
//! Resolves the repository behind a file, a line or a workspace, stores the
//! session and prints the view request for a host to display.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use githistory::application::history::{BackingService, SelectionPrompt};
use githistory::commands::{view_branch_history, view_file_history, view_line_history};
use githistory::domain::{ActiveEditor, HistoryTarget, ViewDescriptor};
use githistory::infra::app_config::{AppConfig, load_config, load_config_strict};
use githistory::infra::db::Database;
use githistory::infra::editor::StaticEditor;
use githistory::infra::prompt::{NonInteractivePrompt, TerminalPrompt};
use githistory::infra::renderer::StdoutRenderer;
use githistory::state::HistoryContext;

#[derive(Parser, Debug)]
#[command(name = "githistory")]
#[command(version)]
#[command(about = "Open git history views for files, lines and workspaces", long_about = None)]
struct Args {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the data directory's config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep the history server running after the view is opened
    #[arg(long, global = true)]
    keep_serving: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// History of a file
    File {
        /// File to inspect
        path: Option<PathBuf>,
    },

    /// History of a single line
    Line {
        /// File containing the line
        path: PathBuf,
        /// 1-based line number
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
    },

    /// History of a repository in the workspace
    Branch {
        /// Workspace folder (overrides the configured folders)
        #[arg(short, long)]
        workspace: Option<PathBuf>,
    },

    /// Run the history server until interrupted
    Serve,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args).await {
        log::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "githistory=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config_strict(path)?,
        None => load_config(),
    };

    let editor = match &args.command {
        Commands::File { path: Some(path) } => Some(ActiveEditor::file(absolute(path)?, 0)),
        Commands::Line { path, line } => {
            Some(ActiveEditor::file(absolute(path)?, line.saturating_sub(1)))
        }
        _ => None,
    };
    if let Commands::Branch {
        workspace: Some(workspace),
    } = &args.command
    {
        config.workspace_folders = vec![absolute(workspace)?];
    }

    let db = Database::open().context("Failed to open session database")?;
    let prompt: Arc<dyn SelectionPrompt> = if std::io::stdin().is_terminal() {
        Arc::new(TerminalPrompt)
    } else {
        Arc::new(NonInteractivePrompt)
    };
    let ctx = HistoryContext::from_config(
        &config,
        &db,
        prompt,
        Arc::new(StdoutRenderer),
        Arc::new(StaticEditor::new(editor)),
    )?;

    let outcome = match args.command {
        Commands::File { path } => {
            let target = path
                .map(|path| absolute(&path).map(HistoryTarget::File))
                .transpose()?;
            view_file_history(&ctx, target).await
        }
        Commands::Line { .. } => view_line_history(&ctx).await,
        Commands::Branch { .. } => view_branch_history(&ctx).await,
        Commands::Serve => serve(&ctx, &config).await,
    };

    let shown = match outcome {
        Ok(shown) => shown,
        Err(err) => {
            ctx.shutdown().await;
            return Err(err);
        }
    };
    match shown {
        Some(view) if args.keep_serving => {
            log::info!("Serving session {}; press Ctrl-C to stop", view.id);
            tokio::signal::ctrl_c().await?;
        }
        Some(_) => {}
        None => log::debug!("Nothing to show"),
    }

    ctx.shutdown().await;
    Ok(())
}

async fn serve(ctx: &HistoryContext, config: &AppConfig) -> Result<Option<ViewDescriptor>> {
    let workspace = serve_workspace(config)?;
    let info = ctx.server.start(&workspace).await?;
    println!("{}", serde_json::to_string(&info)?);
    log::info!("History server on {}:{}; press Ctrl-C to stop", info.host, info.port);
    tokio::signal::ctrl_c().await?;
    Ok(None)
}

fn serve_workspace(config: &AppConfig) -> Result<PathBuf> {
    match config.workspace_folders.first() {
        Some(folder) => Ok(folder.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path {}", path.display()))
}
