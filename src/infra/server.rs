//! Local history server.
//!
//! Rendering surfaces connect to the port handed out in view addresses and
//! look session state up by id: the client writes one line holding the id,
//! the server answers with the JSON record (or `null`) and closes.

use crate::application::history::{BackingService, SessionStore};
use crate::domain::{ServerError, ServerInfo};
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Longest id line a client may send.
const MAX_LOOKUP_LINE: u64 = 4096;
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

pub struct LocalServer {
    host: String,
    store: Arc<dyn SessionStore>,
    info: OnceCell<ServerInfo>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LocalServer {
    pub fn new(host: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            host: host.into(),
            store,
            info: OnceCell::new(),
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    pub fn info(&self) -> Option<&ServerInfo> {
        self.info.get()
    }

    async fn bind(&self) -> Result<ServerInfo> {
        let listener = TcpListener::bind((self.host.as_str(), 0))
            .await
            .map_err(|source| ServerError::Bind {
                host: self.host.clone(),
                source,
            })?;
        let port = listener.local_addr()?.port();

        let handle = tokio::spawn(accept_loop(
            listener,
            self.store.clone(),
            self.cancel.clone(),
        ));
        *self.task.lock() = Some(handle);

        log::info!("History server listening on {}:{}", self.host, port);
        Ok(ServerInfo {
            host: self.host.clone(),
            port,
        })
    }
}

#[async_trait]
impl BackingService for LocalServer {
    async fn start(&self, workspace: &Path) -> Result<ServerInfo> {
        if self.cancel.is_cancelled() {
            return Err(ServerError::Stopped.into());
        }
        let info = self.info.get_or_try_init(|| self.bind()).await?;
        log::debug!(
            "History server on port {} serving {}",
            info.port,
            workspace.display()
        );
        Ok(info.clone())
    }

    async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.task.lock().take();
        if let Some(handle) = handle
            && let Err(err) = handle.await
        {
            log::warn!("History server task ended abnormally: {}", err);
        }
    }
}

impl Drop for LocalServer {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }
}

async fn accept_loop(listener: TcpListener, store: Arc<dyn SessionStore>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    log::debug!("History client connected from {}", peer);
                    let store = store.clone();
                    tokio::spawn(async move {
                        if let Err(err) = serve_lookup(stream, store).await {
                            log::warn!("History lookup failed: {}", err);
                        }
                    });
                }
                Err(err) => log::warn!("Failed to accept history client: {}", err),
            },
        }
    }
    log::debug!("History server stopped");
}

async fn serve_lookup(stream: TcpStream, store: Arc<dyn SessionStore>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let id = tokio::time::timeout(LOOKUP_TIMEOUT, read_lookup_id(reader)).await??;

    let record = store.get(&id).await?;
    let mut payload = serde_json::to_vec(&record)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.shutdown().await?;
    Ok(())
}

async fn read_lookup_id<R: AsyncRead + Unpin>(reader: R) -> std::io::Result<String> {
    let mut line = String::new();
    BufReader::new(reader.take(MAX_LOOKUP_LINE))
        .read_line(&mut line)
        .await?;
    Ok(line.trim().to_string())
}
