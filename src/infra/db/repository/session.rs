use super::DbConn;
use crate::application::history::SessionStore;
use crate::domain::{BranchSelection, SessionRecord, SessionState};
use anyhow::Result;
use async_trait::async_trait;
use rusqlite::OptionalExtension;
use std::path::PathBuf;
use std::str::FromStr;

pub struct SessionRepository {
    conn: DbConn,
}

impl SessionRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Replaces every column of the row for `state.id`.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO sessions (id, workspace_folder, repository_root, branch_name, selection, search_text, file_path, line_number, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            (
                &state.id,
                state.workspace_folder.to_string_lossy().as_ref(),
                state.repository_root.to_string_lossy().as_ref(),
                &state.branch_name,
                state.selection.to_string(),
                &state.search_text,
                state
                    .file_path
                    .as_ref()
                    .map(|path| path.to_string_lossy().into_owned()),
                state.line_number,
                chrono::Utc::now().to_rfc3339(),
            ),
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<SessionRecord>> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT id, workspace_folder, repository_root, branch_name, selection, search_text, file_path, line_number, updated_at FROM sessions WHERE id = ?1",
                [id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, Option<String>>(6)?,
                        row.get::<_, Option<u32>>(7)?,
                        row.get::<_, String>(8)?,
                    ))
                },
            )
            .optional()?;

        let Some((
            id,
            workspace_folder,
            repository_root,
            branch_name,
            selection,
            search_text,
            file_path,
            line_number,
            updated_at,
        )) = row
        else {
            return Ok(None);
        };

        let selection = BranchSelection::from_str(&selection).unwrap_or_else(|err| {
            log::warn!("{}; reading session {} as current", err, id);
            BranchSelection::Current
        });

        Ok(Some(SessionRecord {
            state: SessionState {
                id,
                workspace_folder: PathBuf::from(workspace_folder),
                repository_root: PathBuf::from(repository_root),
                branch_name,
                selection,
                search_text,
                file_path: file_path.map(PathBuf::from),
                line_number,
            },
            updated_at,
        }))
    }

    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn initialize(&self, state: SessionState) -> Result<()> {
        self.save(&state)?;
        log::debug!("Stored session {}", state.id);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<SessionRecord>> {
        self.find_by_id(id)
    }
}
