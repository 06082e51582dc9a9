use super::query::{CATALOG_SQL, CannedQuery, PROBE_SQL, Surface};
use super::result::{Grid, execute, render_result};
use super::schema::{ColumnSelector, SchemaSnapshot};
use crate::error::TriptychError;
use crate::notice::Notice;
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Closed,
    Open,
}

/// The browser window's state: one optional connection, five grids and the
/// column dropdown.
///
/// Every handler returns the notices the front end must show, in order.
#[derive(Debug, Default)]
pub struct Browser {
    conn: Option<SqliteConnection>,
    path: Option<PathBuf>,
    grids: [Grid; 5],
    selector: ColumnSelector,
    snapshot: SchemaSnapshot,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        if self.conn.is_some() {
            ConnectionState::Open
        } else {
            ConnectionState::Closed
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn grid(&self, surface: Surface) -> &Grid {
        &self.grids[surface.index()]
    }

    pub fn selector(&self) -> &ColumnSelector {
        &self.selector
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    /// "Set connection": drop the current handle, then open `path`.
    ///
    /// An empty path means the file dialog was cancelled and does nothing.
    pub async fn open_connection(&mut self, path: &Path) -> Vec<Notice> {
        let mut notices = Vec::new();
        if path.as_os_str().is_empty() {
            return notices;
        }
        self.disconnect().await;

        let conn = match connect(path).await {
            Ok(conn) => conn,
            Err(e) => {
                let msg = e.user_message();
                warn!(path = %path.display(), error = %msg, "failed to open database");
                notices.push(Notice::error(
                    "Error",
                    format!("Could not connect: {msg}"),
                ));
                return notices;
            }
        };
        info!(path = %path.display(), "database connection established");
        self.conn = Some(conn);
        self.path = Some(path.to_path_buf());
        notices.push(Notice::info("Success", "Connection established."));

        self.load_catalog(&mut notices).await;
        self.refresh_selector().await;
        notices
    }

    /// "Close connection". Safe to call when nothing is open.
    pub async fn close_connection(&mut self) -> Vec<Notice> {
        let was_open = self.conn.is_some();
        self.disconnect().await;
        if was_open {
            vec![Notice::info("Information", "Connection closed.")]
        } else {
            Vec::new()
        }
    }

    /// Run one of the fixed queries into its tab.
    pub async fn run_canned_query(&mut self, query: CannedQuery) -> Vec<Notice> {
        let mut notices = Vec::new();
        let Some(conn) = self.conn.as_mut() else {
            notices.push(Notice::warning("Warning", "Set a connection first!"));
            return notices;
        };

        let sql = match query {
            CannedQuery::ColumnLimit10 => {
                let Some(table) = self.snapshot.table.as_deref() else {
                    notices.push(Notice::warning("Warning", "No table selected for the query."));
                    return notices;
                };
                let Some(column) = self.selector.selected() else {
                    notices.push(Notice::warning("Warning", "No column selected."));
                    return notices;
                };
                query.sql(table, column)
            }
            _ => query.sql("", ""),
        };

        debug!(query = query.id(), surface = %query.surface(), "running canned query");
        let result = execute(conn, &sql).await;
        render_result(
            result,
            &mut self.grids[query.surface().index()],
            &mut notices,
        );
        notices
    }

    /// The user picked dropdown entry `index`.
    ///
    /// A real column runs `column-limit-10` straight away; the placeholder,
    /// a blank entry or a closed connection do nothing.
    pub async fn select_column(&mut self, index: usize) -> Vec<Notice> {
        if !self.selector.select(index) || self.selector.selected().is_none() || self.conn.is_none()
        {
            return Vec::new();
        }
        self.run_canned_query(CannedQuery::ColumnLimit10).await
    }

    async fn load_catalog(&mut self, notices: &mut Vec<Notice>) {
        let Some(conn) = self.conn.as_mut() else {
            return;
        };
        let result = execute(conn, CATALOG_SQL).await;
        render_result(result, &mut self.grids[Surface::Tab1.index()], notices);
    }

    async fn refresh_selector(&mut self) {
        let Some(conn) = self.conn.as_mut() else {
            return;
        };
        match SchemaSnapshot::load(conn).await {
            Ok(snapshot) => {
                debug!(
                    table = snapshot.table.as_deref().unwrap_or("<none>"),
                    columns = snapshot.columns.len(),
                    "schema snapshot refreshed"
                );
                self.selector.set_columns(&snapshot.columns);
                self.snapshot = snapshot;
            }
            Err(e) => {
                warn!(error = %e, "failed to read table columns");
                self.selector.reset();
                self.snapshot = SchemaSnapshot::default();
            }
        }
    }

    async fn disconnect(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = conn.close().await {
                warn!(error = %e, "error while closing database");
            }
            info!(
                path = %self.path.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
                "database connection closed"
            );
        }
        self.path = None;
        for grid in self.grids.iter_mut() {
            grid.clear();
        }
        self.selector.reset();
        self.snapshot = SchemaSnapshot::default();
    }
}

/// Open an existing file read/write and make sure it really is a database.
async fn connect(path: &Path) -> Result<SqliteConnection, TriptychError> {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false);
    let mut conn = SqliteConnection::connect_with(&opts).await?;
    if let Err(e) = sqlx::query(PROBE_SQL).fetch_one(&mut conn).await {
        let _ = conn.close().await;
        return Err(e.into());
    }
    Ok(conn)
}
