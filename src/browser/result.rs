use crate::error::TriptychError;
use crate::notice::Notice;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Column, Executor, Row, Statement, TypeInfo, ValueRef};
use std::fmt;
use tracing::{debug, error};

pub const NO_DATA: &str = "No data";

/// One value from a result row, by SQLite storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Real(v) => f.write_str(&format_real(*v)),
            Cell::Text(v) => f.write_str(v),
            Cell::Blob(bytes) => {
                f.write_str("x'")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                f.write_str("'")
            }
        }
    }
}

/// Shortest round-trip form with a signed, two-digit exponent (`1e-05`,
/// `1.5e+16`). Integral values keep their `.0`.
fn format_real(v: f64) -> String {
    let text = format!("{v:?}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Raw output of one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    /// Field names as reported by the driver; may be empty strings.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// A result grid as the user sees it: headers plus text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn clear(&mut self) {
        self.headers.clear();
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// True when the grid shows only the "No data" placeholder row.
    pub fn is_placeholder(&self) -> bool {
        self.rows.len() == 1 && self.cell(0, 0) == Some(NO_DATA)
    }
}

/// Run one statement and collect every row.
///
/// Column names come from the prepared statement, so they are known even
/// when no rows come back.
pub async fn execute(conn: &mut SqliteConnection, sql: &str) -> Result<QueryOutput, TriptychError> {
    debug!(sql, "executing query");
    let stmt = (&mut *conn).prepare(sql).await?;
    let columns: Vec<String> = stmt
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let rows = stmt.query().fetch_all(&mut *conn).await?;
    let rows = rows
        .iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| cell_at(row, i))
                .collect::<Result<Vec<Cell>, TriptychError>>()
        })
        .collect::<Result<Vec<Vec<Cell>>, TriptychError>>()?;
    debug!(columns = columns.len(), rows = rows.len(), "query finished");
    Ok(QueryOutput { columns, rows })
}

fn cell_at(row: &SqliteRow, index: usize) -> Result<Cell, TriptychError> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Cell::Null);
    }
    let storage = raw.type_info().name().to_string();
    let cell = match storage.as_str() {
        "INTEGER" => Cell::Integer(row.try_get_unchecked(index)?),
        "REAL" => Cell::Real(row.try_get_unchecked(index)?),
        "BLOB" => Cell::Blob(row.try_get_unchecked(index)?),
        _ => {
            let bytes: Vec<u8> = row.try_get_unchecked(index)?;
            Cell::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
    };
    Ok(cell)
}

/// Show a query outcome in `grid`.
///
/// - failure: one error notice, grid untouched
/// - no columns: one warning, grid emptied
/// - no rows: headers plus a single "No data" row
pub fn render_result(
    result: Result<QueryOutput, TriptychError>,
    grid: &mut Grid,
    notices: &mut Vec<Notice>,
) {
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            let msg = e.user_message();
            error!(error = %msg, "query failed");
            notices.push(Notice::error(
                "Query failed",
                format!("Could not execute the query:\n{msg}"),
            ));
            return;
        }
    };

    if output.columns.is_empty() {
        notices.push(Notice::warning("Warning", "The query returned no columns."));
        grid.clear();
        return;
    }

    grid.headers = output
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                format!("Column_{}", i + 1)
            } else {
                name.clone()
            }
        })
        .collect();

    grid.rows = output
        .rows
        .iter()
        .map(|row| row.iter().map(Cell::to_string).collect())
        .collect();

    if grid.rows.is_empty() {
        debug!("query returned no rows");
        let mut placeholder = vec![String::new(); grid.headers.len()];
        placeholder[0] = NO_DATA.to_string();
        grid.rows.push(placeholder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;

    fn output(columns: &[&str], rows: Vec<Vec<Cell>>) -> QueryOutput {
        QueryOutput {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn nulls_render_as_literal_null() {
        let mut grid = Grid::default();
        let mut notices = Vec::new();
        let out = output(
            &["id", "name"],
            vec![
                vec![Cell::Integer(1), Cell::Text("a".into())],
                vec![Cell::Integer(2), Cell::Null],
            ],
        );
        render_result(Ok(out), &mut grid, &mut notices);

        assert!(notices.is_empty());
        assert_eq!(grid.headers, vec!["id", "name"]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(0, 1), Some("a"));
        assert_eq!(grid.cell(1, 0), Some("2"));
        assert_eq!(grid.cell(1, 1), Some("NULL"));
    }

    #[test]
    fn zero_rows_show_one_placeholder_row() {
        let mut grid = Grid::default();
        let mut notices = Vec::new();
        render_result(Ok(output(&["a", "b", "c"], vec![])), &mut grid, &mut notices);

        assert_eq!(grid.rows, vec![vec!["No data", "", ""]]);
        assert!(grid.is_placeholder());
        assert!(notices.is_empty());
    }

    #[test]
    fn zero_columns_warn_and_empty_the_grid() {
        let mut grid = Grid {
            headers: vec!["old".into()],
            rows: vec![vec!["stale".into()]],
        };
        let mut notices = Vec::new();
        render_result(Ok(QueryOutput::default()), &mut grid, &mut notices);

        assert!(grid.is_empty());
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn failure_leaves_grid_untouched() {
        let before = Grid {
            headers: vec!["name".into()],
            rows: vec![vec!["users".into()]],
        };
        let mut grid = before.clone();
        let mut notices = Vec::new();
        render_result(Err(TriptychError::NotConnected), &mut grid, &mut notices);

        assert_eq!(grid, before);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].text.contains("No open database connection"));
    }

    #[test]
    fn empty_field_names_fall_back_to_column_n() {
        let mut grid = Grid::default();
        let mut notices = Vec::new();
        let out = output(
            &["", "x", " "],
            vec![vec![Cell::Real(1.5), Cell::Real(2.0), Cell::Blob(vec![0, 255])]],
        );
        render_result(Ok(out), &mut grid, &mut notices);

        assert_eq!(grid.headers, vec!["Column_1", "x", " "]);
        assert_eq!(grid.rows[0], vec!["1.5", "2.0", "x'00ff'"]);
    }

    #[test]
    fn reals_use_signed_two_digit_exponents() {
        let shown: Vec<String> = [2.0, 1.5, 0.0001, 1e-5, -2.5e-7, 1e16, 1.5e20]
            .into_iter()
            .map(|v| Cell::Real(v).to_string())
            .collect();
        assert_eq!(
            shown,
            vec!["2.0", "1.5", "0.0001", "1e-05", "-2.5e-07", "1e+16", "1.5e+20"]
        );
    }
}
