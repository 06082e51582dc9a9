use super::query::{TABLE_NAMES_SQL, quote_ident};
use crate::error::TriptychError;
use sqlx::Row;
use sqlx::sqlite::SqliteConnection;

pub const COLUMN_PLACEHOLDER: &str = "Select a column...";

/// First table in the catalog and its column names, read at connect time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    pub table: Option<String>,
    pub columns: Vec<String>,
}

impl SchemaSnapshot {
    pub async fn load(conn: &mut SqliteConnection) -> Result<Self, TriptychError> {
        let table: Option<String> = sqlx::query_scalar(TABLE_NAMES_SQL)
            .fetch_optional(&mut *conn)
            .await?;
        let Some(table) = table else {
            return Ok(Self::default());
        };

        let pragma = format!("PRAGMA table_info({})", quote_ident(&table));
        let columns = sqlx::query(&pragma)
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|name| !name.is_empty())
            .collect();

        Ok(Self {
            table: Some(table),
            columns,
        })
    }
}

/// The column dropdown: a placeholder entry followed by column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelector {
    items: Vec<String>,
    current: usize,
}

impl Default for ColumnSelector {
    fn default() -> Self {
        Self {
            items: vec![COLUMN_PLACEHOLDER.to_string()],
            current: 0,
        }
    }
}

impl ColumnSelector {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_columns(&mut self, columns: &[String]) {
        self.reset();
        self.items.extend(columns.iter().cloned());
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_text(&self) -> &str {
        &self.items[self.current]
    }

    /// Move the selection. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().skip(1).position(|c| c == name).map(|i| i + 1)
    }

    /// The chosen column, or `None` for the placeholder or a blank entry.
    pub fn selected(&self) -> Option<&str> {
        let text = self.current_text();
        if self.current == 0 || text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_starts_on_placeholder() {
        let sel = ColumnSelector::default();
        assert_eq!(sel.items(), &[COLUMN_PLACEHOLDER.to_string()]);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn set_columns_keeps_placeholder_first() {
        let mut sel = ColumnSelector::default();
        sel.set_columns(&["id".to_string(), "name".to_string()]);
        assert_eq!(sel.items().len(), 3);
        assert_eq!(sel.position("name"), Some(2));
        assert!(sel.select(2));
        assert_eq!(sel.selected(), Some("name"));
        assert!(!sel.select(9));
        assert_eq!(sel.selected(), Some("name"));

        sel.reset();
        assert_eq!(sel.selected(), None);
        assert_eq!(sel.items().len(), 1);
    }
}
