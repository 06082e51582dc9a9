use std::fmt;

/// Catalog listing loaded into the first tab right after connecting.
pub const CATALOG_SQL: &str = "SELECT * FROM sqlite_master";

/// Table names, in catalog order. The first one feeds the column selector.
pub const TABLE_NAMES_SQL: &str = "SELECT name FROM sqlite_master WHERE type='table'";

/// Cheap read that fails when the file is not a SQLite database.
pub const PROBE_SQL: &str = "SELECT count(*) FROM sqlite_master";

/// One of the five result grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Tab1,
    Tab2,
    Tab3,
    Tab4,
    Tab5,
}

impl Surface {
    pub const ALL: [Surface; 5] = [
        Surface::Tab1,
        Surface::Tab2,
        Surface::Tab3,
        Surface::Tab4,
        Surface::Tab5,
    ];

    pub fn index(self) -> usize {
        match self {
            Surface::Tab1 => 0,
            Surface::Tab2 => 1,
            Surface::Tab3 => 2,
            Surface::Tab4 => 3,
            Surface::Tab5 => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Surface::Tab1 => "Tab1",
            Surface::Tab2 => "Tab2",
            Surface::Tab3 => "Tab3",
            Surface::Tab4 => "Tab4",
            Surface::Tab5 => "Tab5",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The fixed queries behind the browser's buttons and dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CannedQuery {
    ListNames,
    ColumnLimit10,
    FirstFiveTables,
    FirstThreeSchemas,
}

impl CannedQuery {
    pub const ALL: [CannedQuery; 4] = [
        CannedQuery::ListNames,
        CannedQuery::ColumnLimit10,
        CannedQuery::FirstFiveTables,
        CannedQuery::FirstThreeSchemas,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CannedQuery::ListNames => "list-names",
            CannedQuery::ColumnLimit10 => "column-limit-10",
            CannedQuery::FirstFiveTables => "first-5-tables",
            CannedQuery::FirstThreeSchemas => "first-3-schemas",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.id() == id.trim())
    }

    pub fn surface(self) -> Surface {
        match self {
            CannedQuery::ListNames => Surface::Tab2,
            CannedQuery::ColumnLimit10 => Surface::Tab3,
            CannedQuery::FirstFiveTables => Surface::Tab4,
            CannedQuery::FirstThreeSchemas => Surface::Tab5,
        }
    }

    /// SQL text for this query.
    ///
    /// `column-limit-10` pastes `column` and `table` into the statement as
    /// raw identifiers. Nothing is escaped: only point it at files you trust.
    pub fn sql(self, table: &str, column: &str) -> String {
        match self {
            CannedQuery::ListNames => "SELECT name FROM sqlite_master".to_string(),
            CannedQuery::ColumnLimit10 => format!("SELECT {column} FROM {table} LIMIT 10"),
            CannedQuery::FirstFiveTables => {
                "SELECT * FROM sqlite_master WHERE type='table' LIMIT 5".to_string()
            }
            CannedQuery::FirstThreeSchemas => {
                "SELECT sql FROM sqlite_master WHERE type='table' LIMIT 3".to_string()
            }
        }
    }
}

/// Quote an identifier for statements the browser builds itself.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_query_owns_a_distinct_tab() {
        let mut tabs: Vec<Surface> = CannedQuery::ALL.iter().map(|q| q.surface()).collect();
        tabs.push(Surface::Tab1);
        tabs.sort_by_key(|s| s.index());
        tabs.dedup();
        assert_eq!(tabs.len(), 5);
    }

    #[test]
    fn column_template_interpolates_identifiers() {
        assert_eq!(
            CannedQuery::ColumnLimit10.sql("users", "email"),
            "SELECT email FROM users LIMIT 10"
        );
        assert_eq!(
            CannedQuery::FirstThreeSchemas.sql("ignored", "ignored"),
            "SELECT sql FROM sqlite_master WHERE type='table' LIMIT 3"
        );
    }

    #[test]
    fn ids_round_trip() {
        for q in CannedQuery::ALL {
            assert_eq!(CannedQuery::from_id(q.id()), Some(q));
        }
        assert_eq!(CannedQuery::from_id("drop-everything"), None);
    }

    #[test]
    fn quote_ident_doubles_quotes() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
