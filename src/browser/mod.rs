//! SQLite browser: one connection, five result tabs, one column dropdown.
//!
//! Layout:
//! - `query.rs`: tabs and the fixed SQL behind each button
//! - `result.rs`: running a statement and turning its output into a grid
//! - `schema.rs`: first-table snapshot and the column dropdown
//! - `session.rs`: the connection state machine and UI handlers
//! - `demo.rs`: sample database used by `seed-demo-db` and the tests

pub mod demo;
pub mod query;
pub mod result;
pub mod schema;
pub mod session;

pub use query::{CannedQuery, Surface};
pub use result::{Cell, Grid, NO_DATA, QueryOutput, execute, render_result};
pub use schema::{COLUMN_PLACEHOLDER, ColumnSelector, SchemaSnapshot};
pub use session::{Browser, ConnectionState};
