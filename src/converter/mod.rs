//! USD/EUR/RUB converter.
//!
//! Layout:
//! - `rates.rs`: currencies, the API response and the rate table
//! - `widget.rs`: the three synchronized fields and the re-entrancy guard
//! - `service.rs`: the one-shot HTTP fetch
//! - `app.rs`: the window wiring the converter to the shared signals

pub mod app;
pub mod rates;
pub mod service;
pub mod widget;

pub use app::ConverterApp;
pub use rates::{Currency, RateTable, RatesResponse};
pub use service::{build_client, fetch_rates};
pub use widget::{Converter, FieldTriple, FieldWrite, format_amount, parse_amount};
