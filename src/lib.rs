pub mod browser;
pub mod config;
pub mod console;
pub mod converter;
pub mod error;
pub mod logging;
pub mod notice;
pub mod signals;
pub mod viewer;

pub use error::TriptychError;
pub use notice::{Notice, NoticeLevel};
