//! HTML template rendering handlers.

mod app;
mod demo;
mod index;
mod rows;

pub use app::app_handler;
pub use demo::demo_handler;
pub use index::index_handler;
