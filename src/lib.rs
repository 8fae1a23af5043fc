//! Bookshelf application library
//!
//! Entity modules (authors, books), the reducer-driven client, and the
//! bootstrap that wires them onto the kernel, database, and HTTP crates.

pub mod app;
pub mod client;
pub mod modules;
pub mod utils;

pub use app::App;
pub use modules::{authors::models::Author, books::models::Book};
