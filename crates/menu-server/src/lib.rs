//! # Menu Server
//!
//! HTTP surface of the menu editor: the admin API over [`menu_core`], the
//! public menu projection, image uploads, and the file-backed storage
//! adapters.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
pub mod storage;
pub mod utils;

pub use router::build_router;
pub use state::AppState;
