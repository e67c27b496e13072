//! # Menu Core
//!
//! Domain entities, tree operations, storage ports and the menu service for
//! the restaurant menu editor.
//!
//! The menu document is an ordered list of [`MenuCategory`] values, each
//! holding an ordered list of [`MenuItem`] nodes that may themselves be
//! subcategories with their own `items`. Every tree operation in [`tree`] is a
//! pure function from one snapshot to a new one; [`services::MenuService`]
//! pairs those operations with a whole-document save.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod slug;
pub mod tree;

pub use domain::*;
pub use error::MenuError;
pub use slug::generate_slug;
