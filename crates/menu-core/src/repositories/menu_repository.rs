//! Menu document repository trait (port)

use async_trait::async_trait;

use crate::domain::MenuCategory;
use crate::error::MenuError;

/// Whole-document storage of the menu tree. There are no partial updates:
/// every save replaces the stored document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn load_document(&self) -> Result<Vec<MenuCategory>, MenuError>;
    async fn save_document(&self, menu: &[MenuCategory]) -> Result<(), MenuError>;
}
