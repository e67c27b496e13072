//! Image store trait (port)

use async_trait::async_trait;

use crate::error::MenuError;

/// Binary storage for dish images, addressed by the reference string that
/// ends up in a node's `image` field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists `bytes`; `file_name` is the client-side name and only lends
    /// its extension. Returns the reference to store in the tree.
    async fn store_image(&self, file_name: &str, bytes: &[u8]) -> Result<String, MenuError>;

    async fn delete_image(&self, reference: &str) -> Result<(), MenuError>;
}
