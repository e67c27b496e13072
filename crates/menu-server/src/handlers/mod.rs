pub mod categories;
pub mod health;
pub mod items;
pub mod menu;
pub mod navigation;
pub mod upload;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
