//! Storage traits (ports)

pub mod image_store;
pub mod menu_repository;

pub use image_store::ImageStore;
pub use menu_repository::MenuRepository;

#[cfg(test)]
pub use image_store::MockImageStore;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
