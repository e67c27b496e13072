//! File-backed implementations of the menu-core storage ports.

pub mod json_file;
pub mod upload_dir;

pub use json_file::JsonFileRepository;
pub use upload_dir::{UploadDirImageStore, UploadsReport};
