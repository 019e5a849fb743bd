pub mod blob;
pub mod config;
pub mod files;
pub mod store;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use config::{config_file, load_config, save_config, AppConfig};
pub use files::{ensure_dir, get_data_dir, init_local_data_dir, log_file};
pub use store::{TaskStore, DEFAULT_STORAGE_KEY};
