//! Persistence module split across logical submodules.

mod connection;
mod snapshot;

pub use connection::{data_dir, default_db_path, open_store, open_store_in_memory};
pub use snapshot::{
    load_or_default, persist, read_snapshot, write_snapshot, SnapshotError, SNAPSHOT_KEY,
};
