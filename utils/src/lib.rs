//! Shared infrastructure utilities for Parkir.
//!
//! - **`atomic_write`**: Crash-safe file replacement (temp + rename) used for
//!   the transaction history and the configuration file.

pub mod atomic_write;

pub use atomic_write::{
    Durability, atomic_write, atomic_write_with, backup_path, recover_bak_file,
};
