// src/core/mod.rs
//! Core services shared by the web flow and the CLI

pub mod converter;
pub mod fs_ops;
pub mod session;

pub use converter::{converter_from_config, CommandConverter, DocumentConverter, ServiceConverter};
pub use fs_ops::{FsOps, ImageStore, LocalImageStore};
pub use session::{SessionState, SessionStore};
