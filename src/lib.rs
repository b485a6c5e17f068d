//! Library crate for userdir-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Remote user directory client (`api`)
//! - Application state, config files and update loop (`app`)
//! - Command-line arguments (`cli`)
//! - List and form controllers (`controller`)
//! - Error and result types (`error`)
//! - User records, drafts and field errors (`model`)
//! - In-memory search helpers (`search`)
//! - Notification and navigation sinks (`sinks`)
//! - UI rendering and widgets (`ui`)
//! - Form validation rules (`validation`)
//!
//! It is used by the `userdir-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod cli;
pub mod controller;
pub mod error;
pub mod model;
pub mod search;
pub mod sinks;
pub mod ui;
pub mod validation;

// Re-export commonly used items at the crate root for convenience
pub use api::{HttpUserClient, UserApi};
/// Error and result types shared by the client and controllers.
pub use error::{ApiError, ApiResult};
pub use model::{Draft, Field, FieldErrors, User, UserId, UserPayload};
