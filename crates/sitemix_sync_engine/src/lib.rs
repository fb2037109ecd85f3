//! # sitemix sync engine
//!
//! Moves selected content entities between a live site and its staged
//! configuration.
//!
//! This crate provides:
//! - Export transform: live entities → staged snapshots
//! - Import transform: staged snapshots checked against the sync list
//! - Generation of missing content with bounded retry for forward references
//! - User-visible message collection
//!
//! ## Generation
//!
//! Identifiers are processed from a FIFO queue. When an entity cannot be
//! created because something it references does not exist yet, it is put
//! back at the tail of the queue so a later pass can create it once its
//! dependency exists. Each identifier gets at most
//! [`GenerateConfig::max_attempts`] tries before it is abandoned with a
//! warning.
//!
//! ## Key Invariants
//!
//! - Existing live entities are never overwritten
//! - Unparsable or unsupported identifiers are skipped, never errors
//! - Writes follow the order of the sync list; there is no rollback
//! - Only "referenced entity not found" failures are retried

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod messenger;
mod report;

pub use config::GenerateConfig;
pub use engine::ContentSyncEngine;
pub use error::{SyncError, SyncResult};
pub use messenger::{Message, MessageLevel, MessageLog, Messenger};
pub use report::{ExportReport, GenerateReport, ImportReport, SkipReason, Skipped};
