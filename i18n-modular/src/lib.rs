#![forbid(unsafe_code)]
//! Keeps modular per-component translation files and flat per-language
//! dictionaries in sync.
//!
//! A *module file* lives next to the component it translates and holds that
//! component's strings for every language. A *dictionary file* holds every
//! string for one language, keyed by a reversible `module:` identifier, in a
//! shape translation tools can import. The engine converts between the two
//! without losing hand-authored dictionary entries, and emits canonically
//! sorted JSON so repeated runs are byte-identical.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use i18n_modular::{PartialOptions, build, update};
//! use std::path::Path;
//!
//! let options = PartialOptions {
//!     dictionary_pattern: Some("locales/[locale_code].json".into()),
//!     ..PartialOptions::default()
//! }
//! .resolve(Path::new("/project"))?;
//!
//! // Modules -> dictionaries
//! let report = build(&options)?;
//! println!("built {} dictionaries", report.languages);
//!
//! // Dictionaries -> modules
//! update(&options)?;
//! # Ok::<(), i18n_modular::Error>(())
//! ```
//!
//! # Operations
//!
//! - **build**: collect every module's trees per language, overlay them on
//!   the existing dictionaries' seed entries, write sorted dictionaries.
//! - **update**: push edited dictionary entries back into the module files
//!   they were generated from, skipping identifiers whose module was
//!   deleted.
//! - **clean**: strip generated entries from dictionaries, leaving only
//!   seed keys for export to an external translation tool.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod id;
pub mod module;
pub mod sort;
pub mod sync;

// Re-export most used types for easy consumption
pub use crate::{
    config::{PartialOptions, SyncOptions},
    error::Error,
    id::{ID_PREFIX, decode_module_id, encode_module_id},
    sync::{BuildReport, CleanReport, UpdateReport, build, clean, update},
};
