//! fwstamp - firmware version stamping
//!
//! Two build-hook helpers: one turns `git describe` output into compiler
//! defines, the other renames finished firmware images into a dated,
//! versioned naming scheme.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,

    // All warnings must be fixed
    warnings,
)]
#![warn(
    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_enum_variant,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::too_many_arguments,
    clippy::type_complexity,

    // Best practices
    clippy::clone_on_ref_ptr,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::single_match_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]

pub mod api;
pub mod defaults;
pub mod describe;
pub mod exceptions;
pub mod exit_codes;
pub mod flags;
pub mod header;
pub mod logger;
pub mod renamer;
pub mod utils;
pub mod version;

// Re-export main API functions
pub use api::{
    FlagOptions, RenameOptions, RenameReport, inject_version_flags, rename_versioned_artifacts,
};
pub use describe::{Descriptor, FallbackReason, resolve_descriptor};
pub use exceptions::FwstampError;
pub use flags::BuildConfig;
pub use renamer::Variant;
