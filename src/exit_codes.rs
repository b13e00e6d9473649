//! Standard exit codes for fwstamp binaries
//!
//! Shared by `fwstamp-flags` and `fwstamp-rename` so build scripts can tell
//! a broken build tree apart from a bad invocation.

use crate::exceptions::FwstampError;

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Version header missing or unreadable
pub const EXIT_HEADER_ERROR: i32 = 102;

/// Expected build artifact missing
pub const EXIT_ARTIFACT_ERROR: i32 = 103;

/// Output directory already present from an earlier run
pub const EXIT_OUTPUT_EXISTS: i32 = 104;

/// Invalid command-line arguments
pub const EXIT_INVALID_ARGS: i32 = 105;

/// I/O error (permission denied, disk error, rename failure)
pub const EXIT_IO_ERROR: i32 = 106;

/// Version-control error surfaced to the caller
pub const EXIT_VCS_ERROR: i32 = 107;

/// Map an error to the exit code a binary should return
pub fn exit_code_for(err: &FwstampError) -> i32 {
    match err {
        FwstampError::HeaderRead { .. } => EXIT_HEADER_ERROR,
        FwstampError::MissingArtifact(_) => EXIT_ARTIFACT_ERROR,
        FwstampError::OutputDirExists(_) => EXIT_OUTPUT_EXISTS,
        FwstampError::InvalidArgument(_) => EXIT_INVALID_ARGS,
        FwstampError::IoError(_) => EXIT_IO_ERROR,
        FwstampError::NotARepository(_)
        | FwstampError::GitUnavailable(_)
        | FwstampError::NoCommits(_) => EXIT_VCS_ERROR,
        FwstampError::Generic(_) => EXIT_ERROR,
    }
}
