//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | Missing orders found (only with `run --strict`)      |
//! | 2    | CLI usage error (bad args, unsupported file type)    |
//! | 3    | Cannot read/decode an input or write an output       |
//! | 4    | Order number column not found in a ledger            |
//! | 5    | Invalid configuration file                           |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant here
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use ordermatch_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Missing orders found. Like `diff(1)`, exit 1 means "ledgers differ."
pub const EXIT_DISCREPANCIES: u8 = 1;

/// Usage error - bad arguments, unsupported file extension.
pub const EXIT_USAGE: u8 = 2;

/// Input could not be read or decoded, or an output could not be written.
pub const EXIT_IO: u8 = 3;

/// A ledger has no recognizable order number column.
pub const EXIT_MISSING_ID_COLUMN: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::MissingIdentifierColumn { .. } => EXIT_MISSING_ID_COLUMN,
    }
}
