//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (e.g., child output is not UTF-8)
pub const DATAERR: i32 = 65;

/// Internal software error (also: child killed by a signal)
pub const SOFTWARE: i32 = 70;

/// System error (e.g., can't fork, command not found)
pub const OSERR: i32 = 71;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
