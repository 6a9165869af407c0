//! CLI command implementations
//!
//! Handlers return the process exit code:
//! 0 success, 2 configuration error, 3 input error, 4 write error,
//! 5 other fatal error, 130 interrupted.

pub mod init;
pub mod scan;
pub mod validate;
