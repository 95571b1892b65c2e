//! The `explain` command: display documentation for error codes.

use serin_diagnostic::ErrorCode;

use crate::CliError;

/// Documentation for `code_str`, e.g. `E2004` (case-insensitive).
pub fn explain_error(code_str: &str) -> Result<String, CliError> {
    let code = code_str
        .parse::<ErrorCode>()
        .map_err(|()| CliError::UnknownCode(code_str.to_string()))?;
    Ok(format!("{}: {}", code.as_str(), code.description()))
}
