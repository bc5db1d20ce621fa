use std::path::Path;

use crate::args::InputArgs;
use crate::error::InspectError;

/// Account bytes from whichever of `--file` / `--hex` was given.
pub fn load_account_data(input: &InputArgs) -> Result<Vec<u8>, InspectError> {
    let data = match (&input.file, &input.hex) {
        (Some(path), None) => read_file(path)?,
        (None, Some(hex)) => parse_hex(hex)?,
        _ => {
            return Err(InspectError::InvalidInput(
                "exactly one of --file or --hex is required".into(),
            ))
        }
    };

    if data.is_empty() {
        return Err(InspectError::InvalidInput("account data is empty".into()));
    }
    Ok(data)
}

fn read_file(path: &Path) -> Result<Vec<u8>, InspectError> {
    Ok(std::fs::read(path)?)
}

/// Hex with or without a `0x` prefix; surrounding whitespace is ignored.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, InspectError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(digits)?)
}
