use std::fs;
use std::path::Path;

use crate::error::ResctrlError;

/// Reads a resctrl counter file holding a single unsigned decimal value
pub fn read_counter(path: &Path) -> Result<u64, ResctrlError> {
	let content = fs::read_to_string(path).map_err(|source| ResctrlError::CounterRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_counter(&content, path)
}

/// Parses counter file content; one trailing newline is tolerated
///
/// The kernel writes `Unavailable` or `Error` in place of a value when the
/// hardware counter cannot be read. Those are reported as parse failures.
pub fn parse_counter(content: &str, path: &Path) -> Result<u64, ResctrlError> {
	let value = content.strip_suffix('\n').unwrap_or(content);

	let parse_error = || ResctrlError::CounterParse {
		path: path.to_path_buf(),
		content: value.to_string(),
	};

	if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
		return Err(parse_error());
	}

	value.parse::<u64>().map_err(|_| parse_error())
}
