use std::io;
use std::path::PathBuf;

/// Errors returned while detecting the CPU vendor or reading resctrl monitoring data
#[derive(Debug, thiserror::Error)]
pub enum ResctrlError {
	/// The group's `mon_data` directory cannot be opened or listed
	///
	/// Expected on kernels without resctrl, for a missing group, or without privilege.
	#[error("resctrl path or file not exist: {path}: {source}")]
	Unavailable { path: PathBuf, source: io::Error },

	/// A domain directory name does not follow the `<prefix>_<resource>_<id>` convention
	#[error("cannot get cache id from domain '{name}': {detail}")]
	DomainParse { name: String, detail: String },

	/// Two domain directories resolved to the same cache id
	#[error("duplicate cache id {id} (domains '{first}' and '{second}')")]
	DuplicateDomain { id: u32, first: String, second: String },

	/// A counter file was listed but could not be opened or read
	#[error("cannot read from resctrl file system {path}: {source}")]
	CounterRead { path: PathBuf, source: io::Error },

	/// A counter file does not hold an unsigned decimal value
	#[error("cannot parse counter {path}: got '{content}'")]
	CounterParse { path: PathBuf, content: String },

	/// The group name would resolve outside the resctrl root
	#[error("invalid resctrl group '{group}': must be a relative path without '..'")]
	InvalidGroup { group: String },

	/// Returned by every call on the fake reader
	#[error("unsupported platform")]
	UnsupportedPlatform,

	/// The CPU description file could not be read
	#[error("failed to read cpu info {path}: {source}")]
	CpuInfoRead { path: PathBuf, source: io::Error },

	/// Strict mode only: the vendor is not one resctrl monitoring is implemented for
	#[error("unsupported cpu vendor")]
	UnsupportedVendor,
}

impl ResctrlError {
	/// Whether retrying on a later tick may succeed without any configuration change
	pub fn is_transient(&self) -> bool {
		matches!(self, ResctrlError::Unavailable { .. } | ResctrlError::CounterRead { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_transient_classification() {
		let unavailable = ResctrlError::Unavailable {
			path: PathBuf::from("/sys/fs/resctrl/BE/mon_data"),
			source: io::Error::from(io::ErrorKind::NotFound),
		};
		let counter_read = ResctrlError::CounterRead {
			path: PathBuf::from("llc_occupancy"),
			source: io::Error::from(io::ErrorKind::PermissionDenied),
		};
		assert!(unavailable.is_transient());
		assert!(counter_read.is_transient());

		let domain = ResctrlError::DomainParse {
			name: "mon_L3_xx".to_string(),
			detail: "not a number".to_string(),
		};
		assert!(!domain.is_transient());
		assert!(!ResctrlError::UnsupportedPlatform.is_transient());
		assert!(!ResctrlError::UnsupportedVendor.is_transient());
		assert!(!ResctrlError::InvalidGroup { group: "/etc".to_string() }.is_transient());
	}

	#[test]
	fn test_messages_carry_context() {
		let err = ResctrlError::CounterParse {
			path: PathBuf::from("/r/mon_data/mon_L3_00/llc_occupancy"),
			content: "Unavailable".to_string(),
		};
		let msg = err.to_string();
		assert!(msg.contains("llc_occupancy"));
		assert!(msg.contains("Unavailable"));
		assert_eq!(ResctrlError::UnsupportedPlatform.to_string(), "unsupported platform");
	}
}
