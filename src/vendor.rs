use std::fs;
use std::path::Path;

use crate::constants::{AMD_VENDOR_ID, INTEL_VENDOR_ID, VENDOR_ID_FIELD};
use crate::error::ResctrlError;

/// Represents CPU manufacturers whose resctrl monitoring dialect is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorId {
	/// Intel CPU with Resource Director Technology
	Intel,
	/// AMD CPU with Platform QoS extensions
	Amd,
	/// Anything else, including cpuinfo without a recognizable vendor field
	Unknown,
}

impl VendorId {
	/// Returns a human-readable string representation of the vendor
	pub fn as_str(&self) -> &'static str {
		match self {
			VendorId::Intel => "Intel",
			VendorId::Amd => "AMD",
			VendorId::Unknown => "Unknown",
		}
	}
}

/// Detects the CPU vendor by reading a cpuinfo-formatted file
///
/// Only a failure to read the file is an error. Content without a known
/// `vendor_id` value resolves to [`VendorId::Unknown`].
pub fn detect_vendor(cpuinfo_path: &Path) -> Result<VendorId, ResctrlError> {
	let cpuinfo = fs::read_to_string(cpuinfo_path).map_err(|source| ResctrlError::CpuInfoRead {
		path: cpuinfo_path.to_path_buf(),
		source,
	})?;

	let vendor = parse_vendor(&cpuinfo);
	tracing::debug!(path = %cpuinfo_path.display(), vendor = vendor.as_str(), "detected cpu vendor");
	Ok(vendor)
}

/// Extracts the vendor from the first `vendor_id` line of cpuinfo content
pub fn parse_vendor(cpuinfo: &str) -> VendorId {
	let value = cpuinfo.lines().find_map(|line| {
		let (key, value) = line.split_once(':')?;
		(key.trim() == VENDOR_ID_FIELD).then(|| value.trim())
	});

	match value {
		Some(INTEL_VENDOR_ID) => VendorId::Intel,
		Some(AMD_VENDOR_ID) => VendorId::Amd,
		_ => VendorId::Unknown,
	}
}
