pub mod amd;
pub mod fake;
pub mod rdt;

use std::fmt::Debug;
use std::path::Path;

use serde::Serialize;

use crate::config::ResctrlConfig;
use crate::constants::{LLC_OCCUPANCY_FILE, MBM_LOCAL_BYTES_FILE, MBM_TOTAL_BYTES_FILE};
use crate::counter::read_counter;
use crate::domain::enumerate_domains;
use crate::error::ResctrlError;
use crate::snapshot::{L3OccupancySnapshot, MbStat, MemoryBandwidthSnapshot};
use crate::vendor::{VendorId, detect_vendor};

/// Reads per-domain monitoring counters of a resctrl control group
///
/// `group` names a directory under the resctrl root such as `BE` or `LS`;
/// an empty name addresses the root group. Implementations hold no per-call
/// state, so one reader can serve any number of concurrent callers.
pub trait ResctrlReader: Debug + Send + Sync {
	/// Which monitoring dialect this reader speaks
	fn kind(&self) -> ReaderKind;

	/// LLC occupancy in bytes for every domain of the group
	fn read_l3_occupancy(&self, group: &str) -> Result<L3OccupancySnapshot, ResctrlError>;

	/// Local and total memory bandwidth counters for every domain of the group
	fn read_memory_bandwidth(&self, group: &str) -> Result<MemoryBandwidthSnapshot, ResctrlError>;
}

/// Identity of a reader, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReaderKind {
	/// Intel Resource Director Technology
	#[serde(rename = "RDT")]
	Rdt,
	/// AMD Platform Quality of Service
	#[serde(rename = "AMD-QoS")]
	AmdQos,
	/// Unsupported platform; every read fails
	#[serde(rename = "fake")]
	Fake,
}

impl ReaderKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ReaderKind::Rdt => "RDT",
			ReaderKind::AmdQos => "AMD-QoS",
			ReaderKind::Fake => "fake",
		}
	}
}

/// Reads `llc_occupancy` from every domain of a group
///
/// For more information about x86 resctrl, refer to:
/// https://docs.kernel.org/arch/x86/resctrl.html
pub fn read_l3_stat(root: &Path, group: &str) -> Result<L3OccupancySnapshot, ResctrlError> {
	let domains = enumerate_domains(root, group)?;

	let mut l3_stat = L3OccupancySnapshot::with_capacity(domains.len());
	for domain in &domains {
		let occupancy = read_counter(&domain.counter_path(LLC_OCCUPANCY_FILE))?;
		l3_stat.insert(domain.id, occupancy);
	}

	tracing::debug!(group, domains = l3_stat.len(), "read resctrl llc occupancy");
	Ok(l3_stat)
}

/// Reads `mbm_local_bytes` and `mbm_total_bytes` from every domain of a group
pub fn read_mb_stat(root: &Path, group: &str) -> Result<MemoryBandwidthSnapshot, ResctrlError> {
	let domains = enumerate_domains(root, group)?;

	let mut mb_stat = MemoryBandwidthSnapshot::with_capacity(domains.len());
	for domain in &domains {
		let local = read_counter(&domain.counter_path(MBM_LOCAL_BYTES_FILE))?;
		let total = read_counter(&domain.counter_path(MBM_TOTAL_BYTES_FILE))?;
		mb_stat.insert(domain.id, MbStat { local, total });
	}

	tracing::debug!(group, domains = mb_stat.len(), "read resctrl memory bandwidth");
	Ok(mb_stat)
}

/// Factory function to create the reader matching a CPU vendor
///
/// Never fails: an unknown vendor gets the [`fake::FakeReader`].
pub fn new_reader(vendor: VendorId, config: &ResctrlConfig) -> Box<dyn ResctrlReader> {
	use crate::reader::amd::AmdQosReader;
	use crate::reader::fake::FakeReader;
	use crate::reader::rdt::RdtReader;

	match vendor {
		VendorId::Intel => Box::new(RdtReader::new(&config.root)),
		VendorId::Amd => Box::new(AmdQosReader::new(&config.root)),
		VendorId::Unknown => {
			tracing::warn!("unsupported cpu vendor, resctrl monitoring disabled");
			Box::new(FakeReader)
		},
	}
}

/// Like [`new_reader`], but rejects an unknown vendor
pub fn try_new_reader(vendor: VendorId, config: &ResctrlConfig) -> Result<Box<dyn ResctrlReader>, ResctrlError> {
	match vendor {
		VendorId::Unknown => Err(ResctrlError::UnsupportedVendor),
		_ => Ok(new_reader(vendor, config)),
	}
}

/// Detects the vendor from `config.cpuinfo_path` and builds the matching reader
///
/// Detection failures degrade to the fake reader unless `config.strict_vendor`
/// is set, in which case they are returned.
pub fn from_config(config: &ResctrlConfig) -> Result<Box<dyn ResctrlReader>, ResctrlError> {
	let vendor = match detect_vendor(&config.cpuinfo_path) {
		Ok(vendor) => vendor,
		Err(e) if config.strict_vendor => return Err(e),
		Err(e) => {
			tracing::error!(error = %e, "get cpu vendor error, resctrl monitoring disabled");
			return Ok(Box::new(fake::FakeReader));
		},
	};

	let reader = if config.strict_vendor {
		try_new_reader(vendor, config)?
	} else {
		new_reader(vendor, config)
	};

	tracing::info!(vendor = vendor.as_str(), reader = reader.kind().as_str(), "resctrl reader ready");
	Ok(reader)
}
