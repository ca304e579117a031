use std::path::{Path, PathBuf};

use crate::error::ResctrlError;
use crate::reader::{ReaderKind, ResctrlReader, read_l3_stat, read_mb_stat};
use crate::snapshot::{L3OccupancySnapshot, MemoryBandwidthSnapshot};

/// Intel RDT implementation (CMT for LLC occupancy, MBM for bandwidth)
#[derive(Debug, Clone)]
pub struct RdtReader {
	root: PathBuf,
}

impl RdtReader {
	pub fn new(root: &Path) -> Self {
		Self {
			root: root.to_path_buf(),
		}
	}
}

impl ResctrlReader for RdtReader {
	fn kind(&self) -> ReaderKind {
		ReaderKind::Rdt
	}

	fn read_l3_occupancy(&self, group: &str) -> Result<L3OccupancySnapshot, ResctrlError> {
		read_l3_stat(&self.root, group)
	}

	fn read_memory_bandwidth(&self, group: &str) -> Result<MemoryBandwidthSnapshot, ResctrlError> {
		read_mb_stat(&self.root, group)
	}
}
