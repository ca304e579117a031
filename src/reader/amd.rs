use std::path::{Path, PathBuf};

use crate::error::ResctrlError;
use crate::reader::{ReaderKind, ResctrlReader, read_l3_stat, read_mb_stat};
use crate::snapshot::{L3OccupancySnapshot, MemoryBandwidthSnapshot};

/// AMD Platform QoS implementation
///
/// AMD exposes one L3 monitoring domain per CCX rather than per socket, so a
/// group usually has many more domains than on Intel. The file layout below
/// `mon_data` is the same.
#[derive(Debug, Clone)]
pub struct AmdQosReader {
	root: PathBuf,
}

impl AmdQosReader {
	pub fn new(root: &Path) -> Self {
		Self {
			root: root.to_path_buf(),
		}
	}
}

impl ResctrlReader for AmdQosReader {
	fn kind(&self) -> ReaderKind {
		ReaderKind::AmdQos
	}

	fn read_l3_occupancy(&self, group: &str) -> Result<L3OccupancySnapshot, ResctrlError> {
		read_l3_stat(&self.root, group)
	}

	fn read_memory_bandwidth(&self, group: &str) -> Result<MemoryBandwidthSnapshot, ResctrlError> {
		read_mb_stat(&self.root, group)
	}
}
