use crate::error::ResctrlError;
use crate::reader::{ReaderKind, ResctrlReader};
use crate::snapshot::{L3OccupancySnapshot, MemoryBandwidthSnapshot};

/// Reader for platforms without a supported resctrl dialect
///
/// Never touches the filesystem; every read fails with
/// [`ResctrlError::UnsupportedPlatform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeReader;

impl ResctrlReader for FakeReader {
	fn kind(&self) -> ReaderKind {
		ReaderKind::Fake
	}

	fn read_l3_occupancy(&self, _group: &str) -> Result<L3OccupancySnapshot, ResctrlError> {
		Err(ResctrlError::UnsupportedPlatform)
	}

	fn read_memory_bandwidth(&self, _group: &str) -> Result<MemoryBandwidthSnapshot, ResctrlError> {
		Err(ResctrlError::UnsupportedPlatform)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_always_unsupported() {
		let reader = FakeReader;
		for group in ["BE", "LS", "", "../../etc"] {
			for _ in 0..3 {
				assert!(matches!(
					reader.read_l3_occupancy(group),
					Err(ResctrlError::UnsupportedPlatform)
				));
				assert!(matches!(
					reader.read_memory_bandwidth(group),
					Err(ResctrlError::UnsupportedPlatform)
				));
			}
		}
	}
}
