use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use crate::error::ResctrlError;
use crate::reader::ResctrlReader;
use crate::snapshot::{L3OccupancySnapshot, MemoryBandwidthSnapshot};

/// Both snapshots of one control group, each read independently
#[derive(Debug)]
pub struct GroupStats {
	pub group: String,
	pub l3_occupancy: Result<L3OccupancySnapshot, ResctrlError>,
	pub memory_bandwidth: Result<MemoryBandwidthSnapshot, ResctrlError>,
}

impl GroupStats {
	/// Reads LLC occupancy and memory bandwidth for a group
	pub fn read(reader: &dyn ResctrlReader, group: &str) -> Self {
		Self {
			group: group.to_string(),
			l3_occupancy: reader.read_l3_occupancy(group),
			memory_bandwidth: reader.read_memory_bandwidth(group),
		}
	}

	/// Returns `true` if either read failed
	pub fn has_errors(&self) -> bool {
		self.l3_occupancy.is_err() || self.memory_bandwidth.is_err()
	}
}

/// Reads every group on up to `workers` scoped threads
///
/// Results come back in the order of `groups`. A failure of one group does
/// not affect the others.
pub fn collect_groups(reader: &dyn ResctrlReader, groups: &[String], workers: usize) -> Vec<GroupStats> {
	let workers = workers.clamp(1, groups.len().max(1));
	let next = AtomicUsize::new(0);
	let (tx, rx) = mpsc::channel::<(usize, GroupStats)>();

	thread::scope(|s| {
		for _ in 0..workers {
			let tx = tx.clone();
			let next = &next;
			s.spawn(move || {
				loop {
					let index = next.fetch_add(1, Ordering::Relaxed);
					let Some(group) = groups.get(index) else {
						break;
					};
					// The receiver outlives the scope
					let _ = tx.send((index, GroupStats::read(reader, group)));
				}
			});
		}
	});
	drop(tx);

	let mut results: Vec<(usize, GroupStats)> = rx.into_iter().collect();
	results.sort_by_key(|&(index, _)| index);

	for (_, stats) in &results {
		if let Err(e) = &stats.l3_occupancy {
			tracing::warn!(group = %stats.group, error = %e, transient = e.is_transient(), "llc occupancy unavailable");
		}
		if let Err(e) = &stats.memory_bandwidth {
			tracing::warn!(group = %stats.group, error = %e, transient = e.is_transient(), "memory bandwidth unavailable");
		}
	}

	results.into_iter().map(|(_, stats)| stats).collect()
}

/// Default worker count for [`collect_groups`]
pub fn default_workers() -> usize {
	num_cpus::get()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use std::path::Path;

	use crate::domain::CacheId;
	use crate::reader::fake::FakeReader;
	use crate::reader::rdt::RdtReader;

	fn write_group(root: &Path, group: &str, occupancy: u64) {
		let dir = root.join(group).join("mon_data/mon_L3_00");
		fs::create_dir_all(&dir).unwrap();
		fs::write(dir.join("llc_occupancy"), format!("{occupancy}\n")).unwrap();
		fs::write(dir.join("mbm_local_bytes"), "10\n").unwrap();
		fs::write(dir.join("mbm_total_bytes"), "20\n").unwrap();
	}

	#[test]
	fn test_collect_preserves_order() {
		let root = tempfile::tempdir().unwrap();
		let groups: Vec<String> = (0..16).map(|i| format!("group{i}")).collect();
		for (i, group) in groups.iter().enumerate() {
			write_group(root.path(), group, i as u64);
		}

		let reader = RdtReader::new(root.path());
		let results = collect_groups(&reader, &groups, 4);

		assert_eq!(results.len(), groups.len());
		for (i, stats) in results.iter().enumerate() {
			assert_eq!(stats.group, groups[i]);
			assert!(!stats.has_errors());
			assert_eq!(stats.l3_occupancy.as_ref().unwrap()[&CacheId(0)], i as u64);
		}
	}

	#[test]
	fn test_collect_isolates_failures() {
		let root = tempfile::tempdir().unwrap();
		write_group(root.path(), "LS", 42);
		let groups = vec!["BE".to_string(), "LS".to_string()];

		let reader = RdtReader::new(root.path());
		let results = collect_groups(&reader, &groups, default_workers());

		assert!(matches!(results[0].l3_occupancy, Err(ResctrlError::Unavailable { .. })));
		assert!(results[0].has_errors());
		assert!(!results[1].has_errors());
	}

	#[test]
	fn test_collect_with_fake_reader() {
		let groups = vec!["BE".to_string()];
		let results = collect_groups(&FakeReader, &groups, 0);
		assert!(matches!(results[0].memory_bandwidth, Err(ResctrlError::UnsupportedPlatform)));
	}

	#[test]
	fn test_collect_no_groups() {
		assert!(collect_groups(&FakeReader, &[], 8).is_empty());
	}
}
