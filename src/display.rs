use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::collect::GroupStats;
use crate::domain::CacheId;
use crate::reader::ReaderKind;
use crate::snapshot::MbStat;

/// Serializable view of [`GroupStats`] with domains sorted by cache id
#[derive(Debug, Serialize)]
pub struct GroupReport {
	pub group: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub l3_occupancy: Option<BTreeMap<CacheId, u64>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub memory_bandwidth: Option<BTreeMap<CacheId, MbStat>>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<String>,
}

impl From<&GroupStats> for GroupReport {
	fn from(stats: &GroupStats) -> Self {
		let mut errors = Vec::new();

		let l3_occupancy = match &stats.l3_occupancy {
			Ok(stat) => Some(stat.iter().map(|(&id, &bytes)| (id, bytes)).collect()),
			Err(e) => {
				errors.push(format!("llc occupancy: {e}"));
				None
			},
		};

		let memory_bandwidth = match &stats.memory_bandwidth {
			Ok(stat) => Some(stat.iter().map(|(&id, &mb)| (id, mb)).collect()),
			Err(e) => {
				errors.push(format!("memory bandwidth: {e}"));
				None
			},
		};

		Self {
			group: stats.group.clone(),
			l3_occupancy,
			memory_bandwidth,
			errors,
		}
	}
}

/// Renders group statistics as JSON
pub fn render_json(kind: ReaderKind, results: &[GroupStats]) -> serde_json::Result<String> {
	#[derive(Serialize)]
	struct Output {
		reader: ReaderKind,
		groups: Vec<GroupReport>,
	}

	serde_json::to_string_pretty(&Output {
		reader: kind,
		groups: results.iter().map(GroupReport::from).collect(),
	})
}

/// Renders group statistics as a plain-text table, one row per cache domain
pub fn render_table(kind: ReaderKind, results: &[GroupStats]) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "Reader: {}", kind.as_str());

	for report in results.iter().map(GroupReport::from) {
		let name = if report.group.is_empty() { "<root>" } else { report.group.as_str() };
		let _ = writeln!(out);
		let _ = writeln!(out, "Group {name}");

		for error in &report.errors {
			let _ = writeln!(out, "  error: {error}");
		}

		let l3 = report.l3_occupancy.unwrap_or_default();
		let mb = report.memory_bandwidth.unwrap_or_default();
		let mut ids: Vec<CacheId> = l3.keys().chain(mb.keys()).copied().collect();
		ids.sort();
		ids.dedup();

		if ids.is_empty() {
			continue;
		}

		let _ = writeln!(out, "  {:>5} {:>16} {:>20} {:>20}", "cache", "llc_occupancy", "mbm_local_bytes", "mbm_total_bytes");
		for id in ids {
			let _ = writeln!(
				out,
				"  {:>5} {:>16} {:>20} {:>20}",
				id,
				cell(l3.get(&id).copied()),
				cell(mb.get(&id).map(|m| m.local)),
				cell(mb.get(&id).map(|m| m.total)),
			);
		}
	}

	out
}

fn cell(value: Option<u64>) -> String {
	value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
