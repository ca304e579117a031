use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::mon_data_path;
use crate::constants::{CACHE_ID_INDEX, DOMAIN_NAME_DELIMITER};
use crate::error::ResctrlError;

/// Identifies one L3 cache / memory monitoring domain under a group's `mon_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CacheId(pub u32);

impl fmt::Display for CacheId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A monitoring domain directory such as `<root>/BE/mon_data/mon_L3_01`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
	pub id: CacheId,
	pub name: String,
	pub path: PathBuf,
}

impl Domain {
	/// Path of a counter file inside this domain
	pub fn counter_path(&self, file: &str) -> PathBuf {
		self.path.join(file)
	}
}

/// Lists the monitoring domains of a control group
///
/// Entries come back in directory-listing order. Every entry must carry a
/// valid cache id and ids must be unique; a single bad entry fails the
/// whole enumeration so no snapshot is built from a partial domain set.
pub fn enumerate_domains(root: &Path, group: &str) -> Result<Vec<Domain>, ResctrlError> {
	let mon_data = mon_data_path(root, group)?;
	let entries = fs::read_dir(&mon_data).map_err(|source| ResctrlError::Unavailable {
		path: mon_data.clone(),
		source,
	})?;

	let mut domains = Vec::new();
	let mut seen: HashMap<CacheId, String> = HashMap::new();

	for entry in entries {
		let entry = entry.map_err(|source| ResctrlError::Unavailable {
			path: mon_data.clone(),
			source,
		})?;

		let file_name = entry.file_name();
		let name = file_name.to_str().ok_or_else(|| ResctrlError::DomainParse {
			name: file_name.to_string_lossy().into_owned(),
			detail: "name is not valid UTF-8".to_string(),
		})?;

		let id = parse_domain_id(name)?;
		if let Some(first) = seen.insert(id, name.to_string()) {
			return Err(ResctrlError::DuplicateDomain {
				id: id.0,
				first,
				second: name.to_string(),
			});
		}

		domains.push(Domain {
			id,
			name: name.to_string(),
			path: entry.path(),
		});
	}

	Ok(domains)
}

/// Parses the cache id out of a domain directory name
///
/// `mon_L3_00` yields 0. The third `_`-delimited field must consist of
/// decimal digits only; extra trailing fields are allowed.
pub fn parse_domain_id(name: &str) -> Result<CacheId, ResctrlError> {
	let field = name
		.split(DOMAIN_NAME_DELIMITER)
		.nth(CACHE_ID_INDEX)
		.ok_or_else(|| ResctrlError::DomainParse {
			name: name.to_string(),
			detail: format!(
				"expected at least {} '{}'-delimited fields",
				CACHE_ID_INDEX + 1,
				DOMAIN_NAME_DELIMITER
			),
		})?;

	// str::parse accepts a leading '+', the kernel never writes one
	if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
		return Err(ResctrlError::DomainParse {
			name: name.to_string(),
			detail: format!("'{field}' is not a decimal cache id"),
		});
	}

	field.parse::<u32>().map(CacheId).map_err(|e| ResctrlError::DomainParse {
		name: name.to_string(),
		detail: e.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_group(root: &Path, group: &str, domains: &[&str]) {
		for domain in domains {
			fs::create_dir_all(mon_data_path(root, group).unwrap().join(domain)).unwrap();
		}
	}

	#[test]
	fn test_parse_domain_id() {
		assert_eq!(parse_domain_id("mon_L3_00").unwrap(), CacheId(0));
		assert_eq!(parse_domain_id("mon_L3_01").unwrap(), CacheId(1));
		assert_eq!(parse_domain_id("mon_L3_17").unwrap(), CacheId(17));
		assert_eq!(parse_domain_id("mon_L3_03_extra").unwrap(), CacheId(3));
	}

	#[test]
	fn test_parse_domain_id_rejects_malformed() {
		for name in ["mon_L3_xx", "mon_L3", "mon", "", "mon_L3_", "mon_L3_+1", "mon_L3_-1", "mon_sub_L3_00"] {
			let result = parse_domain_id(name);
			assert!(
				matches!(result, Err(ResctrlError::DomainParse { .. })),
				"{name} should not parse: {result:?}"
			);
		}
	}

	#[test]
	fn test_parse_domain_id_overflow() {
		assert!(matches!(
			parse_domain_id("mon_L3_99999999999"),
			Err(ResctrlError::DomainParse { .. })
		));
	}

	#[test]
	fn test_enumerate_domains() {
		let root = tempfile::tempdir().unwrap();
		make_group(root.path(), "BE", &["mon_L3_00", "mon_L3_01"]);

		let mut domains = enumerate_domains(root.path(), "BE").unwrap();
		domains.sort_by_key(|d| d.id);

		assert_eq!(domains.len(), 2);
		assert_eq!(domains[0].id, CacheId(0));
		assert_eq!(domains[0].name, "mon_L3_00");
		assert_eq!(domains[1].path, root.path().join("BE/mon_data/mon_L3_01"));
		assert_eq!(
			domains[1].counter_path("llc_occupancy"),
			root.path().join("BE/mon_data/mon_L3_01/llc_occupancy")
		);
	}

	#[test]
	fn test_enumerate_root_group() {
		let root = tempfile::tempdir().unwrap();
		make_group(root.path(), "", &["mon_L3_00"]);

		let domains = enumerate_domains(root.path(), "").unwrap();
		assert_eq!(domains.len(), 1);
		assert_eq!(domains[0].id, CacheId(0));
	}

	#[test]
	fn test_enumerate_empty_mon_data() {
		let root = tempfile::tempdir().unwrap();
		fs::create_dir_all(mon_data_path(root.path(), "LS").unwrap()).unwrap();
		assert!(enumerate_domains(root.path(), "LS").unwrap().is_empty());
	}

	#[test]
	fn test_enumerate_missing_group() {
		let root = tempfile::tempdir().unwrap();
		let result = enumerate_domains(root.path(), "BE");
		assert!(matches!(result, Err(ResctrlError::Unavailable { .. })));
	}

	#[test]
	fn test_enumerate_malformed_domain_fails_whole_listing() {
		let root = tempfile::tempdir().unwrap();
		make_group(root.path(), "BE", &["mon_L3_00", "mon_L3_xx"]);

		let result = enumerate_domains(root.path(), "BE");
		assert!(matches!(result, Err(ResctrlError::DomainParse { name, .. }) if name == "mon_L3_xx"));
	}

	#[test]
	fn test_enumerate_rejects_group_outside_root() {
		let base = tempfile::tempdir().unwrap();
		let root = base.path().join("resctrl");
		fs::create_dir_all(&root).unwrap();
		make_group(base.path(), "outside", &["mon_L3_00"]);

		let absolute = base.path().join("outside");
		let result = enumerate_domains(&root, absolute.to_str().unwrap());
		assert!(matches!(result, Err(ResctrlError::InvalidGroup { .. })));

		let result = enumerate_domains(&root, "../outside");
		assert!(matches!(result, Err(ResctrlError::InvalidGroup { ref group }) if group == "../outside"));
		assert!(!result.unwrap_err().is_transient());
	}

	#[test]
	fn test_enumerate_nested_group() {
		let root = tempfile::tempdir().unwrap();
		make_group(root.path(), "BE/mon_groups/pod1", &["mon_L3_00"]);

		let domains = enumerate_domains(root.path(), "BE/mon_groups/pod1").unwrap();
		assert_eq!(domains.len(), 1);
	}

	#[test]
	fn test_enumerate_duplicate_ids() {
		let root = tempfile::tempdir().unwrap();
		make_group(root.path(), "BE", &["mon_L3_0", "mon_L3_00"]);

		let result = enumerate_domains(root.path(), "BE");
		assert!(matches!(result, Err(ResctrlError::DuplicateDomain { id: 0, .. })));
	}
}
