use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CPUINFO_PATH, DEFAULT_RESCTRL_ROOT, MON_DATA_DIR};
use crate::error::ResctrlError;

/// Where to find the kernel interfaces and how to react to an unknown vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResctrlConfig {
	/// Mount point of the resctrl filesystem
	#[serde(default = "default_root")]
	pub root: PathBuf,

	/// cpuinfo-formatted file used for vendor detection
	#[serde(default = "default_cpuinfo_path")]
	pub cpuinfo_path: PathBuf,

	/// Refuse to build a reader when the vendor is unknown instead of degrading
	#[serde(default)]
	pub strict_vendor: bool,
}

fn default_root() -> PathBuf {
	PathBuf::from(DEFAULT_RESCTRL_ROOT)
}

fn default_cpuinfo_path() -> PathBuf {
	PathBuf::from(DEFAULT_CPUINFO_PATH)
}

impl Default for ResctrlConfig {
	fn default() -> Self {
		Self {
			root: default_root(),
			cpuinfo_path: default_cpuinfo_path(),
			strict_vendor: false,
		}
	}
}

impl ResctrlConfig {
	/// Creates a config rooted at a custom resctrl mount point
	pub fn with_root(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			..Self::default()
		}
	}
}

/// Returns `<root>/<group>/mon_data`; an empty group addresses the root group
///
/// `group` must stay below `root`: absolute names and `..` segments are
/// rejected, nested names such as `BE/mon_groups/pod1` are accepted.
pub fn mon_data_path(root: &Path, group: &str) -> Result<PathBuf, ResctrlError> {
	let escapes = Path::new(group)
		.components()
		.any(|c| matches!(c, Component::RootDir | Component::Prefix(_) | Component::ParentDir));
	if escapes {
		return Err(ResctrlError::InvalidGroup {
			group: group.to_string(),
		});
	}

	Ok(root.join(group).join(MON_DATA_DIR))
}
