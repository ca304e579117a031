use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::constants::RESCTRL_SUPER_MAGIC;

/// Returns the filesystem magic number (`f_type` of statfs(2)) for a path
///
/// # Arguments
///
/// * `path` - Any path on the filesystem to inspect
pub fn filesystem_type(path: &Path) -> io::Result<i64> {
	let c_path =
		CString::new(path.as_os_str().as_bytes()).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

	let mut stat = MaybeUninit::<libc::statfs>::uninit();
	// SAFETY: c_path is NUL-terminated and stat points to writable storage of the right size
	let ret = unsafe { libc::statfs(c_path.as_ptr(), stat.as_mut_ptr()) };
	if ret != 0 {
		return Err(io::Error::last_os_error());
	}

	// SAFETY: statfs returned success, so the struct is initialized
	let stat = unsafe { stat.assume_init() };
	Ok(stat.f_type as i64)
}

/// Checks whether a resctrl filesystem is mounted at `root`
pub fn is_resctrl_mounted(root: &Path) -> bool {
	match filesystem_type(root) {
		Ok(fs_type) => fs_type == RESCTRL_SUPER_MAGIC,
		Err(e) => {
			tracing::debug!(root = %root.display(), error = %e, "statfs on resctrl root failed");
			false
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tempdir_is_not_resctrl() {
		let dir = tempfile::tempdir().unwrap();
		assert!(filesystem_type(dir.path()).is_ok());
		assert!(!is_resctrl_mounted(dir.path()));
	}

	#[test]
	fn test_missing_path() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("resctrl");
		assert_eq!(
			filesystem_type(&missing).unwrap_err().kind(),
			io::ErrorKind::NotFound
		);
		assert!(!is_resctrl_mounted(&missing));
	}
}
