//! Per-group LLC occupancy and memory bandwidth telemetry from Linux resctrl
//!
//! A [`ResctrlReader`] is built once per process from the detected CPU vendor
//! and then queried for any number of control groups. Every call is an
//! independent snapshot: either every monitoring domain of the group is read
//! successfully or the call fails as a whole.
//!
//! ```no_run
//! use resctrl_stat::{ResctrlConfig, reader};
//!
//! let config = ResctrlConfig::default();
//! let reader = reader::from_config(&config).expect("strict mode is off");
//! match reader.read_l3_occupancy("BE") {
//! 	Ok(stat) => println!("{stat:?}"),
//! 	Err(e) if e.is_transient() => println!("no data this tick: {e}"),
//! 	Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod collect;
pub mod config;
pub mod constants;
pub mod counter;
pub mod display;
pub mod domain;
pub mod error;
pub mod reader;
pub mod snapshot;
pub mod util;
pub mod vendor;

pub use collect::{GroupStats, collect_groups};
pub use config::ResctrlConfig;
pub use domain::CacheId;
pub use error::ResctrlError;
pub use reader::{ReaderKind, ResctrlReader, new_reader};
pub use snapshot::{L3OccupancySnapshot, MbStat, MemoryBandwidthSnapshot};
pub use vendor::{VendorId, detect_vendor};

use crate::util::mount::is_resctrl_mounted;

/// Builds the reader for this host and reads every group once
///
/// This is the one-shot entry point used by the binary. Long-running agents
/// should keep the reader from [`reader::from_config`] and call it per tick.
pub fn read_groups(
	config: &ResctrlConfig,
	groups: &[String],
	workers: usize,
) -> Result<(ReaderKind, Vec<GroupStats>), ResctrlError> {
	let reader = reader::from_config(config)?;

	if reader.kind() != ReaderKind::Fake && !is_resctrl_mounted(&config.root) {
		tracing::warn!(root = %config.root.display(), "resctrl filesystem is not mounted at root");
	}

	Ok((reader.kind(), collect_groups(reader.as_ref(), groups, workers)))
}
