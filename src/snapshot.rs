use std::collections::HashMap;

use serde::Serialize;

use crate::domain::CacheId;

/// LLC occupancy in bytes per cache domain
pub type L3OccupancySnapshot = HashMap<CacheId, u64>;

/// Memory bandwidth counters per cache domain
pub type MemoryBandwidthSnapshot = HashMap<CacheId, MbStat>;

/// Raw cumulative memory bandwidth byte counters of one domain
///
/// These are the values exposed by the kernel, not rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MbStat {
	/// Traffic originating from the domain itself (`mbm_local_bytes`)
	pub local: u64,

	/// All traffic observed at the domain, including other domains' (`mbm_total_bytes`)
	pub total: u64,
}
