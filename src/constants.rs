// Kernel interface locations
pub const DEFAULT_RESCTRL_ROOT: &str = "/sys/fs/resctrl";
pub const DEFAULT_CPUINFO_PATH: &str = "/proc/cpuinfo";

// Per-group monitoring layout
pub const MON_DATA_DIR: &str = "mon_data";
pub const LLC_OCCUPANCY_FILE: &str = "llc_occupancy";
pub const MBM_LOCAL_BYTES_FILE: &str = "mbm_local_bytes";
pub const MBM_TOTAL_BYTES_FILE: &str = "mbm_total_bytes";

// Domain directories look like `mon_L3_00`; the cache id is the third `_` field
pub const DOMAIN_NAME_DELIMITER: char = '_';
pub const CACHE_ID_INDEX: usize = 2;

// CPU vendor identifiers as reported in the `vendor_id` field of cpuinfo
pub const VENDOR_ID_FIELD: &str = "vendor_id";
pub const INTEL_VENDOR_ID: &str = "GenuineIntel";
pub const AMD_VENDOR_ID: &str = "AuthenticAMD";

// f_type reported by statfs(2) for a resctrl mount (RDTGROUP_SUPER_MAGIC)
pub const RESCTRL_SUPER_MAGIC: i64 = 0x0765_5821;
