pub const HISTORY_LIMIT: usize = 50;
pub const LOG_CAPACITY: usize = 30;

pub const VITAL_MIN: f64 = 0.0;
pub const VITAL_MAX: f64 = 100.0;

/// Vitals below this render as danger.
pub const DANGER_THRESHOLD: f64 = 30.0;
/// Vitals below this render as warning.
pub const WARNING_THRESHOLD: f64 = 60.0;

pub const VITALS_INTERVAL_MS: u64 = 5_000;
pub const AMBIENT_INTERVAL_MS: u64 = 30_000;

pub const AUTHORIZATION_CODE: &str = "niflheim";
pub const PROMPT: &str = "admin@niflheim:~$";

/// Colony clock at simulation start.
pub const COLONY_EPOCH: &str = "2054-05-13 14:22:36";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const GRID_SIZE: usize = 8;
pub const SECTOR_COUNT: u8 = 12;

/// Sectors with known creeper activity.
pub const CREEPER_SECTORS: [u8; 3] = [4, 7, 12];

/// Every command the terminal understands, in table order.
pub const COMMANDS: [&str; 15] = [
    "help",
    "status",
    "scan",
    "history",
    "resources",
    "weather",
    "alert",
    "clear",
    "terminate",
    "override",
    "map",
    "deploy",
    "contact",
    "mission",
    "expendables",
];

pub fn is_creeper_sector(sector: u8) -> bool {
    CREEPER_SECTORS.contains(&sector)
}
