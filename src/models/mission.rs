use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::constants::SECTOR_COUNT;
use super::errors::ColonyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionType {
    Recon,
    Repair,
    Research,
    Contact,
}

impl MissionType {
    pub fn label(&self) -> &'static str {
        match self {
            MissionType::Recon => "reconnaissance",
            MissionType::Repair => "repair and maintenance",
            MissionType::Research => "research and data collection",
            MissionType::Contact => "creeper contact",
        }
    }
}

impl FromStr for MissionType {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recon" => Ok(MissionType::Recon),
            "repair" => Ok(MissionType::Repair),
            "research" => Ok(MissionType::Research),
            "contact" => Ok(MissionType::Contact),
            other => Err(ColonyError::InvalidField {
                field: "mission type",
                value: other.to_string(),
            }),
        }
    }
}

/// Duration class; each maps to a fixed base delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationClass {
    Short,
    Medium,
    Long,
    Extended,
}

impl DurationClass {
    pub fn base_delay_ms(&self) -> u64 {
        match self {
            DurationClass::Short => 30_000,
            DurationClass::Medium => 60_000,
            DurationClass::Long => 90_000,
            DurationClass::Extended => 120_000,
        }
    }
}

impl FromStr for DurationClass {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(DurationClass::Short),
            "medium" => Ok(DurationClass::Medium),
            "long" => Ok(DurationClass::Long),
            "extended" => Ok(DurationClass::Extended),
            other => Err(ColonyError::InvalidField {
                field: "duration",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Priority {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(ColonyError::InvalidField {
                field: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Parse a numbered sector (1-12).
pub fn parse_sector(s: &str) -> Result<u8, ColonyError> {
    let invalid = || ColonyError::InvalidField {
        field: "sector",
        value: s.trim().to_string(),
    };
    let sector: u8 = s.trim().parse().map_err(|_| invalid())?;
    if (1..=SECTOR_COUNT).contains(&sector) {
        Ok(sector)
    } else {
        Err(invalid())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionStatus {
    Active,
    Completed,
}

/// What the deployment form collects.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionOrder {
    pub expendable_id: u32,
    pub kind: MissionType,
    pub sector: u8,
    pub duration: DurationClass,
    pub priority: Priority,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct Mission {
    pub id: String,
    pub expendable_id: u32,
    pub kind: MissionType,
    pub sector: u8,
    pub duration: DurationClass,
    pub priority: Priority,
    pub notes: String,
    status: MissionStatus,
    pub started_at: NaiveDateTime,
    completed_at: Option<NaiveDateTime>,
}

impl Mission {
    pub fn new(id: String, order: MissionOrder, started_at: NaiveDateTime) -> Self {
        Mission {
            id,
            expendable_id: order.expendable_id,
            kind: order.kind,
            sector: order.sector,
            duration: order.duration,
            priority: order.priority,
            notes: order.notes,
            status: MissionStatus::Active,
            started_at,
            completed_at: None,
        }
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == MissionStatus::Active
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completed_at
    }

    /// Active -> Completed. Returns false if already completed; the
    /// original completion time is kept.
    pub fn complete(&mut self, at: NaiveDateTime) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = MissionStatus::Completed;
        self.completed_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timestamp::colony_time;

    fn order() -> MissionOrder {
        MissionOrder {
            expendable_id: 7,
            kind: MissionType::Recon,
            sector: 7,
            duration: DurationClass::Short,
            priority: Priority::High,
            notes: String::new(),
        }
    }

    #[test]
    fn base_delays_are_fixed() {
        assert_eq!(DurationClass::Short.base_delay_ms(), 30_000);
        assert_eq!(DurationClass::Medium.base_delay_ms(), 60_000);
        assert_eq!(DurationClass::Long.base_delay_ms(), 90_000);
        assert_eq!(DurationClass::Extended.base_delay_ms(), 120_000);
    }

    #[test]
    fn completion_is_monotonic() {
        let mut m = Mission::new("M-000001".to_string(), order(), colony_time(0));
        assert!(m.complete(colony_time(30_000)));
        assert!(!m.complete(colony_time(60_000)));
        assert_eq!(m.status(), MissionStatus::Completed);
        assert_eq!(m.completed_at(), Some(colony_time(30_000)));
    }

    #[test]
    fn parses_form_values() {
        assert_eq!("Recon".parse::<MissionType>().unwrap(), MissionType::Recon);
        assert_eq!("extended".parse::<DurationClass>().unwrap(), DurationClass::Extended);
        assert_eq!("critical".parse::<Priority>().unwrap(), Priority::Critical);
        assert!("sightseeing".parse::<MissionType>().is_err());
    }

    #[test]
    fn sector_must_be_numbered() {
        assert_eq!(parse_sector(" 12 ").unwrap(), 12);
        assert!(parse_sector("0").is_err());
        assert!(parse_sector("13").is_err());
        assert!(parse_sector("hub").is_err());
    }
}
