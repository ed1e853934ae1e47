//! Mission manager
//!
//! Deploys expendables into sectors and plays each mission out through
//! scheduled tasks: a midpoint update, an optional complication and the
//! completion. Also owns the ambient mission-log chatter and colony alerts.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::colony::{Colony, Task};
use crate::models::constants::is_creeper_sector;
use crate::models::errors::{ColonyError, ColonyResult};
use crate::models::events::ColonyEvent;
use crate::models::line::{LineStyle, TerminalLine};
use crate::models::mission::{Mission, MissionOrder, MissionType};
use crate::models::mission_log::Severity;
use crate::models::position::GridPosition;
use crate::models::sector_map::SectorMap;
use crate::models::timestamp::{epoch_millis, format_timestamp};

#[derive(Debug, Clone, Default)]
pub struct MissionManager {
    missions: Vec<Mission>,
}

impl MissionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    /// Every mission ever deployed, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter().filter(|m| m.is_active())
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    /// "M-" plus the last six digits of the creation time, bumped until
    /// unique.
    fn next_id(&self, millis: i64) -> String {
        let mut n = millis.rem_euclid(1_000_000);
        loop {
            let id = format!("M-{:06}", n);
            if self.get(&id).is_none() {
                return id;
            }
            n = (n + 1) % 1_000_000;
        }
    }
}

/// Create a mission from a deployment order and queue its timeline.
pub fn deploy(colony: &mut Colony, order: MissionOrder) -> ColonyResult<String> {
    let expendable_id = order.expendable_id;
    match colony.expendables.get(expendable_id) {
        None => return Err(ColonyError::InvalidExpendable(expendable_id.to_string())),
        Some(e) if !e.is_active() => return Err(ColonyError::ExpendableTerminated(expendable_id)),
        Some(_) => {}
    }
    let destination = SectorMap::locate(order.sector).ok_or(ColonyError::InvalidField {
        field: "sector",
        value: order.sector.to_string(),
    })?;

    let now = colony.now();
    let id = colony.missions.next_id(epoch_millis(&now));
    let mission = Mission::new(id.clone(), order, now);
    let (kind, sector, priority) = (mission.kind, mission.sector, mission.priority);
    let base = mission.duration.base_delay_ms();
    colony.missions.missions.push(mission);

    colony.say_all([
        TerminalLine::success(format!(
            "Deploying Mickey #{} on {} mission...",
            expendable_id,
            kind.label()
        )),
        TerminalLine::plain(format!("Mission ID: {}", id)),
        TerminalLine::plain(format!("Target: Sector {}", sector)),
        TerminalLine::plain(format!("Priority: {}", priority)),
        TerminalLine::plain(format!("Expendable #{} preparing for departure.", expendable_id)),
    ]);
    colony.record(
        format!(
            "Mickey #{} deployed to Sector {} for {} mission.",
            expendable_id,
            sector,
            kind.label()
        ),
        Severity::Normal,
    );
    if let Some(e) = colony.expendables.get_mut(expendable_id) {
        e.last_mission = format!("{} (Sector {})", kind.label(), sector);
    }
    relocate(colony, expendable_id, destination);

    colony.schedule(base / 2, Task::MissionUpdate(id.clone()));
    colony.schedule(base, Task::MissionComplete(id.clone()));
    let complication = colony.config().chances.complication;
    if colony.roll(complication) {
        let r: f64 = colony.rng.gen();
        let at = (base as f64 * r).floor() as u64;
        colony.schedule(at, Task::MissionComplication(id.clone()));
    }

    tracing::info!(mission = %id, expendable_id, sector, "mission deployed");
    colony.emit(ColonyEvent::MissionDeployed(id.clone()));
    Ok(id)
}

/// Move an expendable on the map and keep its record's location in step.
fn relocate(colony: &mut Colony, expendable_id: u32, pos: GridPosition) {
    if !colony.sectors.move_expendable(expendable_id, pos) {
        return;
    }
    let location = colony.sectors.describe(pos);
    if let Some(e) = colony.expendables.get_mut(expendable_id) {
        e.location = location.clone();
    }
    colony.say(TerminalLine::plain(format!(
        "Mickey #{} moved to {}",
        expendable_id, location
    )));
    colony.emit(ColonyEvent::ExpendableMoved {
        id: expendable_id,
        location,
    });
}

fn active_mission(colony: &Colony, id: &str) -> Option<Mission> {
    colony.missions.get(id).filter(|m| m.is_active()).cloned()
}

pub fn mission_update(colony: &mut Colony, id: &str) {
    let Some(m) = active_mission(colony, id) else {
        return;
    };
    let who = m.expendable_id;
    let sector = m.sector;
    let (text, severity) = match m.kind {
        MissionType::Recon if is_creeper_sector(sector) => (
            format!(
                "Mickey #{} reports increased creeper activity in Sector {}.",
                who, sector
            ),
            if sector == 7 {
                Severity::Warning
            } else {
                Severity::Normal
            },
        ),
        MissionType::Contact if sector == 7 => (
            format!(
                "ALERT: Unusual sonic patterns detected from creepers during contact attempt in Sector {}.",
                sector
            ),
            Severity::Warning,
        ),
        MissionType::Repair => {
            let progress: u32 = colony.rng.gen_range(60..90);
            (
                format!(
                    "Mickey #{} has completed {}% of repairs in Sector {}.",
                    who, progress, sector
                ),
                Severity::Normal,
            )
        }
        MissionType::Research => (
            format!(
                "Mickey #{} collecting samples from Sector {}. Preliminary analysis shows interesting results.",
                who, sector
            ),
            Severity::Normal,
        ),
        _ => (
            format!("Mickey #{} reports normal progress in Sector {}.", who, sector),
            Severity::Normal,
        ),
    };

    colony.record(text.clone(), severity);
    let echo = colony.config().chances.mission_update_echo;
    if colony.roll(echo) {
        let style = if severity == Severity::Warning {
            LineStyle::Warning
        } else {
            LineStyle::Plain
        };
        colony.say(TerminalLine::new(format!("Mission update: {}", text), style));
    }
}

/// Complete a mission. A completed mission never changes again.
pub fn complete_mission(colony: &mut Colony, id: &str) {
    let now = colony.now();
    let Some(m) = colony.missions.get_mut(id) else {
        return;
    };
    if !m.complete(now) {
        return;
    }
    let m = m.clone();
    let who = m.expendable_id;
    let sector = m.sector;
    let (text, severity) = match m.kind {
        MissionType::Recon if sector == 7 => (
            format!(
                "Mickey #{} returned from Sector {} with critical intelligence about creeper behavior patterns.",
                who, sector
            ),
            Severity::Warning,
        ),
        MissionType::Contact => (
            format!(
                "Mickey #{} reports successful attempt to establish basic communication with creepers in Sector {}.",
                who, sector
            ),
            Severity::Warning,
        ),
        MissionType::Repair => (
            format!(
                "Mickey #{} has successfully completed all repairs in Sector {}.",
                who, sector
            ),
            Severity::Normal,
        ),
        MissionType::Research => (
            format!(
                "Mickey #{} returned with valuable research data from Sector {}.",
                who, sector
            ),
            Severity::Normal,
        ),
        MissionType::Recon => (
            format!(
                "Mickey #{} has returned from Sector {}. Mission complete.",
                who, sector
            ),
            Severity::Normal,
        ),
    };

    tracing::info!(mission = %m.id, "mission completed");
    colony.record(text.clone(), severity);
    colony.say(TerminalLine::success(format!("Mission {} completed.", m.id)));
    colony.say(TerminalLine::plain(text));
    colony.emit(ColonyEvent::MissionCompleted(m.id.clone()));

    let back_home = colony.config().chances.return_to_hub;
    if colony.expendables.is_active(who) && colony.roll(back_home) {
        relocate(colony, who, GridPosition::HUB);
    }
}

pub fn mission_complication(colony: &mut Colony, id: &str) {
    let Some(m) = active_mission(colony, id) else {
        return;
    };
    let who = m.expendable_id;
    let sector = m.sector;
    let mut pool = vec![
        format!("Mickey #{} reports equipment malfunction in Sector {}.", who, sector),
        format!(
            "Mickey #{} encountered unexpected weather conditions in Sector {}.",
            who, sector
        ),
        format!(
            "Mickey #{} discovered unusual geological formation in Sector {}.",
            who, sector
        ),
        format!(
            "Mickey #{} reports minor injury while navigating difficult terrain in Sector {}.",
            who, sector
        ),
        format!(
            "Mickey #{} lost contact temporarily. Signal restored after 12 minutes.",
            who
        ),
    ];
    if is_creeper_sector(sector) {
        pool.extend([
            format!(
                "WARNING: Mickey #{} surrounded by creepers in Sector {}. Situation tense.",
                who, sector
            ),
            format!(
                "Mickey #{} observes unprecedented creeper behavior in Sector {}.",
                who, sector
            ),
            format!(
                "ALERT: Mickey #{} reports creepers attempting to follow him back to colony from Sector {}.",
                who, sector
            ),
        ]);
    }
    let Some(text) = pool.choose(&mut colony.rng).cloned() else {
        return;
    };
    let severity = Severity::of_text(&text);
    colony.record(text.clone(), severity);
    let line = match severity {
        Severity::Normal => TerminalLine::plain(text),
        _ => TerminalLine::warning(text),
    };
    colony.say(line);
}

const AMBIENT_EVENTS: [&str; 12] = [
    "Environmental sensors detect temperature drop to -53°C in sector 12.",
    "Hydroponics system efficiency increased by 3% after recent maintenance.",
    "Mickey #7 reported unusual ice formations in sector 9.",
    "Satellite communications temporarily interrupted by solar activity.",
    "Automated drones completed perimeter scan. No anomalies detected.",
    "Medical officer reports successful treatment of frostbite cases.",
    "Power fluctuation in eastern wing stabilized.",
    "Water recycling system operating at 97% efficiency.",
    "Mickey #8 completed maintenance on eastern perimeter sensors.",
    "Security system detected and neutralized attempted digital intrusion.",
    "Memory backup procedure for Mickey #7 and #8 completed successfully.",
    "Creeper activity increased near the western ridge.",
];

const AMBIENT_WARNINGS: [&str; 9] = [
    "WARNING: Unauthorized access attempt to cloning facility.",
    "WARNING: Unexplained power fluctuations in sector 3.",
    "WARNING: Multiple detection system temporarily disabled.",
    "WARNING: Unusual creeper behavior observed - possible intelligence.",
    "WARNING: Resource consumption exceeding projections.",
    "WARNING: Minor radiation leak detected in research lab. Contained.",
    "WARNING: Communications satellite experiencing intermittent failures.",
    "WARNING: Temperature control malfunction in food storage area.",
    "WARNING: Unidentified signal detected outside colony perimeter.",
];

/// Recurring ambient tick: occasionally adds background chatter to the log.
pub fn ambient_tick(colony: &mut Colony) {
    let chances = colony.config().chances.clone();
    if !colony.roll(chances.ambient_entry) {
        return;
    }
    let (pool, severity): (&[&str], Severity) = if colony.roll(chances.ambient_warning) {
        (&AMBIENT_WARNINGS[..], Severity::Warning)
    } else {
        (&AMBIENT_EVENTS[..], Severity::Normal)
    };
    if let Some(text) = pool.choose(&mut colony.rng) {
        colony.record(*text, severity);
    }
}

/// Queue the next ambient tick.
pub fn schedule_ambient_tick(colony: &mut Colony) {
    let interval = colony.config().timing.ambient_interval_ms.max(1);
    colony.schedule(interval, Task::AmbientLog);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Creeper,
    Weather,
    Breach,
    Medical,
    System,
}

impl AlertKind {
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Creeper => "CREEPER PROXIMITY",
            AlertKind::Weather => "EXTREME WEATHER",
            AlertKind::Breach => "COLONY BREACH",
            AlertKind::Medical => "MEDICAL EMERGENCY",
            AlertKind::System => "SYSTEM FAILURE",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AlertKind::Creeper => "creeper",
            AlertKind::Weather => "weather",
            AlertKind::Breach => "breach",
            AlertKind::Medical => "medical",
            AlertKind::System => "system",
        }
    }
}

impl FromStr for AlertKind {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creeper" => Ok(AlertKind::Creeper),
            "weather" => Ok(AlertKind::Weather),
            "breach" => Ok(AlertKind::Breach),
            "medical" => Ok(AlertKind::Medical),
            "system" => Ok(AlertKind::System),
            other => Err(ColonyError::InvalidField {
                field: "alert type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Notice,
    Warning,
    Danger,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            AlertSeverity::Notice => "NOTICE",
            AlertSeverity::Warning => "WARNING",
            AlertSeverity::Danger => "DANGER",
            AlertSeverity::Critical => "CRITICAL",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for AlertSeverity {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notice" => Ok(AlertSeverity::Notice),
            "warning" => Ok(AlertSeverity::Warning),
            "danger" => Ok(AlertSeverity::Danger),
            "critical" => Ok(AlertSeverity::Critical),
            other => Err(ColonyError::InvalidField {
                field: "alert severity",
                value: other.to_string(),
            }),
        }
    }
}

/// Broadcast a colony-wide alert.
pub fn issue_alert(colony: &mut Colony, kind: AlertKind, severity: AlertSeverity, message: &str) {
    let headline = message.lines().next().unwrap_or_default();
    let log_severity = if severity == AlertSeverity::Notice {
        Severity::Normal
    } else {
        Severity::Warning
    };
    tracing::info!(kind = kind.name(), %severity, "colony alert issued");
    colony.record(format!("COLONY ALERT: {}", headline), log_severity);
    colony.say(TerminalLine::error(format!(
        "Colony-wide {} alert issued: {}",
        severity,
        kind.name()
    )));
    colony.emit(ColonyEvent::AlertIssued {
        title: format!("{} ALERT", kind.title()),
        message: message.to_string(),
    });
}

/// Lines for the `mission` command: the standing reconnaissance assignment
/// plus every deployed mission still in progress.
pub fn briefing_lines(colony: &Colony) -> Vec<TerminalLine> {
    let mut lines = vec![TerminalLine::success("Active missions:")];

    if colony.expendables.is_active(7) {
        lines.extend(
            [
                "MISSION #54-23: Creeper reconnaissance",
                "- Assigned to: Mickey #7",
                "- Status: In progress",
                "- Location: Sector 4-B (Eastern Ice Shelf)",
                "- Objective: Observe creeper behavior patterns",
                "- Started: 2054-05-13 14:22:36",
                "- Expected completion: 2054-05-13 22:30:00",
                "- Mission notes: Investigate unusual thermal signatures detected during scan.",
            ]
            .map(TerminalLine::plain),
        );
    }

    for m in colony.missions.active() {
        let place = SectorMap::sector_name(m.sector)
            .map(|name| format!("Sector {} ({})", m.sector, name))
            .unwrap_or_else(|| format!("Sector {}", m.sector));
        let due = m.started_at + Duration::milliseconds(m.duration.base_delay_ms() as i64);
        lines.push(TerminalLine::plain(format!("MISSION {}: {}", m.id, m.kind.label())));
        lines.push(TerminalLine::plain(format!("- Assigned to: Mickey #{}", m.expendable_id)));
        lines.push(TerminalLine::plain("- Status: In progress"));
        lines.push(TerminalLine::plain(format!("- Location: {}", place)));
        lines.push(TerminalLine::plain(format!("- Priority: {}", m.priority)));
        lines.push(TerminalLine::plain(format!("- Started: {}", format_timestamp(&m.started_at))));
        lines.push(TerminalLine::plain(format!(
            "- Expected completion: {}",
            format_timestamp(&due)
        )));
        if !m.notes.is_empty() {
            lines.push(TerminalLine::plain(format!("- Mission notes: {}", m.notes)));
        }
    }

    if lines.len() == 1 {
        lines.push(TerminalLine::plain("No missions in progress."));
    }
    lines
}
