//! Ship manager: NSS Heimdall systems simulation and dashboard actions.

use std::str::FromStr;

use crate::colony::{Colony, Task};
use crate::models::errors::ColonyError;
use crate::models::events::ColonyEvent;
use crate::models::line::{LineStyle, TerminalLine};
use crate::models::ship::Ship;
use crate::models::vitals::{percent, VitalLevel};

#[derive(Debug, Clone, Default)]
pub struct ShipManager {
    ship: Ship,
}

impl ShipManager {
    pub fn new() -> Self {
        ShipManager {
            ship: Ship::heimdall(),
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipAction {
    Status,
    Prep,
    Emergency,
}

impl FromStr for ShipAction {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(ShipAction::Status),
            "prep" => Ok(ShipAction::Prep),
            "emergency" => Ok(ShipAction::Emergency),
            other => Err(ColonyError::InvalidField {
                field: "ship action",
                value: other.to_string(),
            }),
        }
    }
}

pub fn perform_action(colony: &mut Colony, action: ShipAction) {
    tracing::debug!(?action, "ship action");
    match action {
        ShipAction::Status => check_systems(colony),
        ShipAction::Prep => prep_for_launch(colony),
        ShipAction::Emergency => emergency_launch(colony),
    }
}

/// Recurring systems tick.
pub fn update_systems(colony: &mut Colony) {
    colony.ship.ship.tick(&mut colony.rng);
    colony.emit(ColonyEvent::VitalsUpdated);
}

fn nominal_remark(label: &str) -> &'static str {
    match label {
        "Hull integrity" => "Structural integrity holding",
        "Life support" => "Optimal",
        "Engine status" => "Performance nominal",
        _ => "Within operational parameters",
    }
}

/// One diagnostic line per system, styled by its current level.
fn diagnostic_line(label: &str, value: f64) -> TerminalLine {
    let (remark, style) = match VitalLevel::of(value) {
        VitalLevel::Danger => ("CRITICAL - Immediate attention required", LineStyle::Error),
        VitalLevel::Warning => ("Degraded - Maintenance recommended", LineStyle::Warning),
        VitalLevel::Nominal => (nominal_remark(label), LineStyle::Plain),
    };
    TerminalLine::new(format!("{}: {}% - {}", label, percent(value), remark), style)
}

pub fn check_systems(colony: &mut Colony) {
    colony.say(TerminalLine::plain("Initiating ship systems diagnostic..."));

    let mut lines: Vec<TerminalLine> = colony
        .ship
        .ship()
        .vitals()
        .iter()
        .map(|(label, value)| diagnostic_line(label, *value))
        .collect();
    lines.push(TerminalLine::success("Navigation systems: Online"));
    lines.push(TerminalLine::success("Communication arrays: Functional"));
    colony.say_after(1500, lines);
}

pub fn prep_for_launch(colony: &mut Colony) {
    colony.say(TerminalLine::plain("Initiating launch preparation sequence..."));
    colony.say_after(
        1000,
        vec![TerminalLine::plain("Checking environmental conditions...")],
    );
    colony.say_after(
        3000,
        vec![
            TerminalLine::warning("WARNING: Current weather conditions suboptimal"),
            TerminalLine::plain("Proceeding with pre-flight checklist:"),
            TerminalLine::success("1. Fuel systems pressurized"),
            TerminalLine::success("2. Navigation computer online"),
            TerminalLine::success("3. Life support activated"),
            TerminalLine::plain("4. Engine warm-up sequence initiated"),
            TerminalLine::plain("Estimated time to launch readiness: 45 minutes"),
        ],
    );
}

pub fn emergency_launch(colony: &mut Colony) {
    colony.say(TerminalLine::warning(
        "WARNING: Emergency launch sequence requires authorization",
    ));
    colony.say(TerminalLine::plain(
        "Enter override code or use \"override niflheim\" command",
    ));
}

/// Queue the next systems tick.
pub fn schedule_systems_tick(colony: &mut Colony) {
    let interval = colony.config().timing.ship_interval_ms.max(1);
    colony.schedule(interval, Task::ShipSystems);
}
