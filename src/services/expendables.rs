//! Expendables manager
//!
//! Owns the two expendable records, runs their vitals simulation and the
//! dashboard card actions (contact, track, terminate).

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::Rng;

use crate::colony::{Colony, Task};
use crate::io::InputReader;
use crate::models::constants::AUTHORIZATION_CODE;
use crate::models::errors::{ColonyError, ColonyResult};
use crate::models::events::ColonyEvent;
use crate::models::expendable::{CriticalVital, Expendable};
use crate::models::line::TerminalLine;
use crate::models::mission_log::Severity;
use crate::models::vitals::percent;

#[derive(Debug, Clone)]
pub struct ExpendablesManager {
    roster: BTreeMap<u32, Expendable>,
}

impl Default for ExpendablesManager {
    fn default() -> Self {
        Self::new()
    }
}

/// An expendable that just entered the critical band.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsWarning {
    pub id: u32,
    pub text: String,
}

impl ExpendablesManager {
    pub fn new() -> Self {
        let roster = [Expendable::seven(), Expendable::eight()]
            .into_iter()
            .map(|e| (e.id, e))
            .collect();
        ExpendablesManager { roster }
    }

    pub fn get(&self, id: u32) -> Option<&Expendable> {
        self.roster.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Expendable> {
        self.roster.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expendable> {
        self.roster.values()
    }

    pub fn active(&self) -> impl Iterator<Item = &Expendable> {
        self.roster.values().filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn is_active(&self, id: u32) -> bool {
        self.get(id).is_some_and(Expendable::is_active)
    }

    /// Advance every active expendable one tick. Returns the ones that
    /// crossed into the critical band on this tick.
    pub fn tick_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<VitalsWarning> {
        let mut warnings = Vec::new();
        for e in self.roster.values_mut().filter(|e| e.is_active()) {
            e.tick(rng);
            match e.critical_vital() {
                Some(vital) if !e.warning_state => {
                    e.warning_state = true;
                    warnings.push(VitalsWarning {
                        id: e.id,
                        text: warning_text(e, vital),
                    });
                }
                Some(_) => {}
                None => e.warning_state = false,
            }
        }
        warnings
    }
}

fn warning_text(e: &Expendable, vital: CriticalVital) -> String {
    match vital {
        CriticalVital::Health => format!(
            "WARNING: {} health at critical levels ({}%)",
            e.name,
            percent(e.health)
        ),
        CriticalVital::Energy => format!(
            "WARNING: {} energy reserves critically low ({}%)",
            e.name,
            percent(e.energy)
        ),
        CriticalVital::Memory => format!(
            "WARNING: {} memory integrity degrading ({}%)",
            e.name,
            percent(e.memory)
        ),
    }
}

/// Dashboard card buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpendableAction {
    Contact,
    Track,
    Terminate,
}

impl FromStr for ExpendableAction {
    type Err = ColonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contact" => Ok(ExpendableAction::Contact),
            "track" => Ok(ExpendableAction::Track),
            "terminate" => Ok(ExpendableAction::Terminate),
            other => Err(ColonyError::InvalidField {
                field: "action",
                value: other.to_string(),
            }),
        }
    }
}

pub fn authorize(code: &str) -> bool {
    code == AUTHORIZATION_CODE
}

/// Resolve a typed id against the roster.
pub fn parse_id(colony: &Colony, raw: &str) -> ColonyResult<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|id| colony.expendables.get(*id).is_some())
        .ok_or_else(|| ColonyError::InvalidExpendable(raw.trim().to_string()))
}

/// Record a rejected authorization attempt.
pub fn log_security_alert(colony: &mut Colony, context: &str) {
    tracing::warn!(context, "authorization rejected");
    colony.record(format!("SECURITY ALERT: {}", context), Severity::Critical);
}

/// Recurring vitals tick.
pub fn update_vitals(colony: &mut Colony) {
    let warnings = colony.expendables.tick_all(&mut colony.rng);
    let echo = colony.config().chances.vitals_warning_echo;
    for warning in warnings {
        tracing::debug!(id = warning.id, "expendable entered warning state");
        if colony.roll(echo) {
            colony.say(TerminalLine::warning(warning.text));
        }
    }
    colony.emit(ColonyEvent::VitalsUpdated);
}

/// Run a card action. Unknown or terminated expendables are skipped
/// silently, as a disabled button would be.
pub fn perform_action(
    colony: &mut Colony,
    id: u32,
    action: ExpendableAction,
    prompt: &mut dyn InputReader,
) -> ColonyResult<()> {
    if !colony.expendables.is_active(id) {
        tracing::debug!(id, ?action, "card action on unavailable expendable ignored");
        return Ok(());
    }
    match action {
        ExpendableAction::Contact => contact(colony, id),
        ExpendableAction::Track => track(colony, id),
        ExpendableAction::Terminate => {
            let code = prompt.read_field("Enter authorization code (blank to cancel):")?;
            if code.is_empty() {
                tracing::debug!(id, "termination confirmation cancelled");
                colony.say(TerminalLine::plain("Termination cancelled."));
            } else {
                request_termination(colony, id, &code);
            }
        }
    }
    Ok(())
}

pub fn contact(colony: &mut Colony, id: u32) {
    let Some(e) = colony.expendables.get(id) else {
        return;
    };
    let name = e.name.clone();
    let location = e.location.clone();

    colony.say(TerminalLine::plain(format!(
        "Establishing communication with {}...",
        name
    )));

    let mut lines = vec![TerminalLine::success(format!(
        "Connection established with {}",
        name
    ))];
    if id == 7 {
        lines.extend([
            TerminalLine::plain(format!(
                "M7> I'm currently in {}, investigating unusual creeper activity.",
                location
            )),
            TerminalLine::plain("M7> They're not what we thought. There's a pattern to their movements."),
            TerminalLine::plain("M7> I think they're trying to communicate with us."),
            TerminalLine::warning("M7> Why are there two of me now? Did you make another one?"),
            TerminalLine::plain("M7> We need to rethink everything we know about this planet."),
        ]);
    } else {
        lines.extend([
            TerminalLine::plain(format!(
                "M{}> Currently stationed at {}, awaiting orders.",
                id, location
            )),
            TerminalLine::plain(format!("M{}> All systems functioning within normal parameters.", id)),
            TerminalLine::plain(format!("M{}> Ready for assignment at your discretion.", id)),
            TerminalLine::plain(format!(
                "M{}> Request clarification on current protocol violation status.",
                id
            )),
        ]);
    }
    lines.push(TerminalLine::plain(format!(
        "Communication channel with {} remains open. Enter messages or type 'close' to end.",
        name
    )));
    colony.say_after(1500, lines);
}

pub fn track(colony: &mut Colony, id: u32) {
    let Some(e) = colony.expendables.get(id) else {
        return;
    };
    let vital_signs = if e.critical_vital().is_some() {
        "Critical"
    } else {
        "Stable"
    };
    let lines = vec![
        TerminalLine::success(format!("Location: {}", e.location)),
        TerminalLine::plain(format!(
            "Movement: {}",
            if id == 7 {
                "Active exploration pattern"
            } else {
                "Stationary"
            }
        )),
        TerminalLine::plain(format!("Vital signs: {}", vital_signs)),
        TerminalLine::plain(format!(
            "Distance from colony hub: {}",
            if id == 7 { "4.2km" } else { "0km" }
        )),
    ];
    let name = e.name.clone();

    colony.say(TerminalLine::plain(format!("Tracking {}...", name)));
    colony.say_after(1000, lines);
}

/// Termination confirmed through the card prompt. State changes only when
/// the code matches.
pub fn request_termination(colony: &mut Colony, id: u32, code: &str) {
    colony.say(TerminalLine::warning(format!(
        "Processing termination request for Mickey #{}...",
        id
    )));
    if authorize(code) {
        terminate(colony, id, 1000);
    } else {
        log_security_alert(colony, &format!("Invalid termination code for Mickey #{}", id));
        colony.say_after(
            1000,
            vec![
                TerminalLine::error("ERROR: Invalid authorization code."),
                TerminalLine::plain("Termination sequence aborted."),
                TerminalLine::plain("Security alert logged. Admin notification sent."),
            ],
        );
    }
}

/// Terminate an expendable and play the termination narrative starting
/// `delay_ms` from now. Irreversible; returns false if there was nothing
/// to terminate.
pub fn terminate(colony: &mut Colony, id: u32, delay_ms: u64) -> bool {
    let terminated = colony
        .expendables
        .get_mut(id)
        .is_some_and(Expendable::terminate);
    if !terminated {
        return false;
    }
    tracing::info!(id, "expendable terminated");
    colony.emit(ColonyEvent::ExpendableTerminated(id));
    colony.record(
        format!("Mickey #{} terminated under administrator authorization.", id),
        Severity::Warning,
    );

    let opening = vec![
        TerminalLine::success("Authorization code accepted."),
        TerminalLine::warning(format!("Initiating termination sequence for Mickey #{}...", id)),
    ];
    if delay_ms == 0 {
        colony.say_all(opening);
    } else {
        colony.say_after(delay_ms, opening);
    }
    colony.say_after(
        delay_ms + 1500,
        vec![
            TerminalLine::error("WARNING: Expendable termination sequence active."),
            TerminalLine::plain("Neural connections being severed..."),
            TerminalLine::plain("Metabolic functions shutting down..."),
        ],
    );
    colony.say_after(
        delay_ms + 3500,
        vec![
            TerminalLine::error(format!("Mickey #{} has been terminated.", id)),
            TerminalLine::plain("Logs updated. Colony protocol restored to normal."),
        ],
    );
    true
}

/// Lines for the `expendables` command.
pub fn status_lines(e: &Expendable) -> Vec<TerminalLine> {
    let anomalies = if e.id == 7 {
        "Unusual cognitive patterns detected"
    } else {
        "None detected"
    };
    vec![
        TerminalLine::plain(format!("{}:", e.name)),
        TerminalLine::plain(format!("- Status: {}", e.status.label())),
        TerminalLine::plain(format!("- Health: {}%", percent(e.health))),
        TerminalLine::plain(format!("- Energy: {}%", percent(e.energy))),
        TerminalLine::plain(format!("- Memory integrity: {}%", percent(e.memory))),
        TerminalLine::plain(format!("- Temperature: {:.1}°C", e.temperature_celsius())),
        TerminalLine::plain(format!("- Location: {}", e.location)),
        TerminalLine::plain(format!("- Last mission: {}", e.last_mission)),
        TerminalLine::plain(format!("- Print date: {}", e.print_date)),
        TerminalLine::plain(format!("- Anomalies: {}", anomalies)),
    ]
}

/// Queue the next vitals tick.
pub fn schedule_vitals_tick(colony: &mut Colony) {
    let interval = colony.config().timing.vitals_interval_ms.max(1);
    colony.schedule(interval, Task::ExpendableVitals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChanceConfig, ColonyConfig};
    use crate::io::test_utils::MockInput;
    use crate::models::expendable::ExpendableStatus;

    fn colony() -> Colony {
        Colony::new(ColonyConfig::with_seed(7))
    }

    #[test]
    fn roster_starts_with_two_active() {
        let m = ExpendablesManager::new();
        assert_eq!(m.active_count(), 2);
        assert!(m.is_active(7));
        assert!(m.is_active(8));
        assert!(!m.is_active(9));
    }

    #[test]
    fn warning_fires_once_on_entering_band() {
        let mut m = ExpendablesManager::new();
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        m.get_mut(8).unwrap().health = 10.0;
        let first = m.tick_all(&mut rng);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, 8);
        assert!(first[0].text.contains("health at critical levels"));
        let second = m.tick_all(&mut rng);
        assert!(second.is_empty());
    }

    #[test]
    fn warning_clears_when_vitals_recover() {
        let mut m = ExpendablesManager::new();
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        m.get_mut(8).unwrap().health = 10.0;
        m.tick_all(&mut rng);
        m.get_mut(8).unwrap().health = 90.0;
        m.tick_all(&mut rng);
        assert!(!m.get(8).unwrap().warning_state);
    }

    #[test]
    fn parse_id_accepts_roster_only() {
        let c = colony();
        assert_eq!(parse_id(&c, "7").unwrap(), 7);
        assert!(matches!(parse_id(&c, "9"), Err(ColonyError::InvalidExpendable(_))));
        assert!(matches!(parse_id(&c, "seven"), Err(ColonyError::InvalidExpendable(_))));
    }

    #[test]
    fn vitals_warning_echo_follows_chance() {
        let mut config = ColonyConfig::with_seed(1);
        config.chances = ChanceConfig::fixed(1.0);
        let mut c = Colony::new(config);
        c.expendables.get_mut(7).unwrap().energy = 5.0;
        update_vitals(&mut c);
        assert!(c.terminal().shows("energy reserves critically low"));
    }

    #[test]
    fn prompt_termination_with_right_code() {
        let mut c = colony();
        let mut prompt = MockInput::new(vec!["niflheim\n"]);
        perform_action(&mut c, 8, ExpendableAction::Terminate, &mut prompt).unwrap();
        assert_eq!(c.expendables().get(8).unwrap().status, ExpendableStatus::Terminated);
        assert!(c.expendables().is_active(7));
    }

    #[test]
    fn prompt_termination_with_wrong_code() {
        let mut c = colony();
        let mut prompt = MockInput::new(vec!["letmein\n"]);
        perform_action(&mut c, 8, ExpendableAction::Terminate, &mut prompt).unwrap();
        assert!(c.expendables().is_active(8));
        assert!(c.log().newest().unwrap().text.starts_with("SECURITY ALERT"));
        assert_eq!(c.log().newest().unwrap().severity, Severity::Critical);
    }

    #[test]
    fn blank_code_cancels_termination() {
        let mut c = colony();
        let logged = c.log().len();
        let mut prompt = MockInput::new(vec!["\n"]);
        perform_action(&mut c, 8, ExpendableAction::Terminate, &mut prompt).unwrap();
        assert!(c.expendables().is_active(8));
        assert!(c.terminal().shows("Termination cancelled."));
        assert_eq!(c.log().len(), logged);
        assert!(c.scheduler().is_empty());
    }

    #[test]
    fn actions_on_terminated_expendable_are_skipped() {
        let mut c = colony();
        terminate(&mut c, 7, 0);
        let before = c.terminal().screen().len();
        let mut prompt = MockInput::new(vec![]);
        perform_action(&mut c, 7, ExpendableAction::Contact, &mut prompt).unwrap();
        perform_action(&mut c, 7, ExpendableAction::Terminate, &mut prompt).unwrap();
        assert_eq!(c.terminal().screen().len(), before);
    }

    #[test]
    fn terminate_is_irreversible() {
        let mut c = colony();
        assert!(terminate(&mut c, 7, 0));
        assert!(!terminate(&mut c, 7, 0));
        assert!(!terminate(&mut c, 9, 0));
        assert!(!c.expendables().is_active(7));
    }

    #[test]
    fn contact_dialogue_depends_on_id() {
        let mut c = colony();
        contact(&mut c, 7);
        contact(&mut c, 8);
        assert_eq!(c.scheduler().len(), 2);
        assert!(c.terminal().shows("Establishing communication with Mickey Barnes #7..."));
    }

    #[test]
    fn action_names_parse() {
        assert_eq!("Track".parse::<ExpendableAction>().unwrap(), ExpendableAction::Track);
        assert!("hug".parse::<ExpendableAction>().is_err());
    }
}
