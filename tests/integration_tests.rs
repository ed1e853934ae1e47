use std::io;

use niflheim::config::ChanceConfig;
use niflheim::io::InputReader;
use niflheim::models::events::ColonyEvent;
use niflheim::models::expendable::ExpendableStatus;
use niflheim::models::mission::{DurationClass, MissionOrder, MissionStatus, MissionType, Priority};
use niflheim::models::mission_log::Severity;
use niflheim::models::sector_map::SectorStatus;
use niflheim::services::expendables::ExpendableAction;
use niflheim::services::missions::{AlertKind, AlertSeverity};
use niflheim::services::ship::ShipAction;
use niflheim::{ColonyConfig, ColonyEngine, ColonyError, EngineState};

/// Answers every prompt with the same line.
struct FixedAnswer(&'static str);

impl InputReader for FixedAnswer {
    fn read_line(&mut self, _prompt: &str) -> Result<String, io::Error> {
        Ok(format!("{}\n", self.0))
    }
}

fn engine_with_chance(p: f64) -> ColonyEngine {
    let mut config = ColonyConfig::with_seed(2054);
    config.chances = ChanceConfig::fixed(p);
    ColonyEngine::new(config)
}

fn short_recon(expendable_id: u32, sector: u8) -> MissionOrder {
    MissionOrder {
        expendable_id,
        kind: MissionType::Recon,
        sector,
        duration: DurationClass::Short,
        priority: Priority::Medium,
        notes: String::new(),
    }
}

#[test]
fn scan_scenario_marks_creeper_sectors() {
    let mut engine = engine_with_chance(0.0);
    engine.submit("scan");

    engine.advance(2_899);
    assert!(!engine.colony().terminal().shows("Scan complete."));
    assert!(!engine.colony().terminal().shows("Updated sector"));

    engine.advance(1);
    let marked: Vec<(u8, SectorStatus)> = engine
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            ColonyEvent::SectorMarked { sector, status } => Some((sector, status)),
            _ => None,
        })
        .collect();
    assert_eq!(
        marked,
        vec![
            (4, SectorStatus::Warning),
            (7, SectorStatus::Danger),
            (12, SectorStatus::Warning)
        ]
    );
    let terminal = engine.colony().terminal();
    assert!(terminal.shows("Scan complete. Results:"));
    assert!(terminal.shows("Creeper activity detected in sectors 4, 7, and 12."));

    let sectors = engine.colony().sectors();
    assert_eq!(sectors.status(4), Some(SectorStatus::Warning));
    assert_eq!(sectors.status(7), Some(SectorStatus::Danger));
    assert_eq!(sectors.status(12), Some(SectorStatus::Warning));

    // results print before the map update lines
    let screen = terminal.screen();
    let results = screen.iter().position(|l| l.text == "Scan complete. Results:").unwrap();
    let marked = screen
        .iter()
        .position(|l| l.text.starts_with("Updated sector 4"))
        .unwrap();
    assert!(results < marked);
}

#[test]
fn terminate_then_override_terminates_exactly_one() {
    let mut engine = engine_with_chance(0.0);
    engine.submit("terminate 7");
    assert!(engine.colony().expendables().is_active(7));

    engine.submit("override niflheim");
    let expendables = engine.colony().expendables();
    assert_eq!(expendables.get(7).unwrap().status, ExpendableStatus::Terminated);
    assert_eq!(expendables.get(8).unwrap().status, ExpendableStatus::Active);
    assert_eq!(engine.colony().terminal().pending_termination(), None);
    assert!(engine
        .drain_events()
        .contains(&ColonyEvent::ExpendableTerminated(7)));

    engine.advance(3_500);
    assert!(engine.colony().terminal().shows("Mickey #7 has been terminated."));

    // a later wrong code changes nothing
    engine.submit("override wrongcode");
    assert!(engine.colony().terminal().is_admin());
    assert_eq!(engine.colony().expendables().active_count(), 1);
    assert_eq!(
        engine.colony().expendables().get(7).unwrap().status,
        ExpendableStatus::Terminated
    );
}

#[test]
fn terminated_expendable_cannot_be_terminated_again() {
    let mut engine = engine_with_chance(0.0);
    engine.submit("terminate 8");
    engine.submit("override niflheim");
    engine.submit("terminate 8");
    assert!(engine
        .colony()
        .terminal()
        .shows("Mickey #8 has already been terminated."));
    assert_eq!(engine.colony().terminal().pending_termination(), None);
}

#[test]
fn terminated_vitals_stay_frozen() {
    let mut engine = engine_with_chance(1.0);
    engine.submit("terminate 7");
    engine.submit("override niflheim");
    engine.advance(60_000);
    let seven = engine.colony().expendables().get(7).unwrap();
    assert_eq!(
        (seven.health, seven.energy, seven.memory, seven.temperature),
        (0.0, 0.0, 0.0, 0.0)
    );
}

#[test]
fn short_mission_completes_exactly_at_base_delay() {
    let mut engine = engine_with_chance(0.0);
    let id = engine.deploy(short_recon(8, 2)).unwrap();

    engine.advance(29_999);
    assert_eq!(
        engine.colony().missions().get(&id).unwrap().status(),
        MissionStatus::Active
    );

    engine.advance(1);
    let mission = engine.colony().missions().get(&id).unwrap();
    assert_eq!(mission.status(), MissionStatus::Completed);
    assert!(engine
        .colony()
        .terminal()
        .shows(&format!("Mission {} completed.", id)));
}

#[test]
fn midpoint_update_is_logged_at_half_time() {
    let mut engine = engine_with_chance(0.0);
    engine.deploy(short_recon(7, 7)).unwrap();
    engine.advance(15_000);
    let newest = engine.colony().log().newest().unwrap();
    assert_eq!(
        newest.text,
        "Mickey #7 reports increased creeper activity in Sector 7."
    );
    assert_eq!(newest.severity, Severity::Warning);
}

#[test]
fn deploy_rejects_terminated_expendable() {
    let mut engine = engine_with_chance(0.0);
    engine.submit("terminate 8");
    engine.submit("override niflheim");
    assert!(matches!(
        engine.deploy(short_recon(8, 1)),
        Err(ColonyError::ExpendableTerminated(8))
    ));
}

#[test]
fn mission_log_is_capped() {
    let mut engine = engine_with_chance(0.0);
    for i in 0..31 {
        engine.issue_alert(
            AlertKind::System,
            AlertSeverity::Notice,
            &format!("drill {}", i),
        );
    }
    let log = engine.colony().log();
    assert_eq!(log.len(), 30);
    assert_eq!(log.newest().unwrap().text, "COLONY ALERT: drill 30");
    assert!(log.iter().all(|e| e.text != "COLONY ALERT: drill 0"));
}

#[test]
fn card_termination_requires_the_code() {
    let mut engine = engine_with_chance(0.0);
    engine
        .expendable_action(8, ExpendableAction::Terminate, &mut FixedAnswer("letmein"))
        .unwrap();
    assert!(engine.colony().expendables().is_active(8));
    engine.advance(1_000);
    assert!(engine.colony().terminal().shows("ERROR: Invalid authorization code."));

    engine
        .expendable_action(8, ExpendableAction::Terminate, &mut FixedAnswer("niflheim"))
        .unwrap();
    assert!(!engine.colony().expendables().is_active(8));
    engine.advance(4_500);
    assert!(engine.colony().terminal().shows("Mickey #8 has been terminated."));
}

#[test]
fn contact_and_track_cards() {
    let mut engine = engine_with_chance(0.0);
    let mut unused = FixedAnswer("");
    engine
        .expendable_action(7, ExpendableAction::Contact, &mut unused)
        .unwrap();
    engine
        .expendable_action(8, ExpendableAction::Track, &mut unused)
        .unwrap();
    engine.advance(1_500);
    let terminal = engine.colony().terminal();
    assert!(terminal.shows("Connection established with Mickey Barnes #7"));
    assert!(terminal.shows("M7> Why are there two of me now? Did you make another one?"));
    assert!(terminal.shows("Location: Colony Hub"));
    assert!(terminal.shows("Distance from colony hub: 0km"));
}

#[test]
fn ship_diagnostic_reads_live_values() {
    let mut engine = engine_with_chance(0.0);
    engine.ship_action(ShipAction::Status);
    engine.advance(1_500);
    assert!(engine.colony().terminal().shows("Hull integrity: 92% - "));
    assert!(engine.colony().terminal().shows("Communication arrays: Functional"));
}

#[test]
fn same_seed_same_simulation() {
    let mut a = ColonyEngine::with_seed(7);
    let mut b = ColonyEngine::with_seed(7);
    a.advance(120_000);
    b.advance(120_000);
    let (ea, eb) = (a.colony().expendables(), b.colony().expendables());
    for id in [7, 8] {
        assert_eq!(ea.get(id).unwrap().health, eb.get(id).unwrap().health);
        assert_eq!(ea.get(id).unwrap().memory, eb.get(id).unwrap().memory);
    }
    assert_eq!(a.colony().ship().ship().fuel, b.colony().ship().ship().fuel);
}

#[test]
fn shutdown_drops_pending_work() {
    let mut engine = engine_with_chance(0.0);
    let id = engine.deploy(short_recon(7, 3)).unwrap();
    engine.shutdown();
    assert_eq!(engine.state(), EngineState::ShutDown);
    assert_eq!(engine.advance(60_000), 0);
    assert_eq!(
        engine.colony().missions().get(&id).unwrap().status(),
        MissionStatus::Active
    );
}
