//! Colony context
//!
//! One `Colony` owns every manager, the shared mission log, the scheduler
//! and the random source. Handlers receive it by `&mut` instead of reaching
//! for globals.

mod task;

pub use task::Task;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ColonyConfig;
use crate::models::events::ColonyEvent;
use crate::models::line::TerminalLine;
use crate::models::mission_log::{LogEntry, MissionLog, Severity};
use crate::models::sector_map::SectorMap;
use crate::models::timestamp::colony_time;
use crate::scheduler::{Scheduler, TaskId};
use crate::services::expendables::ExpendablesManager;
use crate::services::missions::MissionManager;
use crate::services::ship::ShipManager;
use crate::services::terminal::Terminal;

pub struct Colony {
    config: ColonyConfig,
    seed: u64,
    pub(crate) terminal: Terminal,
    pub(crate) expendables: ExpendablesManager,
    pub(crate) ship: ShipManager,
    pub(crate) missions: MissionManager,
    pub(crate) sectors: SectorMap,
    pub(crate) log: MissionLog,
    pub(crate) scheduler: Scheduler<Task>,
    pub(crate) rng: StdRng,
    events: Vec<ColonyEvent>,
}

impl Colony {
    /// Build a colony in its initial state. No recurring work is scheduled
    /// here; the engine starts the timers.
    pub fn new(config: ColonyConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Colony {
            config,
            seed,
            terminal: Terminal::new(),
            expendables: ExpendablesManager::new(),
            ship: ShipManager::new(),
            missions: MissionManager::new(),
            sectors: SectorMap::new(),
            log: MissionLog::new(),
            scheduler: Scheduler::new(),
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    // ========== Accessor Methods ==========

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Seed actually used for the random source.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn expendables(&self) -> &ExpendablesManager {
        &self.expendables
    }

    pub fn ship(&self) -> &ShipManager {
        &self.ship
    }

    pub fn missions(&self) -> &MissionManager {
        &self.missions
    }

    pub fn sectors(&self) -> &SectorMap {
        &self.sectors
    }

    pub fn log(&self) -> &MissionLog {
        &self.log
    }

    pub fn scheduler(&self) -> &Scheduler<Task> {
        &self.scheduler
    }

    /// Scheduler time in milliseconds since the colony came online.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Colony calendar time.
    pub fn now(&self) -> NaiveDateTime {
        colony_time(self.now_ms())
    }

    // ========== Output Sinks ==========

    /// Append a line to the terminal screen.
    pub fn say(&mut self, line: TerminalLine) {
        self.terminal.screen.push(line.clone());
        self.events.push(ColonyEvent::Line(line));
    }

    pub fn say_all<I: IntoIterator<Item = TerminalLine>>(&mut self, lines: I) {
        for line in lines {
            self.say(line);
        }
    }

    /// Queue a batch of lines to appear after `delay_ms`.
    pub fn say_after(&mut self, delay_ms: u64, lines: Vec<TerminalLine>) -> TaskId {
        self.schedule(delay_ms, Task::Lines(lines))
    }

    /// Append an entry to the shared mission log.
    pub fn record(&mut self, text: impl Into<String>, severity: Severity) {
        let entry = LogEntry {
            timestamp: self.now(),
            text: text.into(),
            severity,
        };
        self.log.push(entry);
    }

    pub fn emit(&mut self, event: ColonyEvent) {
        self.events.push(event);
    }

    /// Take every event published since the last drain.
    pub fn drain_events(&mut self) -> Vec<ColonyEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== Scheduling & Chance ==========

    pub fn schedule(&mut self, delay_ms: u64, task: Task) -> TaskId {
        self.scheduler.schedule_in(delay_ms, task)
    }

    /// True with probability `p`.
    pub fn roll(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }
}
