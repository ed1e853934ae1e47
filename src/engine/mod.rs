//! Colony engine
//!
//! Owns the `Colony` context, starts the recurring simulation ticks and
//! runs scheduled tasks as virtual time moves forward. Every entry point a
//! front end needs (typed commands, dashboard buttons, form submissions)
//! goes through here.

use crate::colony::{Colony, Task};
use crate::config::ColonyConfig;
use crate::io::InputReader;
use crate::models::errors::{ColonyError, ColonyResult};
use crate::models::events::ColonyEvent;
use crate::models::mission::MissionOrder;
use crate::scheduler::Clock;
use crate::services::expendables::{self, ExpendableAction};
use crate::services::missions::{self, AlertKind, AlertSeverity};
use crate::services::scan;
use crate::services::ship::{self, ShipAction};
use crate::services::terminal::{self, Completion};

/// Core engine driving the colony simulation
pub struct ColonyEngine {
    colony: Colony,
    state: EngineState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    ShutDown,
}

impl ColonyEngine {
    /// Creates an engine with the recurring vitals, ship and ambient ticks
    /// already queued
    ///
    /// # Arguments
    ///
    /// * `config` - Timings, odds and seed for this session
    pub fn new(config: ColonyConfig) -> Self {
        let mut colony = Colony::new(config);
        expendables::schedule_vitals_tick(&mut colony);
        ship::schedule_systems_tick(&mut colony);
        missions::schedule_ambient_tick(&mut colony);
        tracing::debug!(seed = colony.seed(), "colony engine started");
        ColonyEngine {
            colony,
            state: EngineState::Running,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ColonyConfig::with_seed(seed))
    }

    // ========== Accessor Methods ==========

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    // ========== Terminal ==========

    /// Operator typed a line and pressed enter.
    pub fn submit(&mut self, input: &str) {
        if self.is_running() {
            terminal::submit(&mut self.colony, input);
        }
    }

    /// Run a command as a dashboard button would: no echo, no history.
    pub fn process_command(&mut self, command: &str) {
        if self.is_running() {
            terminal::process_command(&mut self.colony, command);
        }
    }

    pub fn suggestions(&self, prefix: &str) -> Vec<&'static str> {
        terminal::suggestions(prefix)
    }

    pub fn autocomplete(&self, input: &str) -> Completion {
        terminal::autocomplete(input)
    }

    pub fn history_previous(&mut self) -> Option<String> {
        self.colony
            .terminal
            .history_mut()
            .previous()
            .map(str::to_string)
    }

    pub fn history_next(&mut self) -> Option<String> {
        self.colony.terminal.history_mut().next().map(str::to_string)
    }

    // ========== Dashboard & Forms ==========

    /// Submit the mission deployment form.
    ///
    /// # Returns
    ///
    /// The new mission id, or the validation error that rejected the order.
    /// `ShutDown` once the engine has stopped.
    pub fn deploy(&mut self, order: MissionOrder) -> ColonyResult<String> {
        self.ensure_running()?;
        missions::deploy(&mut self.colony, order)
    }

    /// Submit the colony alert form.
    pub fn issue_alert(&mut self, kind: AlertKind, severity: AlertSeverity, message: &str) {
        if self.is_running() {
            missions::issue_alert(&mut self.colony, kind, severity, message);
        }
    }

    /// Press a button on an expendable's card. Termination asks `prompt`
    /// for the authorization code.
    pub fn expendable_action(
        &mut self,
        id: u32,
        action: ExpendableAction,
        prompt: &mut dyn InputReader,
    ) -> ColonyResult<()> {
        self.ensure_running()?;
        expendables::perform_action(&mut self.colony, id, action, prompt)
    }

    /// Press the protocol management button.
    pub fn open_protocols(&mut self) {
        if self.is_running() {
            terminal::open_protocols(&mut self.colony);
        }
    }

    pub fn ship_action(&mut self, action: ShipAction) {
        if self.is_running() {
            ship::perform_action(&mut self.colony, action);
        }
    }

    fn ensure_running(&self) -> ColonyResult<()> {
        match self.state {
            EngineState::Running => Ok(()),
            EngineState::ShutDown => Err(ColonyError::ShutDown),
        }
    }

    // ========== Time ==========

    /// Move virtual time forward by `ms`, running every task that falls due.
    ///
    /// # Returns
    ///
    /// The number of tasks that ran
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.colony.now_ms().saturating_add(ms);
        self.run_until(target)
    }

    /// Catch virtual time up with `clock`.
    pub fn sync(&mut self, clock: &dyn Clock) -> usize {
        self.run_until(clock.now_ms())
    }

    /// Due time of the next queued terminal output, ignoring the recurring
    /// background ticks.
    pub fn next_output_due(&self) -> Option<u64> {
        self.colony.scheduler.next_due_where(|task| {
            !matches!(
                task,
                Task::ExpendableVitals | Task::ShipSystems | Task::AmbientLog
            )
        })
    }

    fn run_until(&mut self, target_ms: u64) -> usize {
        if !self.is_running() {
            return 0;
        }
        let mut fired = 0;
        while let Some(task) = self.colony.scheduler.pop_due(target_ms) {
            self.dispatch(task);
            fired += 1;
        }
        self.colony.scheduler.advance_to(target_ms);
        fired
    }

    fn dispatch(&mut self, task: Task) {
        tracing::trace!(?task, now_ms = self.colony.now_ms(), "task fired");
        let colony = &mut self.colony;
        match task {
            Task::Lines(lines) => colony.say_all(lines),
            Task::MarkSectors(marks) => scan::mark_sectors(colony, &marks),
            Task::ExpendableVitals => {
                expendables::update_vitals(colony);
                expendables::schedule_vitals_tick(colony);
            }
            Task::ShipSystems => {
                ship::update_systems(colony);
                ship::schedule_systems_tick(colony);
            }
            Task::AmbientLog => {
                missions::ambient_tick(colony);
                missions::schedule_ambient_tick(colony);
            }
            Task::MissionUpdate(id) => missions::mission_update(colony, &id),
            Task::MissionComplete(id) => missions::complete_mission(colony, &id),
            Task::MissionComplication(id) => missions::mission_complication(colony, &id),
        }
    }

    /// Take every event published since the last drain.
    pub fn drain_events(&mut self) -> Vec<ColonyEvent> {
        self.colony.drain_events()
    }

    /// Stop the simulation. Pending tasks are dropped and later input is
    /// ignored.
    pub fn shutdown(&mut self) {
        if self.is_running() {
            tracing::debug!(pending = self.colony.scheduler.len(), "colony engine shut down");
            self.colony.scheduler.clear();
            self.state = EngineState::ShutDown;
        }
    }
}
