//! Interactive console
//!
//! Drives a `ColonyEngine` from a line-oriented input stream. Plain lines go
//! to the terminal interpreter; lines starting with `!` stand in for the
//! dashboard buttons. Forms opened by commands are filled in through prompts
//! on the same stream.

use std::io::ErrorKind;

use crate::engine::ColonyEngine;
use crate::io::{InputReader, OutputWriter};
use crate::models::constants::PROMPT;
use crate::models::errors::{ColonyError, ColonyResult};
use crate::models::events::{ColonyEvent, Modal};
use crate::models::line::{LineStyle, TerminalLine};
use crate::models::mission::{parse_sector, DurationClass, MissionOrder, MissionType, Priority};
use crate::models::mission_log::LogFilter;
use crate::scheduler::Clock;
use crate::services::expendables::ExpendableAction;
use crate::services::missions::{AlertKind, AlertSeverity};
use crate::services::ship::ShipAction;
use crate::services::terminal::Completion;
use crate::ui::presenters::{ColonyPresenter, TerminalPresenter};

/// How long the console keeps playing queued output after a command before
/// handing the prompt back.
const SETTLE_WINDOW_MS: u64 = 5_000;

const TRIGGERS: &str = "!contact <id>  !track <id>  !terminate <id>  !ship <status|prep|emergency>  \
!vitals  !log [all|normal|warning|critical]  !map  !protocol  !tab <prefix>  !up  !down  !wait <ms>  !help  !quit";

pub struct Console<'a> {
    engine: ColonyEngine,
    input: &'a mut dyn InputReader,
    output: &'a mut dyn OutputWriter,
    clock: &'a dyn Clock,
    log_filter: LogFilter,
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn is_eof(err: &ColonyError) -> bool {
    matches!(err, ColonyError::Io(e) if e.kind() == ErrorKind::UnexpectedEof)
}

impl<'a> Console<'a> {
    pub fn new(
        engine: ColonyEngine,
        input: &'a mut dyn InputReader,
        output: &'a mut dyn OutputWriter,
        clock: &'a dyn Clock,
    ) -> Self {
        Console {
            engine,
            input,
            output,
            clock,
            log_filter: LogFilter::All,
        }
    }

    pub fn into_engine(self) -> ColonyEngine {
        self.engine
    }

    /// Read and execute lines until `!quit` or end of input.
    pub fn run(&mut self) -> ColonyResult<()> {
        self.print_banner();
        loop {
            let line = match self.input.read_line(PROMPT) {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };
            self.engine.sync(self.clock);
            match self.handle(line.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if is_eof(&e) => break,
                Err(e) => return Err(e),
            }
            self.settle()?;
        }
        self.engine.shutdown();
        self.output.writeln("Connection to Niflheim colony closed.");
        Ok(())
    }

    fn print_banner(&mut self) {
        self.output.writeln("NIFLHEIM COLONY COMMAND CONSOLE");
        self.output
            .writeln("Type \"help\" for terminal commands, \"!help\" for dashboard controls.");
    }

    fn handle(&mut self, line: &str) -> ColonyResult<Flow> {
        match line.strip_prefix('!') {
            Some(trigger) => self.trigger(trigger),
            None => {
                self.engine.submit(line);
                Ok(Flow::Continue)
            }
        }
    }

    fn trigger(&mut self, trigger: &str) -> ColonyResult<Flow> {
        let mut parts = trigger.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().unwrap_or_default();
        tracing::debug!(trigger = %name, arg, "dashboard trigger");

        match name.as_str() {
            "contact" | "track" | "terminate" => {
                let action: ExpendableAction = name.parse()?;
                match arg.parse::<u32>() {
                    Ok(id) => self.engine.expendable_action(id, action, &mut *self.input)?,
                    Err(_) => self.error(ColonyError::InvalidExpendable(arg.to_string())),
                }
            }
            "ship" => match arg.parse::<ShipAction>() {
                Ok(action) => self.engine.ship_action(action),
                Err(e) => self.error(e),
            },
            "vitals" => {
                let colony = self.engine.colony();
                for e in colony.expendables().iter() {
                    ColonyPresenter::show_expendable(e, &mut *self.output);
                }
                ColonyPresenter::show_ship(colony.ship().ship(), &mut *self.output);
            }
            "log" => match self.requested_filter(arg) {
                Ok(filter) => {
                    self.log_filter = filter;
                    ColonyPresenter::show_log(self.engine.colony().log(), filter, &mut *self.output);
                }
                Err(e) => self.error(e),
            },
            "map" => ColonyPresenter::show_map(self.engine.colony().sectors(), &mut *self.output),
            "protocol" => self.engine.open_protocols(),
            "tab" => match self.engine.autocomplete(arg) {
                Completion::Unique(cmd) => {
                    self.output.writeln(&format!("{} {}", PROMPT, cmd));
                    self.engine.submit(cmd);
                }
                Completion::Ambiguous(matches) => {
                    TerminalPresenter::show_completions(&matches, &mut *self.output)
                }
                Completion::NoMatch => TerminalPresenter::show_completions(&[], &mut *self.output),
            },
            "up" | "down" => {
                let recalled = if name == "up" {
                    self.engine.history_previous()
                } else {
                    self.engine.history_next()
                };
                match recalled {
                    Some(cmd) => self.output.writeln(&format!("recall> {}", cmd)),
                    None => self.output.writeln("recall> (history empty)"),
                }
            }
            "wait" => match arg.parse::<u64>() {
                Ok(ms) => {
                    self.clock.sleep_ms(ms);
                    self.engine.sync(self.clock);
                }
                Err(_) => self.error(ColonyError::InvalidField {
                    field: "wait time",
                    value: arg.to_string(),
                }),
            },
            "help" => self.output.writeln(TRIGGERS),
            "quit" | "exit" => return Ok(Flow::Quit),
            other => self.error(ColonyError::InvalidField {
                field: "trigger",
                value: format!("!{}", other),
            }),
        }
        Ok(Flow::Continue)
    }

    /// A bare `!log` repeats the last filter.
    fn requested_filter(&self, arg: &str) -> ColonyResult<LogFilter> {
        if arg.is_empty() {
            Ok(self.log_filter)
        } else {
            arg.parse()
        }
    }

    fn error(&mut self, err: ColonyError) {
        TerminalPresenter::show_line(&TerminalLine::error(err.to_string()), &mut *self.output);
    }

    /// Render pending events and keep playing queued terminal output for a
    /// short window so multi-step narratives appear as they would live.
    fn settle(&mut self) -> ColonyResult<()> {
        let deadline = self.clock.now_ms().saturating_add(SETTLE_WINDOW_MS);
        loop {
            self.engine.sync(self.clock);
            self.render_events()?;
            match self.engine.next_output_due() {
                Some(due) if due <= deadline => {
                    let wait = due.saturating_sub(self.clock.now_ms());
                    if wait > 0 {
                        self.clock.sleep_ms(wait);
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn render_events(&mut self) -> ColonyResult<()> {
        loop {
            let events = self.engine.drain_events();
            if events.is_empty() {
                return Ok(());
            }
            for event in events {
                self.render(event)?;
            }
        }
    }

    fn render(&mut self, event: ColonyEvent) -> ColonyResult<()> {
        match event {
            // already on screen: the operator just typed it
            ColonyEvent::Line(line) if line.style == LineStyle::UserCommand => {}
            ColonyEvent::Line(line) => TerminalPresenter::show_line(&line, &mut *self.output),
            ColonyEvent::ScreenCleared => self.output.clear_screen(),
            ColonyEvent::MapFocused => {
                ColonyPresenter::show_map(self.engine.colony().sectors(), &mut *self.output)
            }
            ColonyEvent::ModalOpened(Modal::Deploy) => self.deploy_form()?,
            ColonyEvent::ModalOpened(Modal::Alert) => self.alert_form()?,
            ColonyEvent::AlertIssued { title, message } => {
                ColonyPresenter::show_alert(&title, &message, &mut *self.output)
            }
            other => tracing::trace!(?other, "event not rendered"),
        }
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> ColonyResult<String> {
        Ok(self.input.read_field(prompt)?)
    }

    /// Read a field, falling back to `default` when left blank.
    fn ask_or<T>(&mut self, prompt: &str, default: T) -> ColonyResult<T>
    where
        T: std::str::FromStr<Err = ColonyError>,
    {
        let raw = self.ask(prompt)?;
        if raw.is_empty() {
            Ok(default)
        } else {
            raw.parse()
        }
    }

    fn deploy_form(&mut self) -> ColonyResult<()> {
        self.output.writeln("=== Mission Deployment ===");
        match self.read_order() {
            Ok(Some(order)) => {
                if let Err(e) = self.engine.deploy(order) {
                    self.error(e);
                }
            }
            Ok(None) => self.output.writeln("Mission deployment cancelled."),
            Err(e) if e.is_user_error() => {
                self.error(e);
                self.output.writeln("Mission deployment cancelled.");
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn read_order(&mut self) -> ColonyResult<Option<MissionOrder>> {
        let raw_id = self.ask("Expendable (7/8, blank to cancel):")?;
        if raw_id.is_empty() {
            return Ok(None);
        }
        let expendable_id = raw_id
            .parse::<u32>()
            .map_err(|_| ColonyError::InvalidExpendable(raw_id.clone()))?;
        let kind = self.ask_or(
            "Mission type (recon/repair/research/contact) [recon]:",
            MissionType::Recon,
        )?;
        let sector = parse_sector(&self.ask("Target sector (1-12):")?)?;
        let duration = self.ask_or(
            "Duration (short/medium/long/extended) [short]:",
            DurationClass::Short,
        )?;
        let priority = self.ask_or(
            "Priority (low/medium/high/critical) [medium]:",
            Priority::Medium,
        )?;
        let notes = self.ask("Notes:")?;
        Ok(Some(MissionOrder {
            expendable_id,
            kind,
            sector,
            duration,
            priority,
            notes,
        }))
    }

    fn read_alert_fields(&mut self) -> ColonyResult<(AlertKind, AlertSeverity)> {
        let kind = self
            .ask("Alert type (creeper/weather/breach/medical/system):")?
            .parse()?;
        let severity = self.ask_or(
            "Severity (notice/warning/danger/critical) [warning]:",
            AlertSeverity::Warning,
        )?;
        Ok((kind, severity))
    }

    fn alert_form(&mut self) -> ColonyResult<()> {
        self.output.writeln("=== Colony Alert ===");
        let fields = self.read_alert_fields();
        let (kind, severity) = match fields {
            Ok(fields) => fields,
            Err(e) if e.is_user_error() => {
                self.error(e);
                self.output.writeln("Alert cancelled.");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let mut message = Vec::new();
        loop {
            let line = self.ask("Message (blank line to send):")?;
            if line.is_empty() {
                break;
            }
            message.push(line);
        }
        if message.is_empty() {
            self.output.writeln("Alert cancelled.");
            return Ok(());
        }
        self.engine.issue_alert(kind, severity, &message.join("\n"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChanceConfig, ColonyConfig};
    use crate::io::test_utils::{MockInput, MockOutput};
    use crate::models::expendable::ExpendableStatus;
    use crate::scheduler::ManualClock;

    fn engine() -> ColonyEngine {
        let mut config = ColonyConfig::with_seed(77);
        config.chances = ChanceConfig::fixed(0.0);
        ColonyEngine::new(config)
    }

    fn run(script: Vec<&str>) -> (String, ColonyEngine) {
        let mut input = MockInput::new(script);
        let mut output = MockOutput::new();
        let clock = ManualClock::new();
        let mut console = Console::new(engine(), &mut input, &mut output, &clock);
        console.run().unwrap();
        let engine = console.into_engine();
        (output.text(), engine)
    }

    #[test]
    fn scan_narrative_plays_before_next_prompt() {
        let (text, _) = run(vec!["scan"]);
        let header = text.find("Initiating perimeter scan...").unwrap();
        let results = text.find("Scan complete. Results:").unwrap();
        assert!(header < results);
        assert!(text.contains("Updated sector 7 status to DANGER"));
        assert!(text.contains("Connection to Niflheim colony closed."));
    }

    #[test]
    fn terminate_then_override_through_console() {
        let (text, engine) = run(vec!["terminate 7", "override niflheim", "!quit"]);
        assert!(text.contains("Mickey #7 has been terminated."));
        assert_eq!(
            engine.colony().expendables().get(7).unwrap().status,
            ExpendableStatus::Terminated
        );
        assert!(!engine.is_running());
    }

    #[test]
    fn deploy_form_collects_order() {
        let (text, engine) = run(vec![
            "deploy", "8", "research", "9", "", "high", "core samples",
        ]);
        assert!(text.contains("=== Mission Deployment ==="));
        assert!(text.contains("Deploying Mickey #8 on research and data collection mission..."));
        assert_eq!(engine.colony().missions().len(), 1);
    }

    #[test]
    fn deploy_form_rejects_bad_sector() {
        let (text, engine) = run(vec!["deploy", "8", "", "13"]);
        assert!(text.contains("[ERROR] Invalid sector: 13"));
        assert!(text.contains("Mission deployment cancelled."));
        assert!(engine.colony().missions().is_empty());
    }

    #[test]
    fn alert_form_broadcasts() {
        let (text, engine) = run(vec![
            "alert",
            "creeper",
            "critical",
            "Creepers at the east gate",
            "",
        ]);
        assert!(text.contains("!!! CREEPER PROXIMITY ALERT !!!"));
        assert_eq!(
            engine.colony().log().newest().unwrap().text,
            "COLONY ALERT: Creepers at the east gate"
        );
    }

    #[test]
    fn card_terminate_prompts_for_code() {
        let (text, engine) = run(vec!["!terminate 8", "niflheim"]);
        assert!(text.contains("Processing termination request for Mickey #8..."));
        assert!(text.contains("Mickey #8 has been terminated."));
        assert!(!engine.colony().expendables().is_active(8));
    }

    #[test]
    fn tab_completes_unique_prefix() {
        let (text, _) = run(vec!["!tab sc", "!tab h"]);
        assert!(text.contains("admin@niflheim:~$ scan"));
        assert!(text.contains("system> help  history"));
    }

    #[test]
    fn clear_blanks_the_view() {
        let mut input = MockInput::new(vec!["status", "clear"]);
        let mut output = MockOutput::new();
        let clock = ManualClock::new();
        Console::new(engine(), &mut input, &mut output, &clock)
            .run()
            .unwrap();
        assert_eq!(output.clears, 1);
    }

    #[test]
    fn protocol_button_reflects_admin_state() {
        let (text, _) = run(vec!["!protocol", "override niflheim", "!protocol"]);
        let denied = text.find("Access denied. Administrator authorization required.").unwrap();
        let granted = text.find("Protocols [ADMIN]").unwrap();
        assert!(denied < granted);
    }

    #[test]
    fn unknown_trigger_is_reported() {
        let (text, engine) = run(vec!["!warp 9"]);
        assert!(text.contains("[ERROR] Invalid trigger: !warp"));
        assert!(!engine.is_running());
    }

    #[test]
    fn wait_advances_time() {
        let (_, engine) = run(vec!["!wait 30000"]);
        assert!(engine.colony().now_ms() >= 30_000);
    }

    #[test]
    fn log_view_filters() {
        let (text, _) = run(vec!["override wrong", "!log critical"]);
        assert!(text.contains("[CRITICAL] SECURITY ALERT"));
    }
}
