use crate::io::OutputWriter;
use crate::models::constants::GRID_SIZE;
use crate::models::expendable::Expendable;
use crate::models::line::{LineStyle, TerminalLine};
use crate::models::mission_log::{LogFilter, MissionLog};
use crate::models::sector_map::{SectorMap, SectorStatus};
use crate::models::ship::Ship;
use crate::models::timestamp::format_timestamp;
use crate::models::vitals::{percent, VitalLevel};

const BAR_WIDTH: usize = 20;

pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn show_line(line: &TerminalLine, output: &mut dyn OutputWriter) {
        let rendered = match line.style {
            LineStyle::UserCommand => line.text.clone(),
            LineStyle::Plain => format!("system> {}", line.text),
            LineStyle::Success => format!("system> [OK] {}", line.text),
            LineStyle::Warning => format!("system> [WARN] {}", line.text),
            LineStyle::Error => format!("system> [ERROR] {}", line.text),
        };
        output.writeln(&rendered);
    }

    pub fn show_completions(matches: &[&str], output: &mut dyn OutputWriter) {
        if matches.is_empty() {
            output.writeln("system> No matching commands.");
        } else {
            output.writeln(&format!("system> {}", matches.join("  ")));
        }
    }
}

/// Fixed-width gauge for a 0-100 reading.
fn bar(value: f64) -> String {
    let filled = ((value / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn gauge(label: &str, value: f64) -> String {
    format!(
        "  {:<16}{} {:>3}% {}",
        label,
        bar(value),
        percent(value),
        VitalLevel::of(value).label()
    )
}

pub struct ColonyPresenter;

impl ColonyPresenter {
    pub fn show_expendable(e: &Expendable, output: &mut dyn OutputWriter) {
        output.writeln(&format!("{} [{}]", e.name, e.status.label()));
        output.writeln(&gauge("Health", e.health));
        output.writeln(&gauge("Energy", e.energy));
        output.writeln(&gauge("Memory", e.memory));
        output.writeln(&format!(
            "  {:<16}{:.1}°C",
            "Temperature",
            e.temperature_celsius()
        ));
        output.writeln(&format!("  {:<16}{}", "Location", e.location));
    }

    pub fn show_ship(ship: &Ship, output: &mut dyn OutputWriter) {
        output.writeln(&format!("{} [{}] {}", ship.name, ship.status, ship.location));
        for (label, value) in ship.vitals() {
            output.writeln(&gauge(label, value));
        }
    }

    pub fn show_map(map: &SectorMap, output: &mut dyn OutputWriter) {
        let border = format!("+{}+", "-".repeat(GRID_SIZE * 4));
        output.writeln(&border);
        for row in 0..GRID_SIZE {
            output.writeln(&format!("|{}|", map.render_row(row)));
        }
        output.writeln(&border);
        let legend: Vec<String> = [
            SectorStatus::Safe,
            SectorStatus::Warning,
            SectorStatus::Danger,
            SectorStatus::Unknown,
        ]
        .iter()
        .map(|s| format!("{} {}", s.symbol(), s.label()))
        .collect();
        output.writeln(&format!("Legend: {}  M# expendable", legend.join("  ")));
    }

    pub fn show_log(log: &MissionLog, filter: LogFilter, output: &mut dyn OutputWriter) {
        let mut shown = 0;
        for entry in log.filtered(filter) {
            output.writeln(&format!(
                "{} [{}] {}",
                format_timestamp(&entry.timestamp),
                entry.severity.tag(),
                entry.text
            ));
            shown += 1;
        }
        if shown == 0 {
            output.writeln("(no log entries)");
        }
    }

    pub fn show_alert(title: &str, message: &str, output: &mut dyn OutputWriter) {
        let banner = "!".repeat(title.len() + 8);
        output.writeln(&banner);
        output.writeln(&format!("!!! {} !!!", title));
        output.writeln(&banner);
        for line in message.lines() {
            output.writeln(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_utils::MockOutput;
    use crate::models::mission_log::{LogEntry, Severity};
    use crate::models::timestamp::colony_time;

    #[test]
    fn lines_are_tagged_by_style() {
        let mut out = MockOutput::new();
        TerminalPresenter::show_line(&TerminalLine::plain("hello"), &mut out);
        TerminalPresenter::show_line(&TerminalLine::error("bad"), &mut out);
        TerminalPresenter::show_line(
            &TerminalLine::new("admin@niflheim:~$ help", LineStyle::UserCommand),
            &mut out,
        );
        assert_eq!(
            out.messages,
            vec![
                "system> hello\n",
                "system> [ERROR] bad\n",
                "admin@niflheim:~$ help\n"
            ]
        );
    }

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50.0).len(), BAR_WIDTH + 2);
    }

    #[test]
    fn expendable_card_shows_levels() {
        let mut out = MockOutput::new();
        let mut e = Expendable::seven();
        e.energy = 25.0;
        ColonyPresenter::show_expendable(&e, &mut out);
        let text = out.text();
        assert!(text.contains("Mickey Barnes #7 [Active]"));
        assert!(text.contains(" 25% DANGER"));
        assert!(text.contains(" 87% NOMINAL"));
        assert!(text.contains("-24.0°C"));
    }

    #[test]
    fn map_has_a_row_per_grid_line() {
        let mut out = MockOutput::new();
        ColonyPresenter::show_map(&SectorMap::new(), &mut out);
        assert_eq!(out.messages.len(), GRID_SIZE + 3);
        assert!(out.text().contains("Legend:"));
    }

    #[test]
    fn log_view_honours_filter() {
        let mut log = MissionLog::new();
        log.push(LogEntry {
            timestamp: colony_time(0),
            text: "routine".to_string(),
            severity: Severity::Normal,
        });
        log.push(LogEntry {
            timestamp: colony_time(1_000),
            text: "WARNING: drift".to_string(),
            severity: Severity::Warning,
        });
        let mut out = MockOutput::new();
        ColonyPresenter::show_log(&log, LogFilter::Only(Severity::Warning), &mut out);
        assert_eq!(
            out.messages,
            vec!["2054-05-13 14:22:37 [WARNING] WARNING: drift\n"]
        );

        let mut out = MockOutput::new();
        ColonyPresenter::show_log(&log, LogFilter::Only(Severity::Critical), &mut out);
        assert_eq!(out.messages, vec!["(no log entries)\n"]);
    }
}
