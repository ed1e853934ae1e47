use crate::colony::{Colony, Task};
use crate::models::events::ColonyEvent;
use crate::models::line::TerminalLine;
use crate::models::sector_map::SectorStatus;

/// Sector readings the scan reports once it finishes.
const SCAN_FINDINGS: [(u8, SectorStatus); 3] = [
    (4, SectorStatus::Warning),
    (7, SectorStatus::Danger),
    (12, SectorStatus::Warning),
];

/// Perimeter scan. Sweeps sectors one line at a time, then reports creeper
/// activity and updates the map.
pub fn perimeter_scan(colony: &mut Colony) {
    colony.say(TerminalLine::plain("Initiating perimeter scan..."));

    let sweep = [
        (1000, TerminalLine::plain("Scanning sector 1...")),
        (1300, TerminalLine::plain("Scanning sector 2...")),
        (1600, TerminalLine::plain("Scanning sector 3...")),
        (
            2000,
            TerminalLine::warning("Scanning sector 4... Alert: Creeper activity detected"),
        ),
        (2400, TerminalLine::plain("Continuing scan...")),
    ];
    for (delay, line) in sweep {
        colony.say_after(delay, vec![line]);
    }

    colony.say_after(
        2900,
        vec![
            TerminalLine::success("Scan complete. Results:"),
            TerminalLine::plain("Creeper activity detected in sectors 4, 7, and 12."),
            TerminalLine::plain("Unusual movement patterns observed in sector 7."),
            TerminalLine::warning("Recommend immediate investigation of sector 7."),
        ],
    );
    // same due time, queued after the results so they print first
    colony.schedule(2900, Task::MarkSectors(SCAN_FINDINGS.to_vec()));
}

/// Apply sector status changes to the map.
pub fn mark_sectors(colony: &mut Colony, marks: &[(u8, SectorStatus)]) {
    for &(sector, status) in marks {
        if !colony.sectors.mark(sector, status) {
            tracing::debug!(sector, "ignoring mark for unknown sector");
            continue;
        }
        colony.say(TerminalLine::plain(format!(
            "Updated sector {} status to {}",
            sector,
            status.label()
        )));
        colony.emit(ColonyEvent::SectorMarked { sector, status });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColonyConfig;

    #[test]
    fn scan_prints_header_and_queues_sweep() {
        let mut c = Colony::new(ColonyConfig::with_seed(42));
        perimeter_scan(&mut c);
        assert_eq!(c.terminal().screen().len(), 1);
        assert!(c.terminal().shows("Initiating perimeter scan..."));
        // five sweep lines, the results and the map update
        assert_eq!(c.scheduler().len(), 7);
        assert_eq!(c.scheduler().next_due_ms(), Some(1000));
    }

    #[test]
    fn marking_updates_map_and_announces() {
        let mut c = Colony::new(ColonyConfig::with_seed(42));
        c.sectors.mark(7, SectorStatus::Safe);
        mark_sectors(&mut c, &SCAN_FINDINGS);
        assert_eq!(c.sectors().status(7), Some(SectorStatus::Danger));
        assert_eq!(c.sectors().status(4), Some(SectorStatus::Warning));
        assert!(c.terminal().shows("Updated sector 7 status to"));
    }

    #[test]
    fn unknown_sectors_are_skipped() {
        let mut c = Colony::new(ColonyConfig::with_seed(42));
        mark_sectors(&mut c, &[(99, SectorStatus::Danger)]);
        assert!(c.terminal().screen().is_empty());
        assert!(c.drain_events().is_empty());
    }
}
