use crate::models::line::TerminalLine;
use crate::models::sector_map::SectorStatus;

/// Deferred colony work. Recurring ticks re-queue themselves when they run.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Progressive terminal output.
    Lines(Vec<TerminalLine>),
    MarkSectors(Vec<(u8, SectorStatus)>),
    ExpendableVitals,
    ShipSystems,
    AmbientLog,
    MissionUpdate(String),
    MissionComplete(String),
    MissionComplication(String),
}
