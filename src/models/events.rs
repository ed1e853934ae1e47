use super::line::TerminalLine;
use super::sector_map::SectorStatus;

/// Forms the presentation layer must collect before the colony can act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Deploy,
    Alert,
}

/// State changes published to whatever renders the colony.
#[derive(Debug, Clone, PartialEq)]
pub enum ColonyEvent {
    Line(TerminalLine),
    ScreenCleared,
    ModalOpened(Modal),
    MapFocused,
    SectorMarked { sector: u8, status: SectorStatus },
    ExpendableMoved { id: u32, location: String },
    VitalsUpdated,
    ExpendableTerminated(u32),
    AdminUnlocked,
    MissionDeployed(String),
    MissionCompleted(String),
    AlertIssued { title: String, message: String },
}
