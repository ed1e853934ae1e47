use std::collections::BTreeMap;
use std::fmt;

use super::constants::GRID_SIZE;
use super::position::GridPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorStatus {
    Safe,
    Warning,
    Danger,
    Unknown,
}

impl SectorStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SectorStatus::Safe => "SAFE",
            SectorStatus::Warning => "WARNING",
            SectorStatus::Danger => "DANGER",
            SectorStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            SectorStatus::Safe => '.',
            SectorStatus::Warning => '!',
            SectorStatus::Danger => 'X',
            SectorStatus::Unknown => '?',
        }
    }
}

/// What a map cell represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorLabel {
    Hub,
    Numbered(u8),
    Unmapped,
}

impl fmt::Display for SectorLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SectorLabel::Hub => write!(f, "Hub"),
            SectorLabel::Numbered(n) => write!(f, "{}", n),
            SectorLabel::Unmapped => Ok(()),
        }
    }
}

/// Numbered sectors: (sector, row, col, name).
const SECTORS: [(u8, usize, usize, &str); 12] = [
    (1, 0, 2, "North Ridge"),
    (2, 2, 0, "Western Valley"),
    (3, 2, 3, "Central Plains"),
    (4, 3, 4, "Eastern Plains"),
    (5, 4, 1, "Southern Valley"),
    (6, 5, 2, "Thermal Vents"),
    (7, 3, 6, "Creeper Territory"),
    (8, 6, 5, "Southern Ice Shelf"),
    (9, 3, 2, "Cave System"),
    (10, 1, 6, "Northern Glacier"),
    (11, 5, 7, "Eastern Cliffs"),
    (12, 7, 3, "Deep Ice Shelf"),
];

fn initial_status(label: SectorLabel) -> SectorStatus {
    match label {
        SectorLabel::Hub => SectorStatus::Safe,
        SectorLabel::Numbered(4 | 12) => SectorStatus::Warning,
        SectorLabel::Numbered(7) => SectorStatus::Danger,
        SectorLabel::Numbered(1 | 2 | 3 | 5 | 9) => SectorStatus::Safe,
        _ => SectorStatus::Unknown,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MapCell {
    pub label: SectorLabel,
    pub status: SectorStatus,
}

/// The colony map: sector statuses and where each expendable stands.
#[derive(Debug, Clone)]
pub struct SectorMap {
    /// Internal 0-based indexing: grid[row][col].
    grid: [[MapCell; GRID_SIZE]; GRID_SIZE],
    expendables: BTreeMap<u32, GridPosition>,
}

impl Default for SectorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SectorMap {
    pub fn new() -> Self {
        let mut grid = [[MapCell {
            label: SectorLabel::Unmapped,
            status: SectorStatus::Unknown,
        }; GRID_SIZE]; GRID_SIZE];
        grid[0][0].label = SectorLabel::Hub;
        for (number, row, col, _) in SECTORS {
            grid[row][col].label = SectorLabel::Numbered(number);
        }
        for cell in grid.iter_mut().flatten() {
            cell.status = initial_status(cell.label);
        }

        let mut expendables = BTreeMap::new();
        expendables.insert(7, GridPosition::new(3, 4));
        expendables.insert(8, GridPosition::HUB);

        SectorMap { grid, expendables }
    }

    /// The cell at `pos`, or `None` off the grid.
    pub fn cell(&self, pos: GridPosition) -> Option<&MapCell> {
        self.grid.get(pos.row)?.get(pos.col)
    }

    /// Grid position of a numbered sector.
    pub fn locate(sector: u8) -> Option<GridPosition> {
        SECTORS
            .iter()
            .find(|(n, ..)| *n == sector)
            .map(|(_, row, col, _)| GridPosition::new(*row, *col))
    }

    pub fn sector_name(sector: u8) -> Option<&'static str> {
        SECTORS.iter().find(|(n, ..)| *n == sector).map(|(.., name)| *name)
    }

    pub fn status(&self, sector: u8) -> Option<SectorStatus> {
        Self::locate(sector)
            .and_then(|pos| self.cell(pos))
            .map(|cell| cell.status)
    }

    /// Update a numbered sector's status. Returns false for unknown sectors.
    pub fn mark(&mut self, sector: u8, status: SectorStatus) -> bool {
        match Self::locate(sector) {
            Some(pos) => {
                self.grid[pos.row][pos.col].status = status;
                true
            }
            None => false,
        }
    }

    pub fn expendable_position(&self, id: u32) -> Option<GridPosition> {
        self.expendables.get(&id).copied()
    }

    /// Move a tracked expendable. Untracked ids are ignored.
    pub fn move_expendable(&mut self, id: u32, pos: GridPosition) -> bool {
        match self.expendables.get_mut(&id) {
            Some(current) => {
                *current = pos;
                true
            }
            None => false,
        }
    }

    /// "Sector N", "Colony Hub" or "coordinates r,c". Positions off the grid
    /// are described by their coordinates.
    pub fn describe(&self, pos: GridPosition) -> String {
        match self.cell(pos).map(|cell| cell.label) {
            Some(SectorLabel::Hub) => "Colony Hub".to_string(),
            Some(SectorLabel::Numbered(n)) => format!("Sector {}", n),
            Some(SectorLabel::Unmapped) | None => {
                format!("coordinates {},{}", pos.row, pos.col)
            }
        }
    }

    /// Render one map row. Each cell is four characters wide: a status
    /// symbol, then the sector label or the id of an expendable standing there.
    /// Rows off the grid render blank.
    pub fn render_row(&self, row: usize) -> String {
        (0..GRID_SIZE)
            .map(|col| {
                let pos = GridPosition::new(row, col);
                let Some(cell) = self.cell(pos) else {
                    return "    ".to_string();
                };
                let occupant = self
                    .expendables
                    .iter()
                    .find(|(_, p)| **p == pos)
                    .map(|(id, _)| format!("M{}", id));
                let label = occupant.unwrap_or_else(|| match cell.label {
                    SectorLabel::Hub => "H".to_string(),
                    other => other.to_string(),
                });
                format!("{}{:<3}", cell.status.symbol(), label)
            })
            .collect()
    }
}
