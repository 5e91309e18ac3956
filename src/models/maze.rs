use serde::{Deserialize, Serialize};

/// Terrain type of a single maze cell, with the stable integer code used in
/// the serialized grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeCellType {
    /// Walkable floor (0)
    Path,
    /// Impassable wall (1)
    Wall,
    /// Entrance cell, always on the border (2)
    Start,
    /// Escape cell, always on the border (3)
    Exit,
}

impl MazeCellType {
    /// The integer code stored in the serialized grid.
    pub const fn value(self) -> u8 {
        match self {
            MazeCellType::Path => 0,
            MazeCellType::Wall => 1,
            MazeCellType::Start => 2,
            MazeCellType::Exit => 3,
        }
    }

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(MazeCellType::Path),
            1 => Some(MazeCellType::Wall),
            2 => Some(MazeCellType::Start),
            3 => Some(MazeCellType::Exit),
            _ => None,
        }
    }
}

/// Items that can be placed on path cells of a generated maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MazeItemType {
    Key,
    Door,
    Flashlight,
    TrapGhost,
    TrapHole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// A placed item. At most one key/door pair exists per maze; the key is
/// always reachable from the start without crossing the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeItem {
    pub row: usize,
    pub col: usize,
    #[serde(rename = "type")]
    pub item_type: MazeItemType,
}

/// Serialized terrain matrix; each cell holds a `MazeCellType` code.
pub type MazeGrid = Vec<Vec<u8>>;

/// Output aggregate of one maze generation call. Immutable after
/// construction; owned exclusively by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeAdventure {
    pub width: usize,
    pub height: usize,
    pub start_position: Position,
    pub grid: MazeGrid,
    pub items: Vec<MazeItem>,
}

impl MazeAdventure {
    /// First item of the given type, if any.
    pub fn find_item(&self, item_type: MazeItemType) -> Option<&MazeItem> {
        self.items.iter().find(|i| i.item_type == item_type)
    }

    /// Locate the exit cell by scanning the grid for its code.
    pub fn exit_position(&self) -> Option<Position> {
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == MazeCellType::Exit.value() {
                    return Some(Position { row, col });
                }
            }
        }
        None
    }
}

/// What actually got placed versus what was requested, so callers can decide
/// whether to retry instead of inferring degradation from output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeReport {
    pub requested_traps: usize,
    pub placed_traps: usize,
    pub door_placed: bool,
    pub key_placed: bool,
    pub flashlight_placed: bool,
}

/// Maze plus its generation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMaze {
    pub maze: MazeAdventure,
    pub report: MazeReport,
}

/// Structured pass/fail result of maze validation. Intended for
/// generation-time assertions, not end-user error handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeValidation {
    pub is_passable: bool,
    pub message: String,
}

impl MazeValidation {
    pub fn pass() -> Self {
        Self {
            is_passable: true,
            message: "maze is completable".to_string(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_passable: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_type_codes() {
        assert_eq!(MazeCellType::Path.value(), 0);
        assert_eq!(MazeCellType::Wall.value(), 1);
        assert_eq!(MazeCellType::Start.value(), 2);
        assert_eq!(MazeCellType::Exit.value(), 3);

        for code in 0..4 {
            let cell = MazeCellType::from_value(code).unwrap();
            assert_eq!(cell.value(), code);
        }
        assert_eq!(MazeCellType::from_value(4), None);
    }

    #[test]
    fn test_maze_adventure_serializes_camel_case() {
        let maze = MazeAdventure {
            width: 2,
            height: 2,
            start_position: Position { row: 0, col: 1 },
            grid: vec![vec![1, 2], vec![1, 0]],
            items: vec![MazeItem {
                row: 1,
                col: 1,
                item_type: MazeItemType::TrapGhost,
            }],
        };

        let json = serde_json::to_value(&maze).unwrap();
        assert_eq!(json["startPosition"]["row"], 0);
        assert_eq!(json["startPosition"]["col"], 1);
        assert_eq!(json["grid"][0][1], 2);
        assert_eq!(json["items"][0]["type"], "TRAP_GHOST");
    }

    #[test]
    fn test_item_type_wire_names() {
        let names: Vec<String> = [
            MazeItemType::Key,
            MazeItemType::Door,
            MazeItemType::Flashlight,
            MazeItemType::TrapGhost,
            MazeItemType::TrapHole,
        ]
        .iter()
        .map(|t| serde_json::to_value(t).unwrap().as_str().unwrap().to_string())
        .collect();

        assert_eq!(names, ["KEY", "DOOR", "FLASHLIGHT", "TRAP_GHOST", "TRAP_HOLE"]);
    }

    #[test]
    fn test_exit_position_scan() {
        let maze = MazeAdventure {
            width: 3,
            height: 3,
            start_position: Position { row: 0, col: 1 },
            grid: vec![vec![1, 2, 1], vec![1, 0, 0], vec![1, 1, 3]],
            items: vec![],
        };
        assert_eq!(maze.exit_position(), Some(Position { row: 2, col: 2 }));
    }
}
