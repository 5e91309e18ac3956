use std::collections::VecDeque;

use crate::models::maze::{MazeAdventure, MazeCellType, MazeItemType, MazeValidation, Position};

/// Single-step offsets for BFS over walkable cells.
const DR: [i32; 4] = [0, 0, 1, -1];
const DC: [i32; 4] = [1, -1, 0, 0];

/// Independent re-verification of a generated maze. Re-derives completability
/// from the output alone, guarding against generator bugs; never mutates its
/// input, so validating twice gives the same answer.
pub struct MazeValidator;

impl MazeValidator {
    /// Check that the maze is completable under the key-before-door rule:
    /// the key (if any) is reachable from the start, and the exit is
    /// reachable once the door (if any) counts as floor. The start-exit
    /// check runs even for door-less mazes rather than trusting the
    /// generator's carving guarantees.
    pub fn validate(maze: &MazeAdventure) -> MazeValidation {
        let key = maze.find_item(MazeItemType::Key);
        let door = maze.find_item(MazeItemType::Door);

        if door.is_some() && key.is_none() {
            return MazeValidation::fail("door present without a key");
        }

        let start = maze.start_position;

        if let Some(key) = key {
            let key_pos = Position { row: key.row, col: key.col };
            if !Self::can_reach(&maze.grid, start, key_pos) {
                return MazeValidation::fail("key unreachable from start");
            }
        }

        let Some(exit) = maze.exit_position() else {
            return MazeValidation::fail("no exit cell in grid");
        };

        // Assume the player already holds the key: the door cell counts as
        // floor on a working copy of the grid.
        let mut open_grid = maze.grid.clone();
        if let Some(door) = door {
            open_grid[door.row][door.col] = MazeCellType::Path.value();
        }
        if !Self::can_reach(&open_grid, start, exit) {
            return MazeValidation::fail("exit unreachable even with the key");
        }

        MazeValidation::pass()
    }

    /// BFS reachability over non-wall cells, 4-directional.
    fn can_reach(grid: &[Vec<u8>], start: Position, goal: Position) -> bool {
        if start == goal {
            return true;
        }

        let rows = grid.len();
        let cols = grid[0].len();
        let mut visited = vec![vec![false; cols]; rows];
        let mut queue = VecDeque::from([start]);
        visited[start.row][start.col] = true;

        while let Some(pos) = queue.pop_front() {
            for i in 0..4 {
                let nr = pos.row as i32 + DR[i];
                let nc = pos.col as i32 + DC[i];
                if nr < 0 || nr >= rows as i32 || nc < 0 || nc >= cols as i32 {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if visited[nr][nc] || grid[nr][nc] == MazeCellType::Wall.value() {
                    continue;
                }
                if nr == goal.row && nc == goal.col {
                    return true;
                }
                visited[nr][nc] = true;
                queue.push_back(Position { row: nr, col: nc });
            }
        }

        false
    }
}
