use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::levels::{self, GameLevel};
use crate::models::maze::{
    GeneratedMaze, MazeAdventure, MazeCellType, MazeItem, MazeItemType, MazeReport, Position,
};

/// Two-step carving offsets (row, col); carving works on the doubled grid.
const CARVE_DR: [i32; 4] = [-2, 2, 0, 0];
const CARVE_DC: [i32; 4] = [0, 0, -2, 2];
/// Single-step offsets for BFS over walkable cells.
const MOVE_R: [i32; 4] = [-1, 1, 0, 0];
const MOVE_C: [i32; 4] = [0, 0, -1, 1];

/// Attempt cap for best-effort item placement; an item that finds no free
/// cell within this many draws is dropped.
const MAX_ITEM_ATTEMPTS: usize = 50;
/// Solution paths at or below this length skip the key/door gate.
const MIN_GATED_PATH_LEN: usize = 10;

/// Carves a perfect maze, places start/exit, derives a guaranteed solution
/// path and seats items along it. Pure CPU work, no I/O; every call owns its
/// grid buffer, so concurrent calls are independent.
pub struct MazeGenerator;

impl MazeGenerator {
    /// Generate a maze with a thread-local random source.
    ///
    /// `rows` and `cols` must be at least 5; smaller grids make carving
    /// degenerate and are the caller's responsibility to avoid.
    pub fn generate(rows: usize, cols: usize, trap_count: usize) -> GeneratedMaze {
        Self::generate_with_rng(&mut rand::rng(), rows, cols, trap_count)
    }

    /// Generate a maze using the level parameter table.
    pub fn generate_for_level(level: GameLevel) -> GeneratedMaze {
        Self::generate_for_level_with_rng(&mut rand::rng(), level)
    }

    pub fn generate_for_level_with_rng(rng: &mut impl Rng, level: GameLevel) -> GeneratedMaze {
        let params = levels::maze_params(level);
        Self::generate_with_rng(rng, params.rows, params.cols, params.trap_count)
    }

    /// Same as [`generate`](Self::generate) with an injected random source,
    /// so tests can seed a `StdRng` and replay a generation exactly.
    pub fn generate_with_rng(
        rng: &mut impl Rng,
        rows: usize,
        cols: usize,
        trap_count: usize,
    ) -> GeneratedMaze {
        debug_assert!(rows >= 5 && cols >= 5, "maze dimensions below 5 are degenerate");

        let mut grid = vec![vec![MazeCellType::Wall.value(); cols]; rows];
        Self::carve(&mut grid, rng);

        // Entrance corridor: start on the top border, floor right below it.
        grid[0][1] = MazeCellType::Start.value();
        grid[1][1] = MazeCellType::Path.value();
        let start = Position { row: 0, col: 1 };
        let exit = Self::open_exit_on_edge(&mut grid);

        let solution = Self::find_solution_path(&grid, start, exit);
        let (items, report) = Self::place_items(&grid, trap_count, solution.as_deref(), rng);

        GeneratedMaze {
            maze: MazeAdventure {
                width: cols,
                height: rows,
                start_position: start,
                grid,
                items,
            },
            report,
        }
    }

    /// Randomized depth-first carving from (1,1) with an explicit stack; the
    /// recursive variant blows the stack on large grids. Opens the connecting
    /// cell and the two-step target together, which keeps the passage graph a
    /// tree (perfect maze).
    fn carve(grid: &mut [Vec<u8>], rng: &mut impl Rng) {
        let rows = grid.len();
        let cols = grid[0].len();

        grid[1][1] = MazeCellType::Path.value();
        let mut stack: Vec<(usize, usize)> = vec![(1, 1)];

        while let Some(&(r, c)) = stack.last() {
            let mut dirs = [0usize, 1, 2, 3];
            dirs.shuffle(rng);

            let mut advanced = false;
            for dir in dirs {
                let nr = r as i32 + CARVE_DR[dir];
                let nc = c as i32 + CARVE_DC[dir];
                if nr > 0
                    && (nr as usize) < rows - 1
                    && nc > 0
                    && (nc as usize) < cols - 1
                    && grid[nr as usize][nc as usize] == MazeCellType::Wall.value()
                {
                    let wall_r = (r as i32 + CARVE_DR[dir] / 2) as usize;
                    let wall_c = (c as i32 + CARVE_DC[dir] / 2) as usize;
                    grid[wall_r][wall_c] = MazeCellType::Path.value();
                    grid[nr as usize][nc as usize] = MazeCellType::Path.value();
                    stack.push((nr as usize, nc as usize));
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                stack.pop();
            }
        }
    }

    /// Open an exit on the border next to a carved cell: scan the
    /// second-to-last row right to left, then the second-to-last column
    /// bottom to top, then force a fixed fallback cell. An exit always
    /// exists afterwards, even for pathological carvings.
    fn open_exit_on_edge(grid: &mut [Vec<u8>]) -> Position {
        let rows = grid.len();
        let cols = grid[0].len();

        for c in (1..cols - 1).rev() {
            if grid[rows - 2][c] == MazeCellType::Path.value() {
                grid[rows - 1][c] = MazeCellType::Exit.value();
                return Position { row: rows - 1, col: c };
            }
        }
        for r in (1..rows - 1).rev() {
            if grid[r][cols - 2] == MazeCellType::Path.value() {
                grid[r][cols - 1] = MazeCellType::Exit.value();
                return Position { row: r, col: cols - 1 };
            }
        }

        grid[rows - 1][cols - 2] = MazeCellType::Exit.value();
        Position { row: rows - 1, col: cols - 2 }
    }

    /// BFS from start to exit over non-wall cells, reconstructing the cell
    /// sequence through parent pointers. `None` when the exit is unreached;
    /// item placement then falls back to a door-less maze.
    fn find_solution_path(
        grid: &[Vec<u8>],
        start: Position,
        exit: Position,
    ) -> Option<Vec<Position>> {
        let rows = grid.len();
        let cols = grid[0].len();

        let mut visited = vec![vec![false; cols]; rows];
        let mut parent: Vec<Vec<Option<Position>>> = vec![vec![None; cols]; rows];
        let mut queue = VecDeque::new();

        queue.push_back(start);
        visited[start.row][start.col] = true;

        let mut reached = false;
        while let Some(curr) = queue.pop_front() {
            if curr == exit {
                reached = true;
                break;
            }
            for i in 0..4 {
                let nr = curr.row as i32 + MOVE_R[i];
                let nc = curr.col as i32 + MOVE_C[i];
                if nr < 0 || nr >= rows as i32 || nc < 0 || nc >= cols as i32 {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if !visited[nr][nc] && grid[nr][nc] != MazeCellType::Wall.value() {
                    visited[nr][nc] = true;
                    parent[nr][nc] = Some(curr);
                    queue.push_back(Position { row: nr, col: nc });
                }
            }
        }

        if !reached {
            return None;
        }

        let mut path = Vec::new();
        let mut curr = Some(exit);
        while let Some(pos) = curr {
            path.push(pos);
            curr = parent[pos.row][pos.col];
        }
        path.reverse();
        Some(path)
    }

    /// Seat the key/door pair on the solution path, then the optional
    /// flashlight and the requested traps at random free path cells.
    fn place_items(
        grid: &[Vec<u8>],
        trap_count: usize,
        solution: Option<&[Position]>,
        rng: &mut impl Rng,
    ) -> (Vec<MazeItem>, MazeReport) {
        let mut items: Vec<MazeItem> = Vec::new();
        let mut report = MazeReport {
            requested_traps: trap_count,
            placed_traps: 0,
            door_placed: false,
            key_placed: false,
            flashlight_placed: false,
        };

        match solution {
            Some(path) if path.len() > MIN_GATED_PATH_LEN => {
                // Door somewhere in the back half of the only start-exit
                // path, but not on the exit's doorstep; key strictly before
                // it. Key-before-door then holds by construction.
                let min_door = path.len() / 2;
                let max_door = path.len() - 2;
                let door_idx = rng.random_range(min_door..=max_door);
                let door = path[door_idx];
                items.push(MazeItem { row: door.row, col: door.col, item_type: MazeItemType::Door });

                let key_idx = rng.random_range(1..door_idx);
                let key = path[key_idx];
                items.push(MazeItem { row: key.row, col: key.col, item_type: MazeItemType::Key });

                report.door_placed = true;
                report.key_placed = true;
                tracing::debug!(
                    path_len = path.len(),
                    door_idx,
                    key_idx,
                    "placed key/door gate on the solution path"
                );
            }
            _ => {
                // Short or missing path: a door could not gate anything
                // meaningful, so place only a key. A door-less maze is
                // trivially completable.
                report.key_placed =
                    Self::place_single_item(grid, &mut items, MazeItemType::Key, rng);
                tracing::debug!("solution path too short for a gate, placed fallback key only");
            }
        }

        if rng.random_bool(0.5) {
            report.flashlight_placed =
                Self::place_single_item(grid, &mut items, MazeItemType::Flashlight, rng);
        }

        for _ in 0..trap_count {
            let trap_type = if rng.random_bool(0.5) {
                MazeItemType::TrapGhost
            } else {
                MazeItemType::TrapHole
            };
            if Self::place_single_item(grid, &mut items, trap_type, rng) {
                report.placed_traps += 1;
            }
        }

        (items, report)
    }

    /// Best-effort placement at a random interior path cell outside the
    /// start area and free of other items. Returns false when the attempt
    /// budget runs out and the item is dropped.
    fn place_single_item(
        grid: &[Vec<u8>],
        items: &mut Vec<MazeItem>,
        item_type: MazeItemType,
        rng: &mut impl Rng,
    ) -> bool {
        let rows = grid.len();
        let cols = grid[0].len();

        for _ in 0..MAX_ITEM_ATTEMPTS {
            let r = rng.random_range(1..rows - 1);
            let c = rng.random_range(1..cols - 1);

            let in_start_area = r <= 1 && c == 1;
            let on_path = grid[r][c] == MazeCellType::Path.value();
            let occupied = items.iter().any(|i| i.row == r && i.col == c);

            if on_path && !in_start_area && !occupied {
                items.push(MazeItem { row: r, col: c, item_type });
                return true;
            }
        }

        tracing::warn!(
            "no free path cell for {:?} after {} attempts, dropping it",
            item_type,
            MAX_ITEM_ATTEMPTS
        );
        false
    }
}
