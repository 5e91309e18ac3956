use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::levels::{self, GameLevel};
use crate::models::puzzle::{
    Direction, GeneratedPuzzle, GeneratedWordPuzzle, PlacedWord, PuzzleReport, WordCandidate,
    WordPuzzle,
};

/// Whole-puzzle regeneration rounds before accepting a degraded result.
const MAX_GENERATION_ATTEMPTS: usize = 5;
/// An attempt placing at least this share of the level's target word count
/// is accepted without further retries.
const ACCEPT_RATIO: f64 = 0.6;

/// Marker for a cell no word covers yet; replaced by a random letter before
/// the grid leaves the engine.
const EMPTY: char = '\0';

/// Constraint-satisfaction word placement: seats a seed word, then crosses
/// each further candidate with an already-placed word at a matching letter.
/// Pure CPU work; every call owns its grid buffer.
pub struct WordPuzzleGenerator;

impl WordPuzzleGenerator {
    /// Generate a puzzle with a thread-local random source.
    pub fn generate(
        grid_size: usize,
        candidates: &[WordCandidate],
    ) -> Result<GeneratedPuzzle, EngineError> {
        Self::generate_with_rng(&mut rand::rng(), grid_size, candidates)
    }

    /// Same as [`generate`](Self::generate) with an injected random source
    /// for reproducible puzzles.
    pub fn generate_with_rng(
        rng: &mut impl Rng,
        grid_size: usize,
        candidates: &[WordCandidate],
    ) -> Result<GeneratedPuzzle, EngineError> {
        if candidates.len() < 2 {
            return Err(EngineError::InsufficientCandidates(candidates.len()));
        }

        // Long words are the hardest to seat late, so they go first.
        let mut ordered: Vec<&WordCandidate> = candidates.iter().collect();
        ordered.sort_by(|a, b| b.content.chars().count().cmp(&a.content.chars().count()));

        let mut grid = vec![vec![EMPTY; grid_size]; grid_size];
        let mut placed: Vec<PlacedWord> = Vec::new();

        // Seed word: horizontal, centered. A word wider than the grid is
        // skipped entirely.
        let seed = ordered[0];
        let seed_letters = upper_letters(&seed.content);
        if seed_letters.len() <= grid_size {
            let row = grid_size / 2;
            let col = (grid_size - seed_letters.len()) / 2;
            Self::write_word(&mut grid, &seed_letters, row, col, Direction::Across);
            placed.push(Self::placed(seed, &seed_letters, row, col, Direction::Across));
        } else {
            tracing::warn!(word_id = seed.word_id, "seed word wider than the grid, dropping it");
        }

        for candidate in &ordered[1..] {
            let letters = upper_letters(&candidate.content);

            match Self::find_crossing(&grid, &placed, &letters, rng) {
                Some((row, col, direction)) => {
                    Self::write_word(&mut grid, &letters, row, col, direction);
                    placed.push(Self::placed(candidate, &letters, row, col, direction));
                }
                None => {
                    // Dropped, not retried; the caller over-fetches
                    // candidates to absorb exactly this.
                    tracing::debug!(
                        word_id = candidate.word_id,
                        "no valid crossing for candidate, dropping it"
                    );
                }
            }
        }

        Self::fill_empty_cells(&mut grid, rng);

        let report = PuzzleReport {
            requested_words: candidates.len(),
            placed_words: placed.len(),
            retries: 0,
        };
        Ok(GeneratedPuzzle { grid, words: placed, report })
    }

    /// Generate a puzzle for a difficulty level, retrying with a reshuffled
    /// candidate list until enough of the target word count is placed.
    /// Candidates should be over-fetched roughly
    /// [`CANDIDATE_OVERFETCH_FACTOR`](levels::CANDIDATE_OVERFETCH_FACTOR)
    /// times the target count.
    pub fn generate_for_level(
        level: GameLevel,
        candidates: &[WordCandidate],
    ) -> Result<GeneratedWordPuzzle, EngineError> {
        Self::generate_for_level_with_rng(&mut rand::rng(), level, candidates)
    }

    pub fn generate_for_level_with_rng(
        rng: &mut impl Rng,
        level: GameLevel,
        candidates: &[WordCandidate],
    ) -> Result<GeneratedWordPuzzle, EngineError> {
        let params = levels::crossword_params(level);
        let needed = (params.target_word_count as f64 * ACCEPT_RATIO).ceil() as usize;

        // Every attempt tries a fresh combination, the first one included.
        let mut pool: Vec<WordCandidate> = candidates.to_vec();
        pool.shuffle(rng);
        let mut best = Self::generate_with_rng(rng, params.grid_size, &pool)?;
        let mut retries = 0;

        while best.words.len() < needed && retries + 1 < MAX_GENERATION_ATTEMPTS {
            retries += 1;
            pool.shuffle(rng);
            let attempt = Self::generate_with_rng(rng, params.grid_size, &pool)?;
            if attempt.words.len() > best.words.len() {
                best = attempt;
            }
        }

        if best.words.len() < needed {
            tracing::warn!(
                placed = best.words.len(),
                target = params.target_word_count,
                "accepting under-filled puzzle after {} attempts",
                MAX_GENERATION_ATTEMPTS
            );
        }

        let mut report = best.report;
        report.retries = retries;

        let puzzle = WordPuzzle {
            level: level.number(),
            grid_size: params.grid_size,
            words: best.words,
            grid: best.grid,
        };
        Ok(GeneratedWordPuzzle { puzzle, report })
    }

    /// Search the already-placed words, in random order, for a cell where
    /// one of the candidate's letters matches; the candidate then runs
    /// perpendicular through that cell. First geometrically valid placement
    /// wins.
    fn find_crossing(
        grid: &[Vec<char>],
        placed: &[PlacedWord],
        letters: &[char],
        rng: &mut impl Rng,
    ) -> Option<(usize, usize, Direction)> {
        let mut anchors: Vec<&PlacedWord> = placed.iter().collect();
        anchors.shuffle(rng);

        for anchor in anchors {
            let anchor_letters = upper_letters(&anchor.word);
            for (j, &ch) in letters.iter().enumerate() {
                for (k, &anchor_ch) in anchor_letters.iter().enumerate() {
                    if anchor_ch != ch {
                        continue;
                    }

                    // Land letter j of the candidate on letter k of the
                    // anchor, running the other way.
                    let direction = anchor.direction.perpendicular();
                    let (row, col) = match anchor.direction {
                        Direction::Across => (
                            anchor.start_row as i64 - j as i64,
                            anchor.start_col as i64 + k as i64,
                        ),
                        Direction::Down => (
                            anchor.start_row as i64 + k as i64,
                            anchor.start_col as i64 - j as i64,
                        ),
                    };
                    if row < 0 || col < 0 {
                        continue;
                    }
                    let (row, col) = (row as usize, col as usize);

                    if Self::can_place(grid, letters, row, col, direction) {
                        return Some((row, col, direction));
                    }
                }
            }
        }
        None
    }

    /// All placement rules: in bounds; occupied cells must match the letter
    /// being placed (true crossing, never an overwrite); empty cells must
    /// not sit flush against a parallel word; and the cells directly before
    /// the start and after the end must be empty or out of bounds, so two
    /// collinear words cannot read as one token.
    fn can_place(
        grid: &[Vec<char>],
        letters: &[char],
        row: usize,
        col: usize,
        direction: Direction,
    ) -> bool {
        let size = grid.len();
        let len = letters.len();

        match direction {
            Direction::Across => {
                if row >= size || col + len > size {
                    return false;
                }
            }
            Direction::Down => {
                if col >= size || row + len > size {
                    return false;
                }
            }
        }

        for (i, &ch) in letters.iter().enumerate() {
            let (r, c) = match direction {
                Direction::Across => (row, col + i),
                Direction::Down => (row + i, col),
            };
            let cell = grid[r][c];

            if cell != EMPTY && cell != ch {
                return false;
            }
            // Crossing cells are allowed to touch their anchor; fresh cells
            // must keep clear sideways or parallel words would fuse.
            if cell == EMPTY && Self::has_adjacent_letters(grid, r, c, direction) {
                return false;
            }
        }

        let (before_r, before_c) = match direction {
            Direction::Across => (row as i64, col as i64 - 1),
            Direction::Down => (row as i64 - 1, col as i64),
        };
        if Self::occupied(grid, before_r, before_c) {
            return false;
        }

        let (after_r, after_c) = match direction {
            Direction::Across => (row as i64, col as i64 + len as i64),
            Direction::Down => (row as i64 + len as i64, col as i64),
        };
        if Self::occupied(grid, after_r, after_c) {
            return false;
        }

        true
    }

    /// Perpendicular neighbors of a cell the word would newly occupy:
    /// above/below when placing across, left/right when placing down.
    fn has_adjacent_letters(grid: &[Vec<char>], r: usize, c: usize, direction: Direction) -> bool {
        let (r, c) = (r as i64, c as i64);
        match direction {
            Direction::Across => {
                Self::occupied(grid, r - 1, c) || Self::occupied(grid, r + 1, c)
            }
            Direction::Down => Self::occupied(grid, r, c - 1) || Self::occupied(grid, r, c + 1),
        }
    }

    fn occupied(grid: &[Vec<char>], r: i64, c: i64) -> bool {
        let size = grid.len() as i64;
        r >= 0 && r < size && c >= 0 && c < size && grid[r as usize][c as usize] != EMPTY
    }

    fn write_word(
        grid: &mut [Vec<char>],
        letters: &[char],
        row: usize,
        col: usize,
        direction: Direction,
    ) {
        for (i, &ch) in letters.iter().enumerate() {
            match direction {
                Direction::Across => grid[row][col + i] = ch,
                Direction::Down => grid[row + i][col] = ch,
            }
        }
    }

    /// Every cell no word covers gets an independent uniform letter.
    fn fill_empty_cells(grid: &mut [Vec<char>], rng: &mut impl Rng) {
        for row in grid.iter_mut() {
            for cell in row.iter_mut() {
                if *cell == EMPTY {
                    *cell = (b'A' + rng.random_range(0..26u8)) as char;
                }
            }
        }
    }

    fn placed(
        candidate: &WordCandidate,
        letters: &[char],
        row: usize,
        col: usize,
        direction: Direction,
    ) -> PlacedWord {
        PlacedWord {
            word_id: candidate.word_id,
            word: letters.iter().collect(),
            clue: candidate.clue.clone(),
            start_row: row,
            start_col: col,
            direction,
        }
    }
}

fn upper_letters(word: &str) -> Vec<char> {
    word.chars().flat_map(|c| c.to_uppercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn candidate(word_id: i64, content: &str, clue: &str) -> WordCandidate {
        WordCandidate {
            word_id,
            content: content.to_string(),
            clue: clue.to_string(),
        }
    }

    /// Rebuild the letter map from the placed words alone and assert the
    /// structural invariants that survive the random fill: true crossings,
    /// matching grid letters, and no head/tail fusion.
    fn assert_consistent(puzzle: &GeneratedPuzzle, grid_size: usize) {
        let mut covered: HashMap<(usize, usize), char> = HashMap::new();

        for word in &puzzle.words {
            for (i, (r, c)) in word.cells().enumerate() {
                let ch = word.word.chars().nth(i).unwrap();
                assert!(r < grid_size && c < grid_size, "{} out of bounds", word.word);
                assert_eq!(puzzle.grid[r][c], ch, "grid letter mismatch for {}", word.word);
                if let Some(&existing) = covered.get(&(r, c)) {
                    assert_eq!(existing, ch, "conflicting crossing at ({}, {})", r, c);
                }
                covered.insert((r, c), ch);
            }
        }

        // Head and tail cells must not belong to any word.
        for word in &puzzle.words {
            let len = word.word.chars().count() as i64;
            let (br, bc, ar, ac) = match word.direction {
                Direction::Across => (
                    word.start_row as i64,
                    word.start_col as i64 - 1,
                    word.start_row as i64,
                    word.start_col as i64 + len,
                ),
                Direction::Down => (
                    word.start_row as i64 - 1,
                    word.start_col as i64,
                    word.start_row as i64 + len,
                    word.start_col as i64,
                ),
            };
            for (r, c) in [(br, bc), (ar, ac)] {
                if r >= 0 && c >= 0 {
                    assert!(
                        !covered.contains_key(&(r as usize, c as usize)),
                        "{} touches another word end-to-end",
                        word.word
                    );
                }
            }
        }
    }

    #[test]
    fn test_cat_car_cross_on_the_shared_c() {
        let candidates = vec![candidate(1, "CAT", "pet"), candidate(2, "CAR", "vehicle")];
        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = WordPuzzleGenerator::generate_with_rng(&mut rng, 5, &candidates).unwrap();

        assert_eq!(puzzle.words.len(), 2);
        let cat = puzzle.words.iter().find(|w| w.word == "CAT").unwrap();
        let car = puzzle.words.iter().find(|w| w.word == "CAR").unwrap();
        assert_ne!(cat.direction, car.direction);

        // Exactly one shared cell, holding the same letter for both words.
        let cat_cells: Vec<_> = cat.cells().collect();
        let shared: Vec<_> = car.cells().filter(|c| cat_cells.contains(c)).collect();
        assert_eq!(shared.len(), 1);

        assert_consistent(&puzzle, 5);
    }

    #[test]
    fn test_rejects_fewer_than_two_candidates() {
        assert_eq!(
            WordPuzzleGenerator::generate(5, &[]),
            Err(EngineError::InsufficientCandidates(0))
        );
        assert_eq!(
            WordPuzzleGenerator::generate(5, &[candidate(1, "CAT", "pet")]),
            Err(EngineError::InsufficientCandidates(1))
        );
    }

    #[test]
    fn test_grid_is_fully_filled_with_uppercase_letters() {
        let candidates = vec![candidate(1, "CAT", "pet"), candidate(2, "CAR", "vehicle")];
        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = WordPuzzleGenerator::generate_with_rng(&mut rng, 5, &candidates).unwrap();

        assert_eq!(puzzle.grid.len(), 5);
        for row in &puzzle.grid {
            assert_eq!(row.len(), 5);
            for &cell in row {
                assert!(cell.is_ascii_uppercase(), "cell {:?} left unfilled", cell);
            }
        }
    }

    #[test]
    fn test_seed_word_is_centered_across() {
        let candidates = vec![
            candidate(1, "planet", "world"),
            candidate(2, "apple", "fruit"),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let puzzle = WordPuzzleGenerator::generate_with_rng(&mut rng, 9, &candidates).unwrap();

        // Longest candidate goes first, across, centered.
        let seed = &puzzle.words[0];
        assert_eq!(seed.word, "PLANET");
        assert_eq!(seed.direction, Direction::Across);
        assert_eq!(seed.start_row, 4);
        assert_eq!(seed.start_col, 1);
    }

    #[test]
    fn test_oversized_seed_word_is_dropped() {
        let candidates = vec![
            candidate(1, "EXTRAORDINARY", "very unusual"),
            candidate(2, "CAT", "pet"),
            candidate(3, "CAR", "vehicle"),
        ];
        let mut rng = StdRng::seed_from_u64(2);
        let puzzle = WordPuzzleGenerator::generate_with_rng(&mut rng, 5, &candidates).unwrap();

        assert!(puzzle.words.iter().all(|w| w.word != "EXTRAORDINARY"));
        assert_eq!(puzzle.report.requested_words, 3);
    }

    #[test]
    fn test_structural_invariants_across_seeds() {
        let candidates = vec![
            candidate(1, "GARDEN", "yard"),
            candidate(2, "ORANGE", "citrus"),
            candidate(3, "LEMON", "sour fruit"),
            candidate(4, "GRAPE", "wine fruit"),
            candidate(5, "PEAR", "green fruit"),
            candidate(6, "NET", "mesh"),
            candidate(7, "RAG", "cloth"),
        ];
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let puzzle =
                WordPuzzleGenerator::generate_with_rng(&mut rng, 9, &candidates).unwrap();
            assert!(!puzzle.words.is_empty(), "seed {}", seed);
            assert_eq!(puzzle.report.placed_words, puzzle.words.len());
            assert_consistent(&puzzle, 9);
        }
    }

    #[test]
    fn test_same_seed_replays_the_same_puzzle() {
        let candidates = vec![
            candidate(1, "LEMON", "sour fruit"),
            candidate(2, "MELON", "sweet fruit"),
            candidate(3, "NOTE", "memo"),
        ];
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        let first = WordPuzzleGenerator::generate_with_rng(&mut a, 7, &candidates).unwrap();
        let second = WordPuzzleGenerator::generate_with_rng(&mut b, 7, &candidates).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_level_wrapper_fills_level_fields() {
        let candidates = vec![
            candidate(1, "HEART", "organ"),
            candidate(2, "TABLE", "furniture"),
            candidate(3, "EARTH", "planet"),
            candidate(4, "THROW", "toss"),
            candidate(5, "WATER", "drink"),
            candidate(6, "RAIN", "weather"),
            candidate(7, "TREE", "plant"),
            candidate(8, "EAR", "hearing"),
            candidate(9, "RAT", "rodent"),
            candidate(10, "TEA", "drink"),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        let generated =
            WordPuzzleGenerator::generate_for_level_with_rng(&mut rng, GameLevel::First, &candidates)
                .unwrap();
        let puzzle = &generated.puzzle;

        assert_eq!(puzzle.level, 1);
        assert_eq!(puzzle.grid_size, 5);
        assert!(!puzzle.words.is_empty());
        assert_eq!(generated.report.placed_words, puzzle.words.len());
        assert!(generated.report.retries < MAX_GENERATION_ATTEMPTS);
        for row in &puzzle.grid {
            for &cell in row {
                assert!(cell.is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn test_retry_budget_is_consumed_when_candidates_cannot_cross() {
        // Disjoint letter sets: the second word can never intersect the
        // seed, so every attempt places exactly one word and stays under
        // the 60% acceptance threshold (level First needs 3 of 5).
        let candidates = vec![candidate(1, "BBB", "letters"), candidate(2, "CAD", "sketch")];
        let mut rng = StdRng::seed_from_u64(17);
        let generated =
            WordPuzzleGenerator::generate_for_level_with_rng(&mut rng, GameLevel::First, &candidates)
                .unwrap();

        assert_eq!(generated.report.retries, MAX_GENERATION_ATTEMPTS - 1);
        assert_eq!(generated.puzzle.words.len(), 1);
        assert_eq!(generated.report.placed_words, 1);
    }

    #[test]
    fn test_retry_keeps_the_best_attempt() {
        // Same uncrossable pool: whichever attempt wins, the kept result is
        // never worse than a single seeded word and its grid is fully
        // filled like any accepted puzzle.
        let candidates = vec![candidate(1, "BBB", "letters"), candidate(2, "CAD", "sketch")];
        let mut rng = StdRng::seed_from_u64(23);
        let generated =
            WordPuzzleGenerator::generate_for_level_with_rng(&mut rng, GameLevel::First, &candidates)
                .unwrap();

        assert_eq!(generated.puzzle.words.len(), 1);
        for row in &generated.puzzle.grid {
            for &cell in row {
                assert!(cell.is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn test_level_wrapper_propagates_candidate_shortage() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = WordPuzzleGenerator::generate_for_level_with_rng(
            &mut rng,
            GameLevel::First,
            &[candidate(1, "CAT", "pet")],
        );
        assert_eq!(result, Err(EngineError::InsufficientCandidates(1)));
    }
}
