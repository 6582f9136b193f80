use crate::game::ActivePiece;
use crate::shapes::EMPTY;

pub const BOARD_COLS: usize = 10;
pub const BOARD_ROWS: usize = 20;

/// Settled cells, row 0 at the top. Values are 0 (empty) or a piece id 1..=7.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[u8; BOARD_COLS]; BOARD_ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[EMPTY; BOARD_COLS]; BOARD_ROWS],
        }
    }

    /// `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize).copied()
    }

    /// Writes a cell; values above 7 and out-of-grid writes are refused.
    pub fn set(&mut self, x: usize, y: usize, value: u8) -> bool {
        if x >= BOARD_COLS || y >= BOARD_ROWS || value > 7 {
            return false;
        }
        self.cells[y][x] = value;
        true
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.iter().map(|row| row.as_slice())
    }

    pub fn row(&self, y: usize) -> &[u8; BOARD_COLS] {
        &self.cells[y]
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c != EMPTY).count()
    }

    fn row_is_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|&c| c != EMPTY)
    }

    /// Removes every full row, bottom to top, shifting the rows above down and
    /// inserting empty rows at the top. Returns how many rows were removed.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_ROWS;
        while y > 0 {
            let row = y - 1;
            if self.row_is_full(row) {
                self.cells.copy_within(0..row, 1);
                self.cells[0] = [EMPTY; BOARD_COLS];
                cleared += 1;
                // `row` now holds what was above it; look at it again.
            } else {
                y -= 1;
            }
        }
        cleared
    }
}

/// True when any filled cell of the piece sits left of column 0, at or past the
/// last column, below the last row, or on an occupied cell. Cells above row 0
/// are allowed.
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    piece.matrix.filled_cells().any(|(dx, dy, _)| {
        let x = piece.x + dx;
        let y = piece.y + dy;
        if x < 0 || x >= BOARD_COLS as i32 || y >= BOARD_ROWS as i32 {
            return true;
        }
        y >= 0 && board.cells[y as usize][x as usize] != EMPTY
    })
}

/// Commits the piece's filled cells into the board. Cells above the grid are dropped.
pub fn merge(board: &mut Board, piece: &ActivePiece) {
    for (dx, dy, value) in piece.matrix.filled_cells() {
        let x = piece.x + dx;
        let y = piece.y + dy;
        if x >= 0 && x < BOARD_COLS as i32 && y >= 0 && y < BOARD_ROWS as i32 {
            board.cells[y as usize][x as usize] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: usize, value: u8) {
        for x in 0..BOARD_COLS {
            board.set(x, y, value);
        }
    }

    #[test]
    fn test_sweep_noop_without_full_rows() {
        let mut board = Board::new();
        board.set(0, 19, 3);
        board.set(9, 5, 1);
        let before = board;
        assert_eq!(board.sweep(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_sweep_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19, 1);
        fill_row(&mut board, 18, 2);
        board.set(4, 17, 5);
        assert_eq!(board.sweep(), 2);
        assert_eq!(board.get(4, 19), Some(5));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_sweep_everything_full() {
        let mut board = Board::new();
        for y in 0..BOARD_ROWS {
            fill_row(&mut board, y, 4);
        }
        assert_eq!(board.sweep(), BOARD_ROWS);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut board = Board::new();
        assert!(!board.set(0, 0, 8));
        assert!(!board.set(BOARD_COLS, 0, 1));
        assert!(!board.set(0, BOARD_ROWS, 1));
        assert_eq!(board.filled_count(), 0);
    }
}
