use rand::Rng;

/// Cell value of an empty square. Ids 1..=7 are the piece colors.
pub const EMPTY: u8 = 0;

/// Largest template dimension (the I piece).
pub const MAX_PIECE_SIZE: usize = 4;

// -------------------------------------------------------------------
// Piece catalog. Ids double as the cell color index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I = 1,
    O = 2,
    T = 3,
    S = 4,
    Z = 5,
    L = 6,
    J = 7,
}

const TEMPLATE_I: &[&[u8]] = &[&[1, 1, 1, 1]];
const TEMPLATE_O: &[&[u8]] = &[&[2, 2], &[2, 2]];
const TEMPLATE_T: &[&[u8]] = &[&[0, 3, 0], &[3, 3, 3]];
const TEMPLATE_S: &[&[u8]] = &[&[4, 4, 0], &[0, 4, 4]];
const TEMPLATE_Z: &[&[u8]] = &[&[0, 5, 5], &[5, 5, 0]];
const TEMPLATE_L: &[&[u8]] = &[&[6, 6, 6], &[6, 0, 0]];
const TEMPLATE_J: &[&[u8]] = &[&[7, 7, 7], &[0, 0, 7]];

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Looks a kind up by its cell id (1..=7).
    pub fn from_id(id: u8) -> Option<PieceKind> {
        match id {
            1..=7 => Some(Self::ALL[id as usize - 1]),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// The raw, possibly non-square template rows.
    pub fn template(self) -> &'static [&'static [u8]] {
        match self {
            PieceKind::I => TEMPLATE_I,
            PieceKind::O => TEMPLATE_O,
            PieceKind::T => TEMPLATE_T,
            PieceKind::S => TEMPLATE_S,
            PieceKind::Z => TEMPLATE_Z,
            PieceKind::L => TEMPLATE_L,
            PieceKind::J => TEMPLATE_J,
        }
    }

    pub fn matrix(self) -> PieceMatrix {
        normalize(self.template())
    }

    /// Uniformly random kind.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

// -------------------------------------------------------------------
/// Square N×N grid of cell values, stored in a fixed 4×4 buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceMatrix {
    size: usize,
    cells: [[u8; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl PieceMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at `(x, y)`; anything outside the square reads as empty.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.size && y < self.size {
            self.cells[y][x]
        } else {
            EMPTY
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells[..self.size].iter().map(move |row| &row[..self.size])
    }

    /// Nonzero cells as `(dx, dy, value)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &value)| value != EMPTY)
                .map(move |(dx, &value)| (dx as i32, dy as i32, value))
        })
    }

    /// Clockwise quarter turn: `result[x][y] = original[N-1-y][x]`.
    pub fn rotated(&self) -> PieceMatrix {
        let n = self.size;
        let mut cells = [[EMPTY; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (x, row) in cells.iter_mut().enumerate().take(n) {
            for (y, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - y][x];
            }
        }
        PieceMatrix { size: n, cells }
    }
}

/// Pads a template into a square of side `max(rows, cols)`.
pub fn normalize(template: &[&[u8]]) -> PieceMatrix {
    let cols = template.iter().map(|row| row.len()).max().unwrap_or(0);
    let size = template.len().max(cols).min(MAX_PIECE_SIZE);
    let mut cells = [[EMPTY; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
    for (y, row) in template.iter().enumerate().take(size) {
        for (x, &value) in row.iter().enumerate().take(size) {
            cells[y][x] = value;
        }
    }
    PieceMatrix { size, cells }
}
