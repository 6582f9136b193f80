use macroquad::prelude::*;

use crate::board::{BOARD_COLS, BOARD_ROWS};
use crate::game::GameState;
use crate::game_loop::LoopPhase;
use crate::shapes::MAX_PIECE_SIZE;

// -------------------------------------------------------------------
// Colors, indexed by cell value. Slot 0 is never painted.
pub const PALETTE: [Color; 8] = [
    Color { r: 0.0,    g: 0.0,    b: 0.0,    a: 0.0 },
    Color { r: 0.0,    g: 0.9412, b: 0.9412, a: 1.0 }, // I
    Color { r: 0.0,    g: 0.0,    b: 0.9412, a: 1.0 }, // O
    Color { r: 0.9412, g: 0.6275, b: 0.0,    a: 1.0 }, // T
    Color { r: 0.9412, g: 0.9412, b: 0.0,    a: 1.0 }, // S
    Color { r: 0.0,    g: 0.9412, b: 0.0,    a: 1.0 }, // Z
    Color { r: 0.6275, g: 0.0,    b: 0.9412, a: 1.0 }, // L
    Color { r: 0.9412, g: 0.0,    b: 0.0,    a: 1.0 }, // J
];

const BACKGROUND_COLOR: Color = Color::new(0.07, 0.07, 0.09, 1.0);
const SURFACE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const OVERLAY_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.6);
const MARGIN: f32 = 20.0;
const SIDE_PANEL_WIDTH: f32 = 260.0;

/// A rectangular drawing area measured in cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub x: f32,
    pub y: f32,
    pub block: f32,
    pub cols: usize,
    pub rows: usize,
}

impl Surface {
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.block
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.block
    }

    fn clear(&self) {
        draw_rectangle(self.x, self.y, self.width(), self.height(), SURFACE_COLOR);
    }
}

/// Where the board, the next-piece preview and the text panel go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub board: Surface,
    pub preview: Surface,
    pub panel_x: f32,
    pub panel_y: f32,
}

impl Layout {
    pub fn new(block: f32) -> Self {
        let board = Surface {
            x: MARGIN,
            y: MARGIN,
            block,
            cols: BOARD_COLS,
            rows: BOARD_ROWS,
        };
        let preview = Surface {
            x: board.x + board.width() + MARGIN,
            y: MARGIN + 40.0,
            block,
            cols: MAX_PIECE_SIZE,
            rows: MAX_PIECE_SIZE,
        };
        Layout {
            board,
            preview,
            panel_x: preview.x,
            panel_y: preview.y + preview.height() + 40.0,
        }
    }

    pub fn window_size(&self) -> (f32, f32) {
        let width = self.preview.x + self.preview.width().max(SIDE_PANEL_WIDTH) + MARGIN;
        let height = self.board.y + self.board.height() + MARGIN;
        (width, height)
    }
}

/// Paints the nonzero cells of `rows` at `(cell + offset)` on `surface`.
pub fn draw_matrix<'a>(
    rows: impl IntoIterator<Item = &'a [u8]>,
    offset: (i32, i32),
    surface: &Surface,
    palette: &[Color],
) {
    for (y, row) in rows.into_iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let Some(&color) = palette.get(value as usize) else {
                continue;
            };
            let px = surface.x + (x as i32 + offset.0) as f32 * surface.block;
            let py = surface.y + (y as i32 + offset.1) as f32 * surface.block;
            // Cells above the top edge are not drawn.
            if py < surface.y {
                continue;
            }
            draw_block(px, py, surface.block - 1.0, color);
        }
    }
}

fn draw_block(x: f32, y: f32, size: f32, color: Color) {
    draw_rectangle(x, y, size, size, color);
    let highlight = Color::new(
        (color.r + 0.4).min(1.0),
        (color.g + 0.4).min(1.0),
        (color.b + 0.4).min(1.0),
        1.0,
    );
    let shadow = Color::new(color.r * 0.5, color.g * 0.5, color.b * 0.5, 1.0);
    let border = size * 0.15;
    draw_rectangle(x, y, size, border, highlight);
    draw_rectangle(x, y, border, size, highlight);
    draw_rectangle(x, y + size - border, size, border, shadow);
    draw_rectangle(x + size - border, y, border, size, shadow);
}

/// Board, falling piece, preview, numbers and any overlay for one frame.
pub fn draw_frame(game: &GameState, phase: LoopPhase, layout: &Layout, audio_status: &str) {
    clear_background(BACKGROUND_COLOR);

    layout.board.clear();
    draw_matrix(game.board.rows(), (0, 0), &layout.board, &PALETTE);
    if phase != LoopPhase::GameOver {
        draw_matrix(
            game.active.matrix.rows(),
            (game.active.x, game.active.y),
            &layout.board,
            &PALETTE,
        );
    }

    draw_text("Next", layout.preview.x, layout.preview.y - 12.0, 30.0, WHITE);
    layout.preview.clear();
    draw_matrix(game.next.matrix().rows(), (0, 0), &layout.preview, &PALETTE);

    draw_panel(game, layout, audio_status);

    match phase {
        LoopPhase::Ready => draw_banner(&layout.board, "Press Enter to start", 24.0),
        LoopPhase::GameOver => draw_banner(&layout.board, "Game Over", 24.0),
        LoopPhase::Running => {}
    }
}

fn draw_panel(game: &GameState, layout: &Layout, audio_status: &str) {
    let x = layout.panel_x;
    let mut y = layout.panel_y;
    let progression = &game.progression;
    for line in [
        format!("Score: {}", progression.score),
        format!("Lines: {}", progression.lines),
        format!("Level: {}", progression.level),
    ] {
        draw_text(&line, x, y, 30.0, WHITE);
        y += 36.0;
    }

    y += 12.0;
    draw_text(audio_status, x, y, 20.0, GRAY);
    y += 36.0;

    for line in [
        "Left/Right: Move",
        "Down: Soft Drop",
        "Up: Rotate",
        "Enter: Start",
        "M: Music on/off",
        "Tab: Music mode",
    ] {
        draw_text(line, x, y, 20.0, GRAY);
        y += 22.0;
    }
}

fn draw_banner(surface: &Surface, msg: &str, font_size: f32) {
    let band_y = surface.y + surface.height() / 2.0 - 40.0;
    draw_rectangle(surface.x, band_y, surface.width(), 80.0, OVERLAY_COLOR);
    let measure = measure_text(msg, None, font_size as u16, 1.0);
    let x = surface.x + (surface.width() - measure.width) / 2.0;
    let y = surface.y + surface.height() / 2.0 + 8.0;
    draw_text(msg, x, y, font_size, WHITE);
}
