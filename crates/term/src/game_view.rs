//! GameView: maps a board and its HUD into a terminal framebuffer.
//!
//! This module is pure (no I/O). Board row 0 is the bottom of the well, so
//! row `r` lands on screen line `top - r` inside the frame.

use crate::core::{Board, Game, GameStatus, Piece, PieceProvider, PlayerInput};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceType, Position};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything drawn beside the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub status: GameStatus,
    pub score: u32,
    pub pieces_locked: u32,
    pub next: Option<PieceType>,
}

impl Hud {
    pub fn of<P: PieceProvider, I: PlayerInput>(game: &Game<P, I>) -> Self {
        let next = match game.status() {
            GameStatus::Playing => Some(game.next_piece().piece_type()),
            _ => None,
        };
        Self {
            status: game.status(),
            score: game.score(),
            pieces_locked: game.pieces_locked(),
            next,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    show_shadow: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            show_shadow: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_shadow(mut self, show_shadow: bool) -> Self {
        self.show_shadow = show_shadow;
        self
    }

    /// Terminal size of the framed well for `board`.
    pub fn frame_size(&self, board: &Board) -> (u16, u16) {
        let w = cells_u16(board.width()).saturating_mul(self.cell_w);
        let h = cells_u16(board.height());
        (w.saturating_add(2), h.saturating_add(2))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, board: &Board, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size(board);
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;
        let well = Well {
            board,
            origin_x,
            origin_y,
            cell_w: self.cell_w,
        };

        draw_border(fb, origin_x, origin_y, frame_w, frame_h);
        let empty = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        for row in 0..board.height() {
            for column in 0..board.width() {
                well.fill(fb, Position::new(row, column), '·', empty);
            }
        }

        for block in board.blocks() {
            well.fill(fb, block.position, '█', piece_style(block.piece_type));
        }

        if let Some(piece) = board.piece() {
            if self.show_shadow {
                let shadow = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
                for &position in &board.piece_shadow() {
                    well.fill(fb, position, '░', shadow);
                }
            }
            let style = piece_style(piece.piece_type()).bold();
            for &position in &board.piece_positions() {
                well.fill(fb, position, '█', style);
            }
        }

        self.draw_side_panel(fb, hud, origin_x.saturating_add(frame_w).saturating_add(2), origin_y);

        match hud.status {
            GameStatus::Finished => {
                draw_overlay(fb, origin_x, origin_y, frame_w, frame_h, &["GAME OVER", "r to restart"])
            }
            GameStatus::NotStarted => {
                draw_overlay(fb, origin_x, origin_y, frame_w, frame_h, &["r to start"])
            }
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, board: &Board, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, hud, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, hud: &Hud, x: u16, y: u16) {
        if x >= fb.width() || fb.width() - x < 10 {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x, y + 1, hud.score, value);
        fb.put_str(x, y + 3, "PIECES", label);
        fb.put_u32(x, y + 4, hud.pieces_locked, value);

        fb.put_str(x, y + 6, "NEXT", label);
        match hud.next {
            Some(piece_type) => {
                let piece = Piece::new(piece_type);
                let top = piece.top();
                let style = piece_style(piece_type);
                for &p in piece.positions() {
                    let px = x.saturating_add((p.column.max(0) as u16).saturating_mul(self.cell_w));
                    let py = y + 7 + (top - p.row).max(0) as u16;
                    fb.fill_rect(px, py, self.cell_w, 1, '█', style);
                }
            }
            None => fb.put_str(x, y + 7, "-", value),
        }
    }
}

/// Maps board positions onto the framed well.
struct Well<'a> {
    board: &'a Board,
    origin_x: u16,
    origin_y: u16,
    cell_w: u16,
}

impl Well<'_> {
    fn fill(&self, fb: &mut FrameBuffer, position: Position, ch: char, style: CellStyle) {
        if self.board.is_out_of_bounds(position) {
            return;
        }
        let line = cells_u16(self.board.top() - position.row);
        let px = self
            .origin_x
            .saturating_add(1)
            .saturating_add(cells_u16(position.column).saturating_mul(self.cell_w));
        let py = self.origin_y.saturating_add(1).saturating_add(line);
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }
}

/// Cell count as a screen length, clamped to the `u16` range.
fn cells_u16(cells: i32) -> u16 {
    u16::try_from(cells.max(0)).unwrap_or(u16::MAX)
}

fn piece_style(piece_type: PieceType) -> CellStyle {
    let fg = match piece_type {
        PieceType::I => Rgb::new(80, 220, 220),
        PieceType::J => Rgb::new(80, 120, 220),
        PieceType::L => Rgb::new(255, 165, 0),
        PieceType::O => Rgb::new(240, 220, 80),
        PieceType::S => Rgb::new(100, 220, 120),
        PieceType::T => Rgb::new(200, 120, 220),
        PieceType::Z => Rgb::new(220, 80, 80),
    };
    CellStyle::new(fg, WELL_BG)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
    let right = x + w - 1;
    let bottom = y + h - 1;

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(right, y + dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    let first = y.saturating_add((h / 2).saturating_sub(lines.len() as u16 / 2));
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
        fb.put_str(tx, first.saturating_add(i as u16), text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hud(status: GameStatus) -> Hud {
        Hud {
            status,
            score: 0,
            pieces_locked: 0,
            next: None,
        }
    }

    #[test]
    fn row_zero_is_drawn_at_the_bottom() {
        let mut board = Board::new(3, 2).unwrap();
        board.add_block(Position::new(0, 0), PieceType::I);

        let view = GameView::new(1);
        let fb = view.render(&board, &hud(GameStatus::Playing), Viewport::new(5, 4));
        assert_eq!(fb.row_text(0), "┌───┐");
        assert_eq!(fb.row_text(1), "│···│");
        assert_eq!(fb.row_text(2), "│█··│");
        assert_eq!(fb.row_text(3), "└───┘");
    }

    #[test]
    fn oversized_well_is_clipped_to_viewport() {
        let mut board = Board::new(1024, 20).unwrap();
        board.add_block(Position::new(0, 1023), PieceType::T);
        board.add_piece(Piece::new(PieceType::I));

        let view = GameView::new(200);
        assert_eq!(view.frame_size(&board), (u16::MAX, 22));
        let fb = view.render(&board, &hud(GameStatus::Playing), Viewport::new(80, 24));
        assert_eq!((fb.width(), fb.height()), (80, 24));
        assert_eq!(fb.get(0, 1).map(|c| c.ch), Some('┌'));
    }

    #[test]
    fn frame_scales_with_cell_width() {
        let board = Board::new(10, 20).unwrap();
        assert_eq!(GameView::default().frame_size(&board), (22, 22));
        assert_eq!(GameView::new(1).frame_size(&board), (12, 22));
    }
}
