//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ActiveSnapshot, GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Side of the square preview box, in board cells.
const MINI_CELLS: u16 = 4;

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(18, 20, 28);
const GHOST_ALPHA: (u8, u8) = (3, 10);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Display color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x5b, 0xc0, 0xeb),
        PieceKind::O => Rgb::new(0xf9, 0xc7, 0x4f),
        PieceKind::T => Rgb::new(0xb5, 0x17, 0x9e),
        PieceKind::S => Rgb::new(0x43, 0xaa, 0x8b),
        PieceKind::Z => Rgb::new(0xf9, 0x41, 0x44),
        PieceKind::J => Rgb::new(0x27, 0x7d, 0xa1),
        PieceKind::L => Rgb::new(0xf3, 0x72, 0x2c),
    }
}

/// Text drawn across the well for phases that do not accept play input.
pub fn overlay_text(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Idle => Some("PRESS ENTER"),
        GamePhase::Running => None,
        GamePhase::GameOver => Some("GAME OVER"),
    }
}

/// Draws the well, the falling piece with its ghost, and the stats panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Top-left corner of the bordered well.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Width and height of the bordered well in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        let well = CellStyle::new(Rgb::new(60, 64, 76), WELL_BG);
        fb.fill_rect(origin.x + 1, origin.y + 1, frame_w - 2, frame_h - 2, ' ', well);
        draw_border(fb, origin, frame_w, frame_h, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, origin, x as i8, y as i8, piece_color(*kind)),
                    None => self.fill_cell(fb, origin, x as u16, y as u16, '·', well.dim()),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = piece_color(active.kind).scaled(GHOST_ALPHA.0, GHOST_ALPHA.1);
                for (x, y) in active.cells_at(ghost_y) {
                    self.draw_block(fb, origin, x, y, ghost);
                }
            }
            self.draw_active(fb, origin, &active);
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if let Some(text) = overlay_text(snap.phase) {
            draw_overlay_text(fb, origin, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_active(&self, fb: &mut FrameBuffer, origin: Origin, active: &ActiveSnapshot) {
        let color = piece_color(active.kind);
        for (x, y) in active.cells_at(active.y) {
            self.draw_block(fb, origin, x, y, color);
        }
    }

    /// Board cell at (x, y); rows above the top and columns outside the well
    /// are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, origin: Origin, x: i8, y: i8, color: Rgb) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let style = CellStyle::new(color, WELL_BG).bold();
        self.fill_cell(fb, origin, x as u16, y as u16, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = origin.x + 1 + x * self.cell_w;
        let py = origin.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Piece centered in a 4x4 box whose top-left terminal cell is (x, y).
    fn draw_mini(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: Option<PieceKind>, faded: bool) {
        let box_style = CellStyle::new(Rgb::new(60, 64, 76), WELL_BG);
        fb.fill_rect(x, y, MINI_CELLS * self.cell_w, MINI_CELLS * self.cell_h, ' ', box_style);

        let Some(kind) = kind else {
            return;
        };
        let shape = Shape::spawn(kind);
        let offset = (MINI_CELLS - shape.size() as u16) / 2;
        let mut style = CellStyle::new(piece_color(kind), WELL_BG);
        if faded {
            style = style.dim();
        }
        for (col, row) in shape.cells() {
            let px = x + (col as u16 + offset) * self.cell_w;
            let py = y + (row as u16 + offset) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        if viewport.width - panel_x < MINI_CELLS * self.cell_w {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let mini_h = MINI_CELLS * self.cell_h;

        let mut y = origin.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_mini(fb, panel_x, y + 1, Some(snap.next), false);
        y = y.saturating_add(mini_h + 2);

        fb.put_str(panel_x, y, "HOLD", label);
        self.draw_mini(fb, panel_x, y + 1, snap.hold, !snap.can_hold);
        y = y.saturating_add(mini_h + 2);

        if let Some(event) = snap.last_lock.filter(|e| e.points > 0) {
            let award = CellStyle::new(Rgb::new(249, 199, 79), PANEL_BG).bold();
            let w = fb.put_str(panel_x, y, "+", award);
            fb.put_u32(panel_x + w, y, event.points, award);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, origin: Origin, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let Origin { x, y } = origin;

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, origin: Origin, frame_w: u16, frame_h: u16, text: &str) {
    let mid_y = origin.y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
