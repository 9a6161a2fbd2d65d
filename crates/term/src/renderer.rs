//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; later frames only emit the runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::{GameSnapshot, Renderer};
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::game_view::{GameView, Viewport};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Key release and bare modifier events were requested on enter.
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            enhanced_keys: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    ///
    /// Where the terminal supports the keyboard enhancement protocol, bare
    /// Shift presses are requested too so they can be bound to hold.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
            ))?;
            self.enhanced_keys = true;
        }
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The renderer diffs against the previous frame and then swaps buffers,
    /// so the caller gets the old frame back to render into next time.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let prev = self
            .last
            .take()
            .filter(|prev| prev.width() == fb.width() && prev.height() == fb.height());
        encode_into(prev.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        let mut prev = prev.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Renderer`] that draws snapshots with a [`GameView`] to the terminal.
pub struct TerminalPresenter {
    term: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
}

impl TerminalPresenter {
    pub fn new(term: TerminalRenderer, view: GameView) -> Self {
        Self {
            term,
            view,
            fb: FrameBuffer::new(0, 0),
            viewport: Viewport::new(80, 24),
        }
    }

    /// Use this size from now on and redraw everything on the next frame.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.term.invalidate();
    }

    pub fn terminal(&mut self) -> &mut TerminalRenderer {
        &mut self.term
    }

    pub fn into_terminal(self) -> TerminalRenderer {
        self.term
    }
}

impl Renderer for TerminalPresenter {
    type Error = anyhow::Error;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.view.render_into(snapshot, self.viewport, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }
}

/// Encode `next` as terminal commands into `out`.
///
/// With a same-sized `prev` only the runs of changed cells are written.
/// Otherwise the screen is cleared and every row is one run.
pub fn encode_into(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let width = next.width().max(1) as usize;
    let mut pen: Option<CellStyle> = None;
    for (y, row) in next.cells().chunks(width).enumerate() {
        let old = prev.map(|p| &p.cells()[y * width..(y + 1) * width]);
        changed_spans(old, row, |start, end| {
            out.queue(cursor::MoveTo(start as u16, y as u16))?;
            for glyph in &row[start..end] {
                if pen != Some(glyph.style) {
                    queue_style(out, glyph.style)?;
                    pen = Some(glyph.style);
                }
                out.queue(Print(glyph.ch))?;
            }
            Ok(())
        })?;
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    Ok(())
}

/// Call `f(start, end)` for each span of `row` that differs from `old`.
/// A missing `old` row makes the whole row one span.
fn changed_spans(
    old: Option<&[Glyph]>,
    row: &[Glyph],
    mut f: impl FnMut(usize, usize) -> Result<()>,
) -> Result<()> {
    let Some(old) = old else {
        return if row.is_empty() { Ok(()) } else { f(0, row.len()) };
    };

    let mut x = 0;
    while x < row.len() {
        if old[x] == row[x] {
            x += 1;
            continue;
        }
        let start = x;
        while x < row.len() && old[x] != row[x] {
            x += 1;
        }
        f(start, x)?;
    }
    Ok(())
}

/// SGR reset clears colors too, so attributes go first.
fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(style.fg.into()))?;
    out.queue(SetBackgroundColor(style.bg.into()))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn spans(old: Option<&FrameBuffer>, row: &FrameBuffer) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        changed_spans(old.map(|fb| fb.cells()), row.cells(), |start, end| {
            found.push((start, end));
            Ok(())
        })
        .unwrap();
        found
    }

    #[test]
    fn first_frame_clears_and_prints_every_row() {
        let mut fb = FrameBuffer::new(2, 2);
        let style = CellStyle::default();
        fb.put_str(0, 0, "AB", style);
        fb.put_str(0, 1, "CD", style);

        let mut out = Vec::new();
        encode_into(None, &fb, &mut out).unwrap();
        let s = text(&out);
        assert!(s.contains("\x1b[2J"));
        assert!(s.contains("AB"));
        assert!(s.contains("CD"));
    }

    #[test]
    fn unchanged_frame_writes_no_cells() {
        let style = CellStyle::default();
        let mut a = FrameBuffer::new(3, 1);
        a.put_str(0, 0, "abc", style);
        let b = a.clone();

        let mut out = Vec::new();
        encode_into(Some(&a), &b, &mut out).unwrap();
        let s = text(&out);
        assert!(!s.contains('a'));
        assert!(!s.contains("\x1b[2J"));
    }

    #[test]
    fn changed_cell_is_the_only_cell_written() {
        let style = CellStyle::default();
        let mut a = FrameBuffer::new(3, 1);
        a.put_str(0, 0, "abc", style);
        let mut b = a.clone();
        b.put_char(1, 0, 'X', style);

        let mut out = Vec::new();
        encode_into(Some(&a), &b, &mut out).unwrap();
        let s = text(&out);
        assert!(s.contains('X'));
        assert!(!s.contains('c'));
    }

    #[test]
    fn size_change_redraws_everything() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(2, 1);
        let mut b = FrameBuffer::new(3, 1);
        b.put_str(0, 0, "xyz", style);

        let mut out = Vec::new();
        encode_into(Some(&a), &b, &mut out).unwrap();
        let s = text(&out);
        assert!(s.contains("\x1b[2J"));
        assert!(s.contains("xyz"));
    }

    #[test]
    fn spans_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 1);
        let mut b = FrameBuffer::new(6, 1);
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        b.put_char(5, 0, 'Y', style);

        assert_eq!(spans(Some(&a), &b), vec![(1, 4), (5, 6)]);
        assert_eq!(spans(None, &b), vec![(0, 6)]);
    }

    #[test]
    fn rgb_converts_to_true_color() {
        assert_eq!(Color::from(Rgb::new(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
