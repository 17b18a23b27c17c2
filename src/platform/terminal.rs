//! Terminal front end
//!
//! Frames are composited at play-area resolution, then downsampled to the
//! terminal and drawn with upper half-block characters, two pixels per cell.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::style::{self, Color};
use crossterm::{cursor, queue, terminal};
use glam::IVec2;

use super::{Display, InputSource};
use crate::consts::*;
use crate::sim::InputEvent;
use crate::sprite::{Rgba, Sprite};

pub struct TerminalDisplay {
    frame: Sprite,
    stdout: io::Stdout,
    buf: Vec<u8>,
    last_size: Option<(u16, u16)>,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            frame: Sprite::filled(WIN_WIDTH as u32, WIN_HEIGHT as u32, Rgba::rgb(0, 0, 0)),
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
            last_size: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        queue!(
            self.buf,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::Clear(terminal::ClearType::All),
        )?;
        self.flush_buf()?;
        log::debug!("Entered terminal mode");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        queue!(
            self.buf,
            style::ResetColor,
            terminal::EnableLineWrap,
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
        )?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        log::debug!("Left terminal mode");
        Ok(())
    }

    /// The composited frame at play-area resolution
    pub fn frame(&self) -> &Sprite {
        &self.frame
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl Display for TerminalDisplay {
    fn blit(&mut self, sprite: &Sprite, pos: IVec2) {
        self.frame.blit(sprite, pos);
    }

    fn present(&mut self) -> Result<()> {
        let size = terminal::size().unwrap_or((80, 24));
        self.buf.clear();
        if self.last_size != Some(size) {
            queue!(self.buf, terminal::Clear(terminal::ClearType::All))?;
            self.last_size = Some(size);
        }
        encode_half_blocks(&self.frame, size.0, size.1, &mut self.buf)?;
        self.flush_buf()?;
        Ok(())
    }
}

/// Nearest-neighbour downsample of `frame` into `cols` x `rows` cells
fn encode_half_blocks(
    frame: &Sprite,
    cols: u16,
    rows: u16,
    out: &mut impl Write,
) -> io::Result<()> {
    let (cols, rows) = (cols.max(1) as f32, rows.max(1) as f32);
    let scale = (frame.width() as f32 / cols).max(frame.height() as f32 / (rows * 2.0));
    let out_w = (frame.width() as f32 / scale).floor() as u32;
    let out_rows = ((frame.height() as f32 / scale) / 2.0).floor() as u32;

    let sample = |x: u32, y: u32| -> Rgba {
        let sx = (x as f32 * scale) as u32;
        let sy = (y as f32 * scale) as u32;
        frame.get(sx, sy).unwrap_or(Rgba::rgb(0, 0, 0))
    };
    let color = |c: Rgba| Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    };

    let mut prev_fg = None;
    let mut prev_bg = None;
    for row in 0..out_rows {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        for col in 0..out_w {
            let top = sample(col, row * 2);
            let bot = sample(col, row * 2 + 1);

            if top == bot {
                if prev_bg != Some(top) {
                    queue!(out, style::SetBackgroundColor(color(top)))?;
                    prev_bg = Some(top);
                }
                queue!(out, style::Print(' '))?;
            } else {
                if prev_fg != Some(top) {
                    queue!(out, style::SetForegroundColor(color(top)))?;
                    prev_fg = Some(top);
                }
                if prev_bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(color(bot)))?;
                    prev_bg = Some(bot);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
        }
    }
    queue!(out, style::ResetColor)?;
    Ok(())
}

/// Keyboard input from the terminal
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

/// Map a key press to a game event
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('p') | KeyCode::Pause => Some(InputEvent::TogglePause),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(InputEvent::Climb),
        _ => None,
    }
}

/// Releasing any mouse button flaps
pub fn map_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Up(_) => Some(InputEvent::Climb),
        _ => None,
    }
}

/// Map any terminal event to a game event
pub fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Some(ev) = map_event(event::read()?) {
                events.push(ev);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseButton;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(InputEvent::TogglePause));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(InputEvent::Climb));
        assert_eq!(map_key(press(KeyCode::Up)), Some(InputEvent::Climb));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        // 'c' alone is nothing
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_mouse_release_climbs() {
        assert_eq!(
            map_event(mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(InputEvent::Climb)
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::Up(MouseButton::Right))),
            Some(InputEvent::Climb)
        );
        // Only the release counts
        assert_eq!(map_event(mouse(MouseEventKind::Down(MouseButton::Left))), None);
        assert_eq!(map_event(mouse(MouseEventKind::Moved)), None);
        assert_eq!(map_event(Event::Key(press(KeyCode::Char('q')))), Some(InputEvent::Quit));
        assert_eq!(map_event(Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_half_block_encoding_fits_terminal() {
        let mut frame = Sprite::filled(8, 8, Rgba::rgb(10, 20, 30));
        frame.fill_rect(0, 0, 8, 1, Rgba::WHITE);

        let mut out = Vec::new();
        encode_half_blocks(&frame, 4, 2, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        // Top row differs from the row below it, so cells use the half block
        assert!(text.contains('\u{2580}'));
        // Scale 2: 4 cells per row, 2 rows
        assert_eq!(text.matches('\u{2580}').count() + text.matches(' ').count(), 8);
    }

    #[test]
    fn test_blit_lands_in_frame() {
        let mut display = TerminalDisplay::new();
        let sprite = Sprite::filled(2, 2, Rgba::WHITE);
        display.blit(&sprite, IVec2::new(5, 7));
        assert_eq!(display.frame().get(5, 7), Some(Rgba::WHITE));
        assert_eq!(display.frame().get(7, 7), Some(Rgba::rgb(0, 0, 0)));
    }
}
