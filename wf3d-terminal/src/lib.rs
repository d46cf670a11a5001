/// Terminal backend for the wf3d renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use log::{debug, warn};
use nalgebra::Point2;
use std::io::{self, stdout, Stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use wf3d_core::{Backend, Canvas, Color, DrawError, Key, KeySnapshot, WindowEvent};

pub mod cli;
pub mod logging;
pub mod renderer;
pub mod showcase;

pub use renderer::{CellBuffer, TerminalImage};

/// A logical pixel surface drawn onto the terminal's cell grid
pub struct TerminalBackend {
    buffer: CellBuffer,
    logical: (u32, u32),
    title: Option<String>,
    pending_keys: KeySnapshot,
    out: Stdout,
    fps: FpsCounter,
}

/// Frames presented per second, re-estimated about once a second
#[derive(Debug, Clone)]
struct FpsCounter {
    last_sample: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new(now: Instant) -> Self {
        Self {
            last_sample: now,
            frames: 0,
            fps: 0.0,
        }
    }

    fn count(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.last_sample);
        if elapsed.as_secs() >= 1 {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.last_sample = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}

impl TerminalBackend {
    /// Enter raw mode and the alternate screen; both are restored on drop
    pub fn new(width: u32, height: u32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        debug!("terminal backend {cols}x{rows} cells for {width}x{height} px");

        Ok(Self {
            buffer: CellBuffer::new(cols as usize, rows as usize, (width, height)),
            logical: (width, height),
            title: None,
            pending_keys: KeySnapshot::new(),
            out,
            fps: FpsCounter::new(Instant::now()),
        })
    }

    fn draw_overlay(&mut self) -> io::Result<()> {
        let title = self.title.as_deref().unwrap_or("wf3d");
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(TermColor::Black),
            SetForegroundColor(TermColor::Yellow),
            Print(format!("{title} | FPS: {:.1}", self.fps.fps())),
            ResetColor
        )
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        let _ = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

impl Canvas for TerminalBackend {
    type Image = TerminalImage;

    fn clear(&mut self, color: Color) {
        self.buffer.clear(color);
    }

    fn fill_polygon(&mut self, color: Color, points: &[Point2<f64>]) {
        self.buffer.fill_polygon(color, points);
    }

    fn draw_line(&mut self, color: Color, from: Point2<f64>, to: Point2<f64>, width: u32) {
        self.buffer.draw_line(color, from, to, width);
    }

    fn load_image(&mut self, path: &Path) -> Result<Self::Image, DrawError> {
        self.buffer.load_image(path)
    }

    fn blit(&mut self, image: &Self::Image, top_left: Point2<f64>) {
        self.buffer.blit(image, top_left);
    }
}

impl Backend for TerminalBackend {
    fn size(&self) -> (u32, u32) {
        self.logical
    }

    fn set_title(&mut self, title: &str) {
        if let Err(e) = execute!(self.out, terminal::SetTitle(title)) {
            warn!("failed to set terminal title: {e}");
        }
        self.title = Some(title.to_string());
    }

    /// Terminals have no window icon; the image is still loaded so a bad path fails early
    fn set_icon(&mut self, path: &Path) -> Result<(), DrawError> {
        TerminalImage::open(path)?;
        debug!("ignoring window icon {} on terminal backend", path.display());
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!("event poll failed: {e}");
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers,
                    ..
                })) if modifiers.contains(KeyModifiers::CONTROL) => {
                    events.push(WindowEvent::CloseRequested);
                }
                Ok(Event::Key(KeyEvent { code, kind, .. })) => {
                    if kind != KeyEventKind::Release {
                        if let Some(key) = map_key(code) {
                            self.pending_keys.press(key);
                        }
                    }
                }
                Ok(Event::Resize(cols, rows)) => {
                    self.buffer.resize(cols as usize, rows as usize);
                    events.push(WindowEvent::Resized {
                        width: self.logical.0,
                        height: self.logical.1,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("event read failed: {e}");
                    break;
                }
            }
        }
        events
    }

    /// Keys reported since the previous call
    fn pressed_keys(&mut self) -> KeySnapshot {
        std::mem::take(&mut self.pending_keys)
    }

    fn present(&mut self) -> Result<(), DrawError> {
        self.fps.count(Instant::now());
        queue!(self.out, cursor::MoveTo(0, 0))?;
        self.buffer.draw(&mut self.out)?;
        self.draw_overlay()?;
        self.out.flush()?;
        Ok(())
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}
