//! Platform abstraction layer
//!
//! The contracts the game core needs from the board:
//! - Display surface (1-bit pixels, simple primitives, text, blits)
//! - One digital push-button
//! - A tone output (piezo buzzer) and a music sequencer
//! - Pre-decoded bitmaps
//!
//! Real drivers live in the firmware crate; `framebuffer` and `mock` provide
//! in-memory versions for the desktop demo and tests.

pub mod framebuffer;
pub mod mock;

use std::collections::HashMap;
use std::rc::Rc;

pub use embedded_graphics::pixelcolor::BinaryColor;

use crate::audio::Melody;

pub use framebuffer::MonoFrameBuffer;

/// Monochrome display the game draws into every frame
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blank the whole frame
    fn clear(&mut self);
    /// Push the finished frame to the panel
    fn present(&mut self);

    fn pixel(&mut self, x: i32, y: i32, color: BinaryColor);
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor);
    /// Outline rectangle
    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: BinaryColor);
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: BinaryColor);
    /// Text with its top-left corner at (x, y)
    fn text(&mut self, text: &str, x: i32, y: i32, color: BinaryColor);
    /// Copy the set pixels of `bitmap` (unset pixels are transparent)
    fn blit(&mut self, bitmap: &Bitmap, x: i32, y: i32);

    fn hline(&mut self, x: i32, y: i32, len: u32, color: BinaryColor) {
        if len > 0 {
            self.line(x, y, x + len as i32 - 1, y, color);
        }
    }

    fn vline(&mut self, x: i32, y: i32, len: u32, color: BinaryColor) {
        if len > 0 {
            self.line(x, y, x, y + len as i32 - 1, color);
        }
    }
}

/// The game's single push-button
pub trait DigitalInput {
    fn is_pressed(&mut self) -> bool;
}

/// Square-wave tone generator
pub trait ToneOutput {
    fn play(&mut self, frequency_hz: u32, duration_ms: u64);
    fn stop(&mut self);
}

/// Background music sequencer
pub trait MusicPlayer {
    /// Replace whatever is playing with `melody`
    fn play(&mut self, melody: Melody);
    fn stop(&mut self);
    /// Advance the sequencer; called once per frame
    fn tick(&mut self) {}
}

/// 1-bit image, rows packed MSB first and padded to whole bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap already-decoded row data. Returns None if `data` is too short.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let needed = Self::stride(width) * height as usize;
        if data.len() < needed {
            log::warn!("bitmap {}x{} needs {} bytes, got {}", width, height, needed, data.len());
            return None;
        }
        Some(Self { width, height, data })
    }

    /// Build from text rows, `#` marks a set pixel
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        let stride = Self::stride(width);
        let mut data = vec![0u8; stride * height as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    data[y * stride + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        Self { width, height, data }
    }

    fn stride(width: u32) -> usize {
        width.div_ceil(8) as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * Self::stride(self.width) + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }
}

/// Frames of one image or animation strip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSheet {
    frames: Vec<Bitmap>,
}

impl SpriteSheet {
    pub fn new(frames: Vec<Bitmap>) -> Self {
        Self { frames }
    }

    pub fn single(frame: Bitmap) -> Self {
        Self { frames: vec![frame] }
    }

    pub fn frame(&self, index: usize) -> Option<&Bitmap> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Width of the first frame (0 for an empty sheet)
    pub fn frame_width(&self) -> u32 {
        self.frames.first().map(Bitmap::width).unwrap_or(0)
    }
}

/// Named images used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Splash,
    Bird,
    Cat,
    Bird3,
    Dog,
}

/// Pre-loaded sprite sheets keyed by [`Sprite`]
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    sheets: HashMap<Sprite, Rc<SpriteSheet>>,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sprite: Sprite, sheet: SpriteSheet) {
        self.sheets.insert(sprite, Rc::new(sheet));
    }

    pub fn with(mut self, sprite: Sprite, sheet: SpriteSheet) -> Self {
        self.insert(sprite, sheet);
        self
    }

    /// Look up a sheet. Missing sprites draw as nothing.
    pub fn get(&self, sprite: Sprite) -> Rc<SpriteSheet> {
        match self.sheets.get(&sprite) {
            Some(sheet) => Rc::clone(sheet),
            None => {
                log::warn!("sprite {:?} not loaded", sprite);
                Rc::new(SpriteSheet::default())
            }
        }
    }
}
