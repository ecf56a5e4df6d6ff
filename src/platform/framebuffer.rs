//! In-memory 1-bit frame buffer
//!
//! Implements [`Surface`] by rasterising through embedded-graphics, so the
//! same drawing code runs on the desktop and against a real panel driver.
//! Pixels outside the buffer are clipped silently.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_5X8},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use super::{Bitmap, Surface};
use crate::consts::{CHAR_HEIGHT, CHAR_WIDTH};

/// Text font. Layout code measures strings with the `consts` cell size.
const FONT: &MonoFont<'static> = &FONT_5X8;

/// Off-screen monochrome display
pub struct MonoFrameBuffer {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
    /// Number of `present` calls so far
    frames: u64,
}

impl MonoFrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
            frames: 0,
        }
    }

    /// Buffer matching the 128x64 game panel
    pub fn default_size() -> Self {
        Self::new(crate::consts::SCREEN_WIDTH, crate::consts::SCREEN_HEIGHT)
    }

    pub fn is_on(&self, x: i32, y: i32) -> bool {
        self.index(x, y)
            .map(|i| self.pixels[i] == BinaryColor::On)
            .unwrap_or(false)
    }

    /// Count of lit pixels
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p == BinaryColor::On).count()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Text dump, `#` for lit pixels
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                out.push(if self.is_on(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    fn set(&mut self, x: i32, y: i32, color: BinaryColor) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }
}

impl DrawTarget for MonoFrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set(coord.x, coord.y, color);
        }
        Ok(())
    }
}

impl OriginDimensions for MonoFrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Surface for MonoFrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(BinaryColor::Off);
    }

    fn present(&mut self) {
        self.frames += 1;
    }

    fn pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        self.set(x, y, color);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self);
    }

    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: BinaryColor) {
        let _ = Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: BinaryColor) {
        let _ = Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: BinaryColor) {
        let style = MonoTextStyle::new(FONT, color);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    fn blit(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        for by in 0..bitmap.height() {
            for bx in 0..bitmap.width() {
                if bitmap.is_set(bx, by) {
                    self.set(x + bx as i32, y + by as i32, BinaryColor::On);
                }
            }
        }
    }
}
