//! Glyph rendering and the text cursor
//!
//! Text uses a fixed 6x8 cell: five glyph columns from the font table plus
//! one blank spacing column, scaled by an integer factor. The cursor tracks
//! position, colors, scale and the wrap flag, and turns a byte stream into
//! glyph blits.

use crate::buffer::{Color, FrameBuffer, HEIGHT, WIDTH};
use crate::font;

/// Width of one text cell at scale 1 (glyph columns plus spacing)
pub const CHAR_WIDTH: i32 = 6;

/// Height of one text cell at scale 1
pub const CHAR_HEIGHT: i32 = 8;

impl FrameBuffer {
    /// Draw one character with its cell origin at (x, y)
    ///
    /// Each logical pixel becomes a `size` x `size` block. Background cells
    /// are written only when `background` differs from `color`; passing the
    /// same value for both gives transparent text over existing content.
    pub fn draw_char(
        &mut self,
        x: i32,
        y: i32,
        c: u8,
        color: Color,
        background: Color,
        size: i32,
    ) {
        let draw_background = background != color;

        // Whole-cell clip
        if x >= WIDTH as i32
            || y >= HEIGHT as i32
            || x + font::GLYPH_COLS as i32 * size - 1 < 0
            || y + CHAR_HEIGHT * size - 1 < 0
        {
            return;
        }

        let glyph = font::glyph(c);
        for i in 0..CHAR_WIDTH {
            let mut line = if i == CHAR_WIDTH - 1 {
                0 // spacing column
            } else {
                glyph[i as usize]
            };

            for j in 0..CHAR_HEIGHT {
                let draw_color = if line & 0x1 != 0 { color } else { background };
                if draw_color != Color::Off || draw_background {
                    for a in 0..size {
                        for b in 0..size {
                            self.set_pixel(x + i * size + a, y + j * size + b, draw_color);
                        }
                    }
                }
                line >>= 1;
            }
        }
    }
}

/// Cursor state for streaming text onto a frame buffer
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    cursor_x: i32,
    cursor_y: i32,
    color: Color,
    background: Color,
    size: i32,
    wrap: bool,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCursor {
    /// Create a cursor at the origin: lit text on dark background, scale 1,
    /// wrapping disabled
    pub const fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            color: Color::On,
            background: Color::Off,
            size: 1,
            wrap: false,
        }
    }

    /// Move the cursor to (x, y)
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Current cursor x position
    pub fn cursor_x(&self) -> i32 {
        self.cursor_x
    }

    /// Current cursor y position
    pub fn cursor_y(&self) -> i32 {
        self.cursor_y
    }

    /// Set the glyph color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Set the background color; equal to the glyph color means transparent
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Set the integer scale factor (clamped to at least 1)
    pub fn set_size(&mut self, size: i32) {
        self.size = size.max(1);
    }

    /// Enable or disable wrapping at the right edge
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Write one byte
    ///
    /// `\n` moves to the start of the next text row, `\r` is skipped,
    /// anything else draws a glyph and advances the cursor. With wrapping
    /// enabled, an advance past the last full cell applies the newline step
    /// immediately so the next character starts the following row.
    pub fn write_byte(&mut self, fb: &mut FrameBuffer, c: u8) {
        match c {
            b'\n' => self.newline(),
            b'\r' => {}
            _ => {
                fb.draw_char(
                    self.cursor_x,
                    self.cursor_y,
                    c,
                    self.color,
                    self.background,
                    self.size,
                );
                self.cursor_x += CHAR_WIDTH * self.size;
                if self.wrap && self.cursor_x > WIDTH as i32 - CHAR_WIDTH * self.size {
                    self.newline();
                }
            }
        }
    }

    /// Write a string byte-by-byte
    pub fn write_str(&mut self, fb: &mut FrameBuffer, s: &str) {
        for &c in s.as_bytes() {
            self.write_byte(fb, c);
        }
    }

    /// Clear the screen and home the cursor
    pub fn clear(&mut self, fb: &mut FrameBuffer) {
        fb.clear(Color::Off);
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    fn newline(&mut self) {
        self.cursor_y += CHAR_HEIGHT * self.size;
        self.cursor_x = 0;
    }
}
