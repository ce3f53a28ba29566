//! Bit-packed frame buffer and run primitives
//!
//! Pixel (x, y) lives at byte `(y / 8) * WIDTH + x`, bit `y % 8`, with bit 0
//! the topmost row of its band. This module is the only place in the crate
//! that computes byte/bit offsets; every other component goes through the
//! pixel, run and band operations defined here.

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-scanline bands
pub const PAGES: usize = HEIGHT / 8;

/// Size of the packed pixel store in bytes
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// Logical pixel value
///
/// A stored pixel is always `Off` or `On`. `Invert` is a write mode: it
/// toggles the addressed bits and is accepted by every drawing operation so
/// XOR compositing works uniformly across pixels, runs and blits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel dark
    #[default]
    Off,
    /// Pixel lit
    On,
    /// Toggle the existing pixel
    Invert,
}

/// The packed pixel store for one display frame
///
/// Owned by the caller; create one per screen (or per test) rather than
/// sharing a global. Drawing operations mutate it in place and the flush
/// path reads it back once per frame via [`FrameBuffer::as_bytes`].
#[derive(Clone)]
pub struct FrameBuffer {
    data: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a zeroed (all pixels off) frame buffer
    pub const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
        }
    }

    /// Write one pixel, ignoring out-of-range coordinates
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || x >= WIDTH as i32 || y < 0 || y >= HEIGHT as i32 {
            return;
        }
        self.set_pixel_unchecked(x as usize, y as usize, color);
    }

    /// Write one pixel without bounds checking
    ///
    /// Hot-path variant for loops that have already clipped. The caller must
    /// guarantee `x < WIDTH` and `y < HEIGHT`.
    pub fn set_pixel_unchecked(&mut self, x: usize, y: usize, color: Color) {
        debug_assert!(x < WIDTH && y < HEIGHT);
        let byte = &mut self.data[(y >> 3) * WIDTH + x];
        let mask = 1u8 << (y & 7);
        match color {
            Color::On => *byte |= mask,
            Color::Off => *byte &= !mask,
            Color::Invert => *byte ^= mask,
        }
    }

    /// Read one pixel
    ///
    /// No bounds check; the caller must guarantee `x < WIDTH` and
    /// `y < HEIGHT`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        debug_assert!(x < WIDTH && y < HEIGHT);
        if self.data[(y >> 3) * WIDTH + x] & (1 << (y & 7)) != 0 {
            Color::On
        } else {
            Color::Off
        }
    }

    /// Set every pixel in one bulk pass
    ///
    /// Runs once per frame, so this is a single `fill` over the byte array.
    /// Any color other than `Off` fills with lit pixels.
    pub fn clear(&mut self, color: Color) {
        let fill = if color == Color::Off { 0x00 } else { 0xFF };
        self.data.fill(fill);
    }

    /// Raw view of the packed store for the flush path
    ///
    /// `BUFFER_SIZE` bytes, band-major. Read-only contract: the flush
    /// collaborator must copy or transmit before returning and may not
    /// retain the reference.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Draw a horizontal run of `w` pixels starting at (x, y)
    ///
    /// Clips `x` and `w` to the screen and rejects out-of-range `y`. The run
    /// touches exactly one band, so it is written as one mask per byte
    /// rather than pixel-by-pixel.
    pub fn fill_hline(&mut self, x: i32, y: i32, w: i32, color: Color) {
        if y < 0 || y >= HEIGHT as i32 {
            return;
        }

        let mut x = x;
        let mut w = w;
        if x < 0 {
            w += x;
            x = 0;
        }
        if x + w > WIDTH as i32 {
            w = WIDTH as i32 - x;
        }
        if w <= 0 {
            return;
        }

        let start = (y as usize >> 3) * WIDTH + x as usize;
        let run = &mut self.data[start..start + w as usize];
        let mask = 1u8 << (y & 7);
        match color {
            Color::On => {
                for byte in run {
                    *byte |= mask;
                }
            }
            Color::Off => {
                for byte in run {
                    *byte &= !mask;
                }
            }
            Color::Invert => {
                for byte in run {
                    *byte ^= mask;
                }
            }
        }
    }

    /// Draw a vertical run of `h` pixels starting at (x, y)
    ///
    /// Clips the y range; may cross bands, so each pixel is addressed
    /// individually through the checked pixel write.
    pub fn fill_vline(&mut self, x: i32, y: i32, h: i32, color: Color) {
        let end = (y + h).min(HEIGHT as i32);
        for yy in y.max(0)..end {
            self.set_pixel(x, yy, color);
        }
    }

    /// Combine `bits` into the byte for column `x` of `band`
    ///
    /// The byte-level seam used by the band-aligned blit: `On` ORs the bits
    /// in, `Off` clears them, `Invert` toggles them. Coordinates must
    /// already be in range.
    pub(crate) fn combine_band(&mut self, band: usize, x: usize, bits: u8, mode: Color) {
        debug_assert!(band < PAGES && x < WIDTH);
        let byte = &mut self.data[band * WIDTH + x];
        match mode {
            Color::On => *byte |= bits,
            Color::Off => *byte &= !bits,
            Color::Invert => *byte ^= bits,
        }
    }
}
