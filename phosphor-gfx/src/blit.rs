//! Bitmap compositing
//!
//! Two source encodings are supported, selected by entry point:
//!
//! - band-aligned: 8 rows per byte, bit 0 on top, rows of bands left to
//!   right - the frame buffer's native layout, blitted a byte-column at a
//!   time with a sub-byte vertical shift
//! - row-major 1bpp: one bit per pixel, MSB first within each row byte - the
//!   slow path for bitmaps that were not authored for this buffer layout
//!
//! The write mode comes from the color argument: `On` draws (OR), `Off`
//! erases (AND with the complement), `Invert` toggles (XOR).

use crate::buffer::{Color, FrameBuffer, HEIGHT, PAGES, WIDTH};

/// True when a `w` x `h` box placed at (x, y) misses the screen entirely
fn offscreen(x: i32, y: i32, w: i32, h: i32) -> bool {
    x + w < 0 || x > WIDTH as i32 - 1 || y + h < 0 || y > HEIGHT as i32 - 1
}

impl FrameBuffer {
    /// Blit a band-aligned bitmap of `w` x `h` pixels at (x, y)
    ///
    /// `bitmap` holds `w * ceil(h / 8)` bytes. Each source byte lands in the
    /// destination band covering its top row, shifted down by `y mod 8`;
    /// when that offset is nonzero the remaining high bits spill into the
    /// band below. Columns and bands outside the screen are skipped without
    /// writing.
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32, color: Color) {
        if offscreen(x, y, w, h) {
            return;
        }

        // Euclidean split keeps the offset in 0..8 for negative y and moves
        // the start band up instead.
        let start_band = y.div_euclid(8);
        let y_offset = y.rem_euclid(8) as u32;

        let rows = (h + 7) / 8;
        for a in 0..rows {
            let band = start_band + a;
            if band > PAGES as i32 - 1 {
                break;
            }
            // Band -1 still spills its high bits into band 0
            if band < -1 {
                continue;
            }
            for col in 0..w {
                let dx = x + col;
                if dx > WIDTH as i32 - 1 {
                    break;
                }
                if dx < 0 {
                    continue;
                }
                let bits = bitmap[(a * w + col) as usize];
                if band >= 0 {
                    self.combine_band(band as usize, dx as usize, bits << y_offset, color);
                }
                if y_offset != 0 && band < PAGES as i32 - 1 {
                    self.combine_band(
                        (band + 1) as usize,
                        dx as usize,
                        bits >> (8 - y_offset),
                        color,
                    );
                }
            }
        }
    }

    /// Blit a row-major 1bpp bitmap of `w` x `h` pixels at (x, y)
    ///
    /// Rows are padded to whole bytes; bit 7 of each byte is the leftmost
    /// pixel. Set source bits are written through the checked pixel path,
    /// clear bits leave the destination untouched.
    pub fn draw_bitmap_rows(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        w: i32,
        h: i32,
        color: Color,
    ) {
        if offscreen(x, y, w, h) {
            return;
        }

        let byte_width = (w + 7) / 8;
        for yi in 0..h {
            for xi in 0..w {
                let byte = bitmap[(yi * byte_width + xi / 8) as usize];
                if byte & (0x80 >> (xi & 7)) != 0 {
                    self.set_pixel(x + xi, y + yi, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SPRITE: [u8; 4] = [0b1010_0101, 0xFF, 0x00, 0b0001_1000];

    #[test]
    fn aligned_blit_reproduces_source_bytes() {
        let mut fb = FrameBuffer::new();
        fb.draw_bitmap(10, 8, &SPRITE, 4, 8, Color::On);
        assert_eq!(&fb.as_bytes()[WIDTH + 10..WIDTH + 14], &SPRITE[..]);
        // Bands above and below untouched
        assert_eq!(&fb.as_bytes()[10..14], &[0u8; 4][..]);
        assert_eq!(&fb.as_bytes()[2 * WIDTH + 10..2 * WIDTH + 14], &[0u8; 4][..]);
    }

    #[test]
    fn unaligned_blit_splits_across_bands() {
        let mut fb = FrameBuffer::new();
        fb.draw_bitmap(0, 11, &SPRITE, 4, 8, Color::On);
        for (i, &src) in SPRITE.iter().enumerate() {
            let low = fb.as_bytes()[WIDTH + i];
            let high = fb.as_bytes()[2 * WIDTH + i];
            assert_eq!(low, src << 3);
            assert_eq!(high, src >> 5);
            // Shifting back recombines the original byte
            assert_eq!((low >> 3) | (high << 5), src);
        }
    }

    #[test]
    fn erase_mode_clears_only_source_bits() {
        let mut fb = FrameBuffer::new();
        fb.clear(Color::On);
        fb.draw_bitmap(10, 8, &SPRITE, 4, 8, Color::Off);
        for (i, &src) in SPRITE.iter().enumerate() {
            assert_eq!(fb.as_bytes()[WIDTH + 10 + i], !src);
        }
        assert_eq!(fb.as_bytes()[WIDTH + 14], 0xFF);
    }

    #[test]
    fn invert_mode_toggles_twice_to_identity() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(0, 0, 32, 32, Color::On);
        let before: [u8; 4] = fb.as_bytes()[WIDTH + 10..WIDTH + 14].try_into().unwrap();

        fb.draw_bitmap(10, 8, &SPRITE, 4, 8, Color::Invert);
        assert_eq!(fb.as_bytes()[WIDTH + 10], before[0] ^ SPRITE[0]);
        fb.draw_bitmap(10, 8, &SPRITE, 4, 8, Color::Invert);
        assert_eq!(&fb.as_bytes()[WIDTH + 10..WIDTH + 14], &before[..]);
    }

    #[test]
    fn fully_offscreen_blit_is_a_no_op() {
        let mut fb = FrameBuffer::new();
        fb.draw_bitmap(-4, 0, &SPRITE, 4, 8, Color::On);
        fb.draw_bitmap(WIDTH as i32, 0, &SPRITE, 4, 8, Color::On);
        fb.draw_bitmap(0, -8, &SPRITE, 4, 8, Color::On);
        fb.draw_bitmap(0, HEIGHT as i32, &SPRITE, 4, 8, Color::On);
        fb.draw_bitmap_rows(-8, 0, &SPRITE, 8, 4, Color::On);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn negative_y_clips_top_rows() {
        let mut fb = FrameBuffer::new();
        // Top 3 rows hang off screen; rows 3..8 of the sprite land at y 0..5
        fb.draw_bitmap(0, -3, &SPRITE, 4, 8, Color::On);
        for (i, &src) in SPRITE.iter().enumerate() {
            assert_eq!(fb.as_bytes()[i], src >> 3);
        }
    }

    #[test]
    fn partial_right_edge_clip() {
        let mut fb = FrameBuffer::new();
        fb.draw_bitmap(WIDTH as i32 - 2, 0, &SPRITE, 4, 8, Color::On);
        assert_eq!(fb.as_bytes()[WIDTH - 2], SPRITE[0]);
        assert_eq!(fb.as_bytes()[WIDTH - 1], SPRITE[1]);
    }

    #[test]
    fn row_major_blit_decodes_msb_first() {
        // 12x2: each row is a byte and a half
        let rows: [u8; 4] = [0b1000_0000, 0b0001_0000, 0b0000_0001, 0b1000_0000];
        let mut fb = FrameBuffer::new();
        fb.draw_bitmap_rows(0, 0, &rows, 12, 2, Color::On);

        assert_eq!(fb.get_pixel(0, 0), Color::On);
        assert_eq!(fb.get_pixel(11, 0), Color::On);
        assert_eq!(fb.get_pixel(7, 1), Color::On);
        assert_eq!(fb.get_pixel(8, 1), Color::On);
        let lit: u32 = fb.as_bytes().iter().map(|b| b.count_ones()).sum();
        assert_eq!(lit, 4);
    }

    proptest! {
        #[test]
        fn shifted_blit_recombines_to_source(y in 0i32..48, byte in any::<u8>()) {
            let bitmap = [byte];
            let mut fb = FrameBuffer::new();
            fb.draw_bitmap(0, y, &bitmap, 1, 8, Color::On);

            let offset = (y % 8) as u32;
            let band = (y / 8) as usize;
            let low = fb.as_bytes()[band * WIDTH];
            let recombined = if offset == 0 {
                low
            } else {
                let high = fb.as_bytes()[(band + 1) * WIDTH];
                (low >> offset) | (high << (8 - offset))
            };
            prop_assert_eq!(recombined, byte);
        }
    }
}
