//! Shape rasterization
//!
//! Everything here is expressed in terms of the pixel and run primitives on
//! [`FrameBuffer`]; no byte-level addressing. Coordinates are signed and may
//! lie off screen, in which case the primitives clip.

use crate::buffer::{Color, FrameBuffer};

/// Top-left corner bit for [`FrameBuffer::draw_circle_quadrants`]
pub const CORNER_TOP_LEFT: u8 = 0x01;
/// Top-right corner bit
pub const CORNER_TOP_RIGHT: u8 = 0x02;
/// Bottom-right corner bit
pub const CORNER_BOTTOM_RIGHT: u8 = 0x04;
/// Bottom-left corner bit
pub const CORNER_BOTTOM_LEFT: u8 = 0x08;

impl FrameBuffer {
    /// Draw a line between two arbitrary points
    ///
    /// Bresenham over the major axis. Steep lines are transposed and
    /// endpoints reordered so the walk always runs low-to-high; the error
    /// term starts at `dx / 2`, which fixes the tie-break so output is
    /// deterministic for a given endpoint pair.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };

        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let mut err = dx / 2;
        let ystep = if y0 < y1 { 1 } else { -1 };

        while x0 <= x1 {
            if steep {
                self.set_pixel(y0, x0, color);
            } else {
                self.set_pixel(x0, y0, color);
            }
            err -= dy;
            if err < 0 {
                y0 += ystep;
                err += dx;
            }
            x0 += 1;
        }
    }

    /// Draw a rectangle outline
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.fill_hline(x, y, w, color);
        self.fill_hline(x, y + h - 1, w, color);
        self.fill_vline(x, y, h, color);
        self.fill_vline(x + w - 1, y, h, color);
    }

    /// Fill a rectangle
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for i in x..x + w {
            self.fill_vline(i, y, h, color);
        }
    }

    /// Draw a circle outline of radius `r` centered on (x0, y0)
    ///
    /// Midpoint algorithm: one octant is computed and emitted with eight-way
    /// symmetry, after seeding the four cardinal points.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, r: i32, color: Color) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.set_pixel(x0, y0 + r, color);
        self.set_pixel(x0, y0 - r, color);
        self.set_pixel(x0 + r, y0, color);
        self.set_pixel(x0 - r, y0, color);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.set_pixel(x0 + x, y0 + y, color);
            self.set_pixel(x0 - x, y0 + y, color);
            self.set_pixel(x0 + x, y0 - y, color);
            self.set_pixel(x0 - x, y0 - y, color);
            self.set_pixel(x0 + y, y0 + x, color);
            self.set_pixel(x0 - y, y0 + x, color);
            self.set_pixel(x0 + y, y0 - x, color);
            self.set_pixel(x0 - y, y0 - x, color);
        }
    }

    /// Draw selected quadrants of a circle outline
    ///
    /// `corners` is a mask of the `CORNER_*` bits. Used standalone and as
    /// the corner pass of [`FrameBuffer::draw_round_rect`]. The cardinal
    /// points are not emitted; rounded rectangles cover them with their
    /// straight edges.
    pub fn draw_circle_quadrants(&mut self, x0: i32, y0: i32, r: i32, corners: u8, color: Color) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if corners & CORNER_BOTTOM_RIGHT != 0 {
                self.set_pixel(x0 + x, y0 + y, color);
                self.set_pixel(x0 + y, y0 + x, color);
            }
            if corners & CORNER_TOP_RIGHT != 0 {
                self.set_pixel(x0 + x, y0 - y, color);
                self.set_pixel(x0 + y, y0 - x, color);
            }
            if corners & CORNER_BOTTOM_LEFT != 0 {
                self.set_pixel(x0 - y, y0 + x, color);
                self.set_pixel(x0 - x, y0 + y, color);
            }
            if corners & CORNER_TOP_LEFT != 0 {
                self.set_pixel(x0 - y, y0 - x, color);
                self.set_pixel(x0 - x, y0 - y, color);
            }
        }
    }

    /// Fill a circle of radius `r` centered on (x0, y0)
    pub fn fill_circle(&mut self, x0: i32, y0: i32, r: i32, color: Color) {
        self.fill_vline(x0, y0 - r, 2 * r + 1, color);
        self.fill_circle_quadrants(x0, y0, r, 0x03, 0, color);
    }

    /// Fill the left and/or right halves of a circle with vertical spans
    ///
    /// `sides` bit 0 selects the right half, bit 1 the left half. `delta`
    /// extends every span downward and is how rounded-rectangle fills
    /// stretch the corner arcs over their straight middle. Some columns are
    /// covered by more than one span, so the invert write mode is only
    /// reliable for outlines and triangle fills, not circle fills.
    pub fn fill_circle_quadrants(
        &mut self,
        x0: i32,
        y0: i32,
        r: i32,
        sides: u8,
        delta: i32,
        color: Color,
    ) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if sides & 0x01 != 0 {
                self.fill_vline(x0 + x, y0 - y, 2 * y + 1 + delta, color);
                self.fill_vline(x0 + y, y0 - x, 2 * x + 1 + delta, color);
            }
            if sides & 0x02 != 0 {
                self.fill_vline(x0 - x, y0 - y, 2 * y + 1 + delta, color);
                self.fill_vline(x0 - y, y0 - x, 2 * x + 1 + delta, color);
            }
        }
    }

    /// Draw a rounded-rectangle outline with corner radius `r`
    pub fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
        self.fill_hline(x + r, y, w - 2 * r, color); // top
        self.fill_hline(x + r, y + h - 1, w - 2 * r, color); // bottom
        self.fill_vline(x, y + r, h - 2 * r, color); // left
        self.fill_vline(x + w - 1, y + r, h - 2 * r, color); // right

        self.draw_circle_quadrants(x + r, y + r, r, CORNER_TOP_LEFT, color);
        self.draw_circle_quadrants(x + w - r - 1, y + r, r, CORNER_TOP_RIGHT, color);
        self.draw_circle_quadrants(x + w - r - 1, y + h - r - 1, r, CORNER_BOTTOM_RIGHT, color);
        self.draw_circle_quadrants(x + r, y + h - r - 1, r, CORNER_BOTTOM_LEFT, color);
    }

    /// Fill a rounded rectangle with corner radius `r`
    pub fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
        self.fill_rect(x + r, y, w - 2 * r, h, color);

        self.fill_circle_quadrants(x + w - r - 1, y + r, r, 0x01, h - 2 * r - 1, color);
        self.fill_circle_quadrants(x + r, y + r, r, 0x02, h - 2 * r - 1, color);
    }

    /// Draw a triangle outline through three vertices, in input order
    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Fill a triangle with horizontal scanline runs
    ///
    /// Vertices are sorted by y (coordinate pairs swap together), then the
    /// triangle is walked as an upper part (top vertex to the middle
    /// vertex's scanline) and a lower part, tracking two edge intercepts
    /// with integer accumulators. The middle scanline goes to whichever part
    /// keeps both edge divisors nonzero (flat-top vs flat-bottom).
    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(
        &mut self,
        mut x0: i32,
        mut y0: i32,
        mut x1: i32,
        mut y1: i32,
        mut x2: i32,
        mut y2: i32,
        color: Color,
    ) {
        // Sort by y ascending: y0 <= y1 <= y2
        if y0 > y1 {
            core::mem::swap(&mut y0, &mut y1);
            core::mem::swap(&mut x0, &mut x1);
        }
        if y1 > y2 {
            core::mem::swap(&mut y2, &mut y1);
            core::mem::swap(&mut x2, &mut x1);
        }
        if y0 > y1 {
            core::mem::swap(&mut y0, &mut y1);
            core::mem::swap(&mut x0, &mut x1);
        }

        if y0 == y2 {
            // Degenerate: all on one scanline
            let mut a = x0;
            let mut b = x0;
            if x1 < a {
                a = x1;
            } else if x1 > b {
                b = x1;
            }
            if x2 < a {
                a = x2;
            } else if x2 > b {
                b = x2;
            }
            self.fill_hline(a, y0, b - a + 1, color);
            return;
        }

        let dx01 = x1 - x0;
        let dy01 = y1 - y0;
        let dx02 = x2 - x0;
        let dy02 = y2 - y0;
        let dx12 = x2 - x1;
        let dy12 = y2 - y1;
        let mut sa = 0;
        let mut sb = 0;

        // Upper part walks edges 0-1 and 0-2. A flat-bottom triangle
        // (y1 == y2) takes the middle scanline here, since the lower loop
        // would divide by dy12 == 0; a flat-top one (y0 == y1) leaves it to
        // the lower loop for the same reason with dy01.
        let last = if y1 == y2 { y1 } else { y1 - 1 };

        let mut y = y0;
        while y <= last {
            let mut a = x0 + sa / dy01;
            let mut b = x0 + sb / dy02;
            sa += dx01;
            sb += dx02;
            if a > b {
                core::mem::swap(&mut a, &mut b);
            }
            self.fill_hline(a, y, b - a + 1, color);
            y += 1;
        }

        // Lower part walks edges 1-2 and 0-2
        sa = dx12 * (y - y1);
        sb = dx02 * (y - y0);
        while y <= y2 {
            let mut a = x1 + sa / dy12;
            let mut b = x0 + sb / dy02;
            sa += dx12;
            sb += dx02;
            if a > b {
                core::mem::swap(&mut a, &mut b);
            }
            self.fill_hline(a, y, b - a + 1, color);
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_pixels(fb: &FrameBuffer) -> u32 {
        fb.as_bytes().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn horizontal_line_sets_exact_pixels() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(0, 0, 10, 0, Color::On);
        for x in 0..=10 {
            assert_eq!(fb.get_pixel(x, 0), Color::On, "column {x}");
        }
        assert_eq!(lit_pixels(&fb), 11);
    }

    #[test]
    fn line_extent_matches_major_axis() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(10, 20, 30, 25, Color::On);
        // One pixel per major-axis step
        assert_eq!(lit_pixels(&fb), 21);
        assert_eq!(fb.get_pixel(10, 20), Color::On);
        assert_eq!(fb.get_pixel(30, 25), Color::On);
    }

    #[test]
    fn steep_line_transposes() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(5, 2, 7, 14, Color::On);
        assert_eq!(lit_pixels(&fb), 13);
        assert_eq!(fb.get_pixel(5, 2), Color::On);
        assert_eq!(fb.get_pixel(7, 14), Color::On);
    }

    #[test]
    fn filled_rect_sets_exact_box() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(2, 2, 4, 3, Color::On);
        for y in 2..5 {
            for x in 2..6 {
                assert_eq!(fb.get_pixel(x, y), Color::On);
            }
        }
        assert_eq!(lit_pixels(&fb), 12);
    }

    #[test]
    fn rect_outline_is_hollow() {
        let mut fb = FrameBuffer::new();
        fb.draw_rect(10, 10, 6, 5, Color::On);
        assert_eq!(fb.get_pixel(10, 10), Color::On);
        assert_eq!(fb.get_pixel(15, 14), Color::On);
        assert_eq!(fb.get_pixel(12, 12), Color::Off);
        // Perimeter of a 6x5 box
        assert_eq!(lit_pixels(&fb), 18);
    }

    #[test]
    fn circle_has_eightfold_symmetry() {
        let mut fb = FrameBuffer::new();
        fb.draw_circle(32, 32, 10, Color::On);
        assert_eq!(fb.get_pixel(32, 22), Color::On);
        assert_eq!(fb.get_pixel(32, 42), Color::On);
        assert_eq!(fb.get_pixel(22, 32), Color::On);
        assert_eq!(fb.get_pixel(42, 32), Color::On);
        for (x, y) in [(39, 39), (39, 25), (25, 39), (25, 25)] {
            assert_eq!(fb.get_pixel(x, y), Color::On, "({x}, {y})");
        }
        assert_eq!(fb.get_pixel(32, 32), Color::Off);
    }

    #[test]
    fn filled_circle_covers_outline() {
        let mut outline = FrameBuffer::new();
        outline.draw_circle(20, 20, 7, Color::On);
        let mut filled = FrameBuffer::new();
        filled.fill_circle(20, 20, 7, Color::On);

        for (f, o) in filled.as_bytes().iter().zip(outline.as_bytes()) {
            assert_eq!(f & o, *o, "outline pixel missing from fill");
        }
        assert_eq!(filled.get_pixel(20, 20), Color::On);
    }

    #[test]
    fn filled_circle_has_no_holes() {
        let mut fb = FrameBuffer::new();
        fb.fill_circle(30, 30, 9, Color::On);
        for dy in -9i32..=9 {
            for dx in -9i32..=9 {
                if dx * dx + dy * dy <= 81 {
                    let (x, y) = ((30 + dx) as usize, (30 + dy) as usize);
                    assert_eq!(fb.get_pixel(x, y), Color::On, "({dx}, {dy})");
                }
            }
        }
    }

    #[test]
    fn round_rect_stays_in_bounds_of_box() {
        let mut fb = FrameBuffer::new();
        fb.fill_round_rect(8, 8, 20, 12, 4, Color::On);
        // Interior lit, corner pixels of the bounding box dark
        assert_eq!(fb.get_pixel(18, 14), Color::On);
        assert_eq!(fb.get_pixel(8, 8), Color::Off);
        assert_eq!(fb.get_pixel(27, 8), Color::Off);
        assert_eq!(fb.get_pixel(8, 19), Color::Off);
        assert_eq!(fb.get_pixel(27, 19), Color::Off);

        let mut outline = FrameBuffer::new();
        outline.draw_round_rect(8, 8, 20, 12, 4, Color::On);
        assert_eq!(outline.get_pixel(8, 8), Color::Off);
        assert_eq!(outline.get_pixel(12, 8), Color::On);
        assert_eq!(outline.get_pixel(8, 12), Color::On);
    }

    #[test]
    fn degenerate_triangle_is_single_run() {
        let mut fb = FrameBuffer::new();
        fb.fill_triangle(9, 5, 3, 5, 6, 5, Color::On);
        for x in 3..=9 {
            assert_eq!(fb.get_pixel(x, 5), Color::On);
        }
        assert_eq!(lit_pixels(&fb), 7);
    }

    #[test]
    fn filled_triangle_spans_each_scanline_once() {
        // One invert pass must equal one draw pass: a scanline emitted
        // twice would toggle itself back off.
        let mut inverted = FrameBuffer::new();
        inverted.fill_triangle(10, 4, 40, 20, 4, 30, Color::Invert);
        let mut drawn = FrameBuffer::new();
        drawn.fill_triangle(10, 4, 40, 20, 4, 30, Color::On);
        assert!(lit_pixels(&drawn) > 0);
        assert_eq!(inverted.as_bytes(), drawn.as_bytes());
    }

    #[test]
    fn filled_triangle_vertex_order_is_irrelevant() {
        let mut a = FrameBuffer::new();
        a.fill_triangle(10, 4, 40, 20, 4, 30, Color::On);
        let mut b = FrameBuffer::new();
        b.fill_triangle(4, 30, 10, 4, 40, 20, Color::On);
        let mut c = FrameBuffer::new();
        c.fill_triangle(40, 20, 4, 30, 10, 4, Color::On);
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn flat_top_and_flat_bottom_triangles() {
        let mut fb = FrameBuffer::new();
        fb.fill_triangle(5, 5, 15, 5, 10, 12, Color::On); // flat top
        assert_eq!(fb.get_pixel(5, 5), Color::On);
        assert_eq!(fb.get_pixel(15, 5), Color::On);
        assert_eq!(fb.get_pixel(10, 12), Color::On);

        let mut fb = FrameBuffer::new();
        fb.fill_triangle(10, 5, 5, 12, 15, 12, Color::On); // flat bottom
        assert_eq!(fb.get_pixel(10, 5), Color::On);
        assert_eq!(fb.get_pixel(5, 12), Color::On);
        assert_eq!(fb.get_pixel(15, 12), Color::On);
    }

    #[test]
    fn shapes_clip_at_screen_edges() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(-10, -10, 140, 80, Color::On);
        fb.draw_circle(0, 0, 20, Color::On);
        fb.fill_rect(-5, -5, 20, 20, Color::On);
        fb.fill_triangle(-20, 10, 60, -30, 150, 70, Color::On);
        fb.fill_round_rect(120, 58, 30, 30, 5, Color::On);
        // Nothing to assert beyond "no panic and edges stayed in range";
        // spot-check a clipped interior pixel
        assert_eq!(fb.get_pixel(0, 0), Color::On);
    }
}
