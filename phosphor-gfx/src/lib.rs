//! Rendering core for a 128x64 monochrome display
//!
//! This crate owns the bit-packed frame buffer and everything that writes
//! into it:
//!
//! - [`FrameBuffer`] - the packed pixel store, pixel accessors and the
//!   horizontal/vertical run primitives
//! - shape rasterization (lines, circles, rectangles, triangles, rounded
//!   rectangles and their filled variants)
//! - bitmap compositing in two encodings with draw/erase/invert write modes
//! - fixed-cell glyph rendering driven by a [`TextCursor`]
//!
//! The buffer is organized the way SSD1306-class controllers want it: eight
//! scanlines per byte ("bands"), one byte per column, bands stacked top to
//! bottom. All byte/bit addressing arithmetic is encapsulated in the
//! [`buffer`] module; nothing else in the crate computes offsets directly.
//!
//! The crate performs no I/O. A completed frame is handed to a [`FrameSink`]
//! implementation, which is expected to transmit it before returning.
//!
//! # Render loop
//!
//! ```rust, ignore
//! let mut fb = FrameBuffer::new();
//! let mut text = TextCursor::new();
//! let mut pacer = FramePacer::new(); // from phosphor-pacer
//!
//! loop {
//!     match pacer.poll(clock.now_ms()) {
//!         FramePoll::NotDue { idle: true } => cortex_m::asm::wfi(),
//!         FramePoll::NotDue { idle: false } => continue,
//!         FramePoll::Due => {}
//!     }
//!     fb.clear(Color::Off);
//!     fb.fill_round_rect(10, 8, 108, 48, 6, Color::On);
//!     text.set_cursor(24, 28);
//!     text.write_str(&mut fb, "HELLO");
//!     fb.present(&mut display)?;
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod blit;
pub mod buffer;
pub mod font;
pub mod raster;
pub mod sink;
pub mod text;

pub use buffer::{Color, FrameBuffer, BUFFER_SIZE, HEIGHT, PAGES, WIDTH};
pub use raster::{CORNER_BOTTOM_LEFT, CORNER_BOTTOM_RIGHT, CORNER_TOP_LEFT, CORNER_TOP_RIGHT};
pub use sink::FrameSink;
pub use text::TextCursor;
