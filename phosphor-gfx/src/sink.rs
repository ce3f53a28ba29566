//! Flush boundary
//!
//! The rendering core never talks to hardware. Once a frame is drawn, the
//! host hands the packed buffer to a [`FrameSink`] - an SPI/I2C display
//! driver, a UART forwarder, or a test capture.

use crate::buffer::FrameBuffer;

/// Receiver for completed frames
///
/// `present` is called once per frame with the raw packed store
/// ([`crate::BUFFER_SIZE`] bytes, band-major). The call is synchronous and
/// the view is read-only: implementations must copy or transmit the bytes
/// before returning and may not retain the reference.
pub trait FrameSink {
    /// Transport error reported by the sink
    type Error;

    /// Transmit one frame
    fn present(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

impl FrameBuffer {
    /// Hand the current frame to a sink
    pub fn present<S: FrameSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.present(self.as_bytes())
    }
}
