use crate::error::Result;

/// The byte-level seam the channel workers drive.
///
/// [`SerialLink`](crate::SerialLink) is the hardware implementation;
/// in-process loopbacks implement it for tests and demos. One instance
/// is owned per traffic direction, so methods take `&mut self` and the
/// trait requires `Send` (each endpoint moves onto its worker thread).
pub trait ByteLink: Send {
    /// Non-blocking probe: `Ok(None)` immediately when nothing is
    /// pending, otherwise exactly one byte. Any underlying blocking is
    /// bounded by the link's configured read timeout.
    fn read_byte_if_available(&mut self) -> Result<Option<u8>>;

    /// Best-effort write of the full buffer.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}
