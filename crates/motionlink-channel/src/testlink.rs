//! In-memory [`ByteLink`] double shared by the worker and channel
//! tests: scripted inbound bytes, captured outbound bytes, optional
//! injected read failures.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use motionlink_link::{ByteLink, Result};

#[derive(Clone, Default)]
pub(crate) struct LoopbackLink {
    incoming: Arc<Mutex<VecDeque<u8>>>,
    written: Arc<Mutex<Vec<u8>>>,
    failing_reads: Arc<Mutex<u32>>,
}

impl LoopbackLink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the reader side to consume.
    pub(crate) fn feed_incoming(&self, bytes: &[u8]) {
        self.incoming.lock().expect("incoming lock").extend(bytes);
    }

    /// Shared capture buffer of everything written to the link.
    pub(crate) fn written(&self) -> Arc<Mutex<Vec<u8>>> {
        self.written.clone()
    }

    /// Make the next `count` reads fail with an I/O error.
    pub(crate) fn fail_reads(&self, count: u32) {
        *self.failing_reads.lock().expect("failing lock") = count;
    }
}

impl ByteLink for LoopbackLink {
    fn read_byte_if_available(&mut self) -> Result<Option<u8>> {
        let mut failing = self.failing_reads.lock().expect("failing lock");
        if *failing > 0 {
            *failing -= 1;
            return Err(std::io::Error::other("injected read failure").into());
        }
        drop(failing);

        Ok(self.incoming.lock().expect("incoming lock").pop_front())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.lock().expect("written lock").extend_from_slice(bytes);
        Ok(())
    }
}
