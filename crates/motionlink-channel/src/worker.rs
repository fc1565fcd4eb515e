//! Reader and writer worker loops.
//!
//! Each open channel runs exactly two dedicated OS threads, one per
//! traffic direction, communicating with the control thread only
//! through [`BoundedQueue`]s. Transient I/O failures are logged and the
//! loop continues; only the cooperative stop flag ends a worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bytes::Bytes;
use motionlink_frame::LineAccumulator;
use motionlink_link::ByteLink;
use tracing::{debug, trace, warn};

use crate::queue::BoundedQueue;

// Well under the 20 ms output cadence, so idle backoff never adds
// visible end-to-end latency.
const IDLE_BACKOFF: Duration = Duration::from_millis(1);

/// Start the inbound worker: probe the link one byte at a time, feed
/// the line accumulator, and push completed lines to `inbound`.
pub fn spawn_reader<L>(
    link: L,
    inbound: Arc<BoundedQueue<String>>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()>
where
    L: ByteLink + 'static,
{
    thread::Builder::new()
        .name("link-reader".to_string())
        .spawn(move || reader_loop(link, inbound, running))
        .expect("failed to spawn reader thread")
}

/// Start the outbound worker: pop one encoded frame per iteration and
/// write it to the link in a single full-buffer call, so a frame is
/// never split across writes.
pub fn spawn_writer<L>(
    link: L,
    outbound: Arc<BoundedQueue<Bytes>>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()>
where
    L: ByteLink + 'static,
{
    thread::Builder::new()
        .name("link-writer".to_string())
        .spawn(move || writer_loop(link, outbound, running))
        .expect("failed to spawn writer thread")
}

fn reader_loop<L: ByteLink>(
    mut link: L,
    inbound: Arc<BoundedQueue<String>>,
    running: Arc<AtomicBool>,
) {
    debug!("reader worker started");
    let mut lines = LineAccumulator::new();

    while running.load(Ordering::SeqCst) {
        match link.read_byte_if_available() {
            Ok(Some(byte)) => {
                if let Some(line) = lines.push(byte) {
                    if !inbound.push(line) {
                        trace!("inbound queue full, dropped line");
                    }
                }
            }
            Ok(None) => thread::sleep(IDLE_BACKOFF),
            Err(err) => {
                warn!(%err, "read failed, continuing");
                thread::sleep(IDLE_BACKOFF);
            }
        }
    }

    debug!("reader worker stopped");
}

fn writer_loop<L: ByteLink>(
    mut link: L,
    outbound: Arc<BoundedQueue<Bytes>>,
    running: Arc<AtomicBool>,
) {
    debug!("writer worker started");

    while running.load(Ordering::SeqCst) {
        match outbound.try_pop() {
            Some(frame) => write_frame(&mut link, &frame),
            None => thread::sleep(IDLE_BACKOFF),
        }
    }

    // The shutdown homing frame is enqueued immediately before stop
    // is signalled; flush whatever is still queued before exiting.
    for frame in outbound.drain_all() {
        write_frame(&mut link, &frame);
    }

    debug!("writer worker stopped");
}

fn write_frame<L: ByteLink>(link: &mut L, frame: &[u8]) {
    if let Err(err) = link.write(frame) {
        warn!(%err, "frame write failed, continuing");
    }
}
