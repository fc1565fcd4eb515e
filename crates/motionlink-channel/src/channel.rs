use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use bytes::Bytes;
use motionlink_frame::{Axis, AxisValue, Mode};
use motionlink_link::{ByteLink, LinkConfig, SerialLink};
use tracing::{debug, info, warn};

use crate::command::{CommandSource, DEFAULT_TICK_INTERVAL};
use crate::dispatch::{ConsumerId, Dispatcher, LineConsumer};
use crate::error::{ChannelError, Result};
use crate::queue::{BoundedQueue, DEFAULT_QUEUE_CAPACITY};
use crate::worker::{spawn_reader, spawn_writer};

/// Everything a channel needs to come up: the serial settings plus the
/// channel-wide behavior knobs.
#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub link: LinkConfig,
    /// Value representation for outbound frames.
    pub mode: Mode,
    /// Output cadence for the command scheduler.
    pub tick_interval: Duration,
    /// Bound on queued items per direction.
    pub queue_capacity: usize,
    /// When false the writer side is never fed: no startup home, no
    /// cadence output, `home` inert. This is the receive-only variant
    /// of the one duplex design.
    pub transmit_commands: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
            mode: Mode::Float32,
            tick_interval: DEFAULT_TICK_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            transmit_commands: true,
        }
    }
}

/// Connection lifecycle. A channel is single-use: once `Closed` it
/// cannot be reopened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelState {
    Uninitialized,
    Opening,
    Open,
    Closing,
    Closed,
}

/// The duplex platform channel: owns the worker threads, the queues
/// between them, the consumer dispatch, and the command scheduler.
///
/// Explicitly constructed and owned by the application; all lifecycle
/// transitions happen through [`open`](Self::open),
/// [`tick`](Self::tick), and [`shutdown`](Self::shutdown) on the
/// control thread. With no platform connected (`open` failed or was
/// never called) every operation is a silent no-op; the channel
/// degrades to idle rather than erroring on each tick.
pub struct PlatformChannel {
    config: ChannelConfig,
    state: ChannelState,
    inbound: Arc<BoundedQueue<String>>,
    outbound: Arc<BoundedQueue<Bytes>>,
    running: Arc<AtomicBool>,
    workers: Option<(JoinHandle<()>, JoinHandle<()>)>,
    dispatcher: Dispatcher,
    source: CommandSource,
}

impl PlatformChannel {
    pub fn new(config: ChannelConfig) -> Self {
        let source = CommandSource::new(config.mode, config.tick_interval);
        Self {
            inbound: Arc::new(BoundedQueue::new(config.queue_capacity)),
            outbound: Arc::new(BoundedQueue::new(config.queue_capacity)),
            running: Arc::new(AtomicBool::new(false)),
            workers: None,
            dispatcher: Dispatcher::new(),
            source,
            state: ChannelState::Uninitialized,
            config,
        }
    }

    /// Open the serial link and start both workers.
    ///
    /// On failure the error is returned once, no workers start, and the
    /// channel lands in `Closed`; subsequent ticks and writes are
    /// no-ops. A channel that reaches `Closed` (failed open or completed
    /// shutdown) stays closed.
    pub fn open(&mut self) -> Result<()> {
        match self.state {
            ChannelState::Uninitialized => {}
            ChannelState::Opening | ChannelState::Open => return Err(ChannelError::AlreadyOpen),
            ChannelState::Closing | ChannelState::Closed => return Err(ChannelError::Closed),
        }

        self.state = ChannelState::Opening;

        let writer_link = match SerialLink::open(&self.config.link) {
            Ok(link) => link,
            Err(err) => {
                warn!(port = %self.config.link.port, %err, "open failed");
                self.state = ChannelState::Closed;
                return Err(err.into());
            }
        };
        let reader_link = match writer_link.try_clone() {
            Ok(link) => link,
            Err(err) => {
                warn!(port = %self.config.link.port, %err, "link clone failed");
                self.state = ChannelState::Closed;
                return Err(err.into());
            }
        };

        self.start(reader_link, writer_link);
        info!(port = %self.config.link.port, "platform channel open");
        Ok(())
    }

    /// Build an already-open channel from a pair of link endpoints.
    ///
    /// This is how loopbacks and in-process device simulations attach;
    /// the serial path is just `open` producing the two endpoints by
    /// cloning the port handle.
    pub fn from_parts<L>(reader: L, writer: L, config: ChannelConfig) -> Self
    where
        L: ByteLink + 'static,
    {
        let mut channel = Self::new(config);
        channel.state = ChannelState::Opening;
        channel.start(reader, writer);
        channel
    }

    fn start<L>(&mut self, reader: L, writer: L)
    where
        L: ByteLink + 'static,
    {
        self.running.store(true, Ordering::SeqCst);
        let reader = spawn_reader(reader, self.inbound.clone(), self.running.clone());
        let writer = spawn_writer(writer, self.outbound.clone(), self.running.clone());
        self.workers = Some((reader, writer));
        self.state = ChannelState::Open;

        // Bring the platform to a known attitude before the first
        // collaborator command arrives.
        if self.config.transmit_commands {
            let frame = self.source.home();
            self.outbound.push(frame);
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ChannelState::Open
    }

    pub fn mode(&self) -> Mode {
        self.source.mode()
    }

    /// Update one axis of the command state. The new value rides out
    /// with the next scheduled frame; a value in the wrong
    /// representation for the current mode is rejected with a warning.
    pub fn set_axis(&mut self, axis: Axis, value: AxisValue) {
        if !self.source.set_axis(axis, value) {
            warn!(%axis, mode = %self.source.mode(), "axis value does not match channel mode, ignored");
        }
    }

    /// Re-home all axes; when open and transmitting, a homed frame is
    /// enqueued immediately rather than waiting for the cadence.
    pub fn home(&mut self) {
        let frame = self.source.home();
        if self.state == ChannelState::Open && self.config.transmit_commands {
            self.outbound.push(frame);
        }
    }

    /// Register a consumer for decoded inbound lines.
    pub fn register_consumer(&mut self, consumer: Box<dyn LineConsumer>) -> ConsumerId {
        self.dispatcher.register(consumer)
    }

    /// Remove a previously registered consumer.
    pub fn unregister_consumer(&mut self, id: ConsumerId) -> bool {
        self.dispatcher.unregister(id)
    }

    /// One control-thread step: deliver pending inbound lines to every
    /// consumer, then let the scheduler enqueue the next command frame
    /// if the cadence interval has elapsed. No-op unless open.
    pub fn tick(&mut self) {
        if self.state != ChannelState::Open {
            return;
        }

        self.dispatcher.tick(&self.inbound);

        if self.config.transmit_commands {
            if let Some(frame) = self.source.tick(Instant::now()) {
                if !self.outbound.push(frame) {
                    debug!("outbound queue full, dropped frame");
                }
            }
        }
    }

    /// Graceful teardown: home the platform, signal both workers to
    /// stop, wait for them to exit, then release the port.
    ///
    /// The join matters: stopping without waiting races a worker
    /// against the closing port. Safe to call on a channel that never
    /// opened; a second call is a no-op.
    pub fn shutdown(&mut self) {
        if self.state != ChannelState::Open {
            self.state = ChannelState::Closed;
            return;
        }

        self.state = ChannelState::Closing;
        debug!("closing platform channel");

        if self.config.transmit_commands {
            let frame = self.source.home();
            self.outbound.push(frame);
        }

        self.running.store(false, Ordering::SeqCst);
        if let Some((reader, writer)) = self.workers.take() {
            if reader.join().is_err() {
                warn!("reader worker panicked");
            }
            if writer.join().is_err() {
                warn!("writer worker panicked");
            }
        }

        // The port handles lived inside the workers; both are dropped
        // once the threads have exited, which releases the port.
        self.state = ChannelState::Closed;
        info!("platform channel closed");
    }
}

impl Drop for PlatformChannel {
    fn drop(&mut self) {
        if self.state == ChannelState::Open {
            self.shutdown();
        }
    }
}
