//! Duplex, thread-backed serial channel for 6-DOF motion platforms.
//!
//! This is the core value-add layer of motionlink. A [`PlatformChannel`]
//! owns two worker threads per open connection (a reader that
//! accumulates inbound telemetry lines, a writer that transmits
//! encoded command frames) plus the bounded queues between them, the
//! consumer dispatch fan-out, and a fixed-cadence command scheduler.
//! The control thread drives everything through non-blocking
//! [`PlatformChannel::tick`] calls; no operation here suspends.

pub mod channel;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod queue;
pub mod worker;

#[cfg(test)]
pub(crate) mod testlink;

pub use channel::{ChannelConfig, ChannelState, PlatformChannel};
pub use command::{CommandSource, DEFAULT_TICK_INTERVAL};
pub use dispatch::{ConsumerId, Dispatcher, LineConsumer};
pub use error::{ChannelError, Result};
pub use queue::{BoundedQueue, DEFAULT_QUEUE_CAPACITY};
pub use worker::{spawn_reader, spawn_writer};
