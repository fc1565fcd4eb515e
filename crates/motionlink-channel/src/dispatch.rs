use tracing::trace;

use crate::queue::BoundedQueue;

/// The single capability a collaborator needs to receive telemetry:
/// one decoded inbound line, delivered verbatim.
pub trait LineConsumer: Send {
    fn on_line(&mut self, line: &str);
}

impl<F> LineConsumer for F
where
    F: FnMut(&str) + Send,
{
    fn on_line(&mut self, line: &str) {
        self(line)
    }
}

/// Handle returned by [`Dispatcher::register`], used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConsumerId(u64);

/// Fans inbound lines out to every registered consumer.
///
/// Owned and driven by the control thread only; registration while a
/// delivery is in flight is safe exactly because nothing here is
/// concurrent. A consumer that panics fails the current tick; consumer
/// bugs surface instead of being retried or swallowed.
#[derive(Default)]
pub struct Dispatcher {
    consumers: Vec<(ConsumerId, Box<dyn LineConsumer>)>,
    next_id: u64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a consumer; every subsequently dispatched line reaches it.
    pub fn register(&mut self, consumer: Box<dyn LineConsumer>) -> ConsumerId {
        let id = ConsumerId(self.next_id);
        self.next_id += 1;
        self.consumers.push((id, consumer));
        id
    }

    /// Remove a consumer. Returns whether it was registered.
    pub fn unregister(&mut self, id: ConsumerId) -> bool {
        let before = self.consumers.len();
        self.consumers.retain(|(existing, _)| *existing != id);
        self.consumers.len() != before
    }

    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Drain the inbound queue and deliver each line, in arrival order,
    /// to every registered consumer.
    pub fn tick(&mut self, inbound: &BoundedQueue<String>) {
        let lines = inbound.drain_all();
        if lines.is_empty() {
            return;
        }
        trace!(count = lines.len(), "dispatching inbound lines");

        for line in &lines {
            for (_, consumer) in &mut self.consumers {
                consumer.on_line(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording() -> (Arc<Mutex<Vec<String>>>, Box<dyn LineConsumer>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let consumer = move |line: &str| {
            sink.lock().expect("seen lock").push(line.to_string());
        };
        (seen, Box::new(consumer))
    }

    #[test]
    fn delivers_lines_in_order_to_every_consumer() {
        let inbound = BoundedQueue::new(8);
        inbound.push("first".to_string());
        inbound.push("second".to_string());

        let mut dispatcher = Dispatcher::new();
        let (seen_a, consumer_a) = recording();
        let (seen_b, consumer_b) = recording();
        dispatcher.register(consumer_a);
        dispatcher.register(consumer_b);

        dispatcher.tick(&inbound);

        assert_eq!(*seen_a.lock().expect("seen lock"), ["first", "second"]);
        assert_eq!(*seen_b.lock().expect("seen lock"), ["first", "second"]);
        assert!(inbound.is_empty());
    }

    #[test]
    fn unregistered_consumer_stops_receiving() {
        let inbound = BoundedQueue::new(8);
        let mut dispatcher = Dispatcher::new();
        let (seen, consumer) = recording();
        let id = dispatcher.register(consumer);

        inbound.push("before".to_string());
        dispatcher.tick(&inbound);

        assert!(dispatcher.unregister(id));
        assert!(!dispatcher.unregister(id));

        inbound.push("after".to_string());
        dispatcher.tick(&inbound);

        assert_eq!(*seen.lock().expect("seen lock"), ["before"]);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn tick_with_no_lines_is_a_no_op() {
        let inbound: BoundedQueue<String> = BoundedQueue::new(8);
        let mut dispatcher = Dispatcher::new();
        let (seen, consumer) = recording();
        dispatcher.register(consumer);

        dispatcher.tick(&inbound);

        assert!(seen.lock().expect("seen lock").is_empty());
    }
}
