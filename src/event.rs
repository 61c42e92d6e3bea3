use std::{fmt, sync::mpsc::Sender};

use log::warn;

type Handler<T> = Box<dyn FnMut(&T) + Send>;

/// A multicast notification raised by a decoder.
///
/// Handlers run synchronously, in subscription order, on the thread that called
/// [`SentenceProcessor::process`](crate::SentenceProcessor::process). A slow handler delays
/// the processing of the next sentence.
///
/// # Examples
///
/// ```rust
/// use nmea0183_gnss::Event;
///
/// let mut event = Event::new();
/// event.subscribe(|value: &u8| println!("received {value}"));
/// event.raise(&42);
/// ```
pub struct Event<T> {
    handlers: Vec<Handler<T>>,
}

impl<T> Event<T> {
    /// Creates an event without subscribers.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Registers a handler that is called for every raised value.
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Forwards a copy of every raised value into a channel.
    ///
    /// This hands decoded data to another thread while keeping delivery in the order the
    /// sentences were processed. Once the receiving side is gone the values are dropped.
    pub fn forward_to(&mut self, sender: Sender<T>)
    where
        T: Clone + Send + 'static,
    {
        let mut disconnected = false;
        self.subscribe(move |value: &T| {
            if sender.send(value.clone()).is_err() && !disconnected {
                warn!("event receiver disconnected, dropping further values");
                disconnected = true;
            }
        });
    }

    /// Calls every handler with `value`.
    pub fn raise(&mut self, value: &T) {
        for handler in &mut self.handlers {
            handler(value);
        }
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, mpsc};

    use super::*;

    #[test]
    fn test_raise_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut event = Event::new();

        for id in 0..3 {
            let seen = Arc::clone(&seen);
            event.subscribe(move |value: &u32| seen.lock().unwrap().push((id, *value)));
        }

        event.raise(&7);
        assert_eq!(*seen.lock().unwrap(), vec![(0, 7), (1, 7), (2, 7)]);
        assert_eq!(event.subscriber_count(), 3);
    }

    #[test]
    fn test_forward_to_channel() {
        let (tx, rx) = mpsc::channel();
        let mut event = Event::new();
        event.forward_to(tx);

        event.raise(&"first".to_string());
        event.raise(&"second".to_string());
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["first", "second"]);

        drop(rx);
        event.raise(&"dropped".to_string());
    }
}
