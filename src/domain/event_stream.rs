//! Infinite event sequences for each [`StreamVariant`].
//!
//! [`EventStream`] is the producer side of the publish loop: every call to
//! [`Iterator::next`] builds one fresh event value. It never returns `None`;
//! callers bound it externally (cancellation, `take`).

use super::{CommEntry, ContactRecord, DeviceId, StreamVariant, TopologyStep};

/// Number of devices announced by the initial device-join step (`0..=19`).
pub const JOIN_DEVICE_COUNT: u64 = 20;

/// Cycle length of the sender counter in `epoch_cycle` (`0..=18`).
pub const SENDER_CYCLE_LEN: u64 = 19;

/// Destination used by every synthetic communication entry.
pub const SUMMARY_DESTINATION: u64 = 1;

/// Address value used by every synthetic communication entry.
pub const SUMMARY_ADDRESS: u32 = 1;

/// One event ready to be encoded into a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishedEvent {
    /// An address-book record.
    Contact(ContactRecord),
    /// A layer-2 topology step.
    Topology(TopologyStep),
}

impl PublishedEvent {
    /// Returns the event kind as a static string slice, for logging.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Contact(_) => "contact",
            Self::Topology(step) => step.step_type_str(),
        }
    }
}

/// Event generator for one connection.
#[derive(Debug, Clone)]
pub struct EventStream {
    variant: StreamVariant,
    emitted: u64,
    sender: u64,
}

impl EventStream {
    /// Creates a stream positioned before its first event.
    #[must_use]
    pub const fn new(variant: StreamVariant) -> Self {
        Self {
            variant,
            emitted: 0,
            sender: 0,
        }
    }

    /// Returns the variant this stream produces.
    #[must_use]
    pub const fn variant(&self) -> StreamVariant {
        self.variant
    }

    /// Number of events produced so far.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    fn summary(sender: u64) -> TopologyStep {
        TopologyStep::CommSummary {
            sender: DeviceId::new(sender),
            entries: vec![CommEntry {
                destination: DeviceId::new(SUMMARY_DESTINATION),
                address: SUMMARY_ADDRESS,
            }],
        }
    }
}

impl Iterator for EventStream {
    type Item = PublishedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.emitted == 0;
        self.emitted += 1;

        let event = match self.variant {
            StreamVariant::Contact => PublishedEvent::Contact(ContactRecord::sample()),
            StreamVariant::EpochCycle | StreamVariant::EpochFixed if first => {
                PublishedEvent::Topology(TopologyStep::join_range(JOIN_DEVICE_COUNT))
            }
            StreamVariant::EpochCycle => {
                let sender = self.sender;
                self.sender = (self.sender + 1) % SENDER_CYCLE_LEN;
                PublishedEvent::Topology(Self::summary(sender))
            }
            StreamVariant::EpochFixed => PublishedEvent::Topology(Self::summary(0)),
        };
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn sender_of(event: &PublishedEvent) -> u64 {
        match event {
            PublishedEvent::Topology(TopologyStep::CommSummary { sender, .. }) => sender.as_u64(),
            other => panic!("expected comm summary, got {other:?}"),
        }
    }

    #[test]
    fn contact_stream_repeats_sample() {
        let events: Vec<_> = EventStream::new(StreamVariant::Contact).take(3).collect();
        assert_eq!(events.len(), 3);
        for event in events {
            assert_eq!(event, PublishedEvent::Contact(ContactRecord::sample()));
        }
    }

    #[test]
    fn epoch_streams_open_with_device_join() {
        for variant in [StreamVariant::EpochCycle, StreamVariant::EpochFixed] {
            let mut stream = EventStream::new(variant);
            let Some(PublishedEvent::Topology(TopologyStep::DeviceJoin { devices })) = stream.next()
            else {
                panic!("first {variant} event should be a device join");
            };
            let raw: Vec<u64> = devices.iter().map(DeviceId::as_u64).collect();
            assert_eq!(raw, (0..=19).collect::<Vec<u64>>());
        }
    }

    #[test]
    fn cycle_sender_wraps_after_nineteen() {
        let senders: Vec<u64> = EventStream::new(StreamVariant::EpochCycle)
            .skip(1)
            .take(40)
            .map(|e| sender_of(&e))
            .collect();
        let expected: Vec<u64> = (0..40).map(|i| i % 19).collect();
        assert_eq!(senders, expected);
    }

    #[test]
    fn summaries_carry_single_fixed_entry() {
        for event in EventStream::new(StreamVariant::EpochCycle).skip(1).take(25) {
            let PublishedEvent::Topology(TopologyStep::CommSummary { entries, .. }) = event else {
                panic!("expected comm summary");
            };
            assert_eq!(
                entries,
                vec![CommEntry {
                    destination: DeviceId::new(1),
                    address: 1,
                }]
            );
        }
    }

    #[test]
    fn fixed_sender_stays_zero() {
        let all_zero = EventStream::new(StreamVariant::EpochFixed)
            .skip(1)
            .take(30)
            .all(|e| sender_of(&e) == 0);
        assert!(all_zero);
    }

    #[test]
    fn emitted_counts_events() {
        let mut stream = EventStream::new(StreamVariant::EpochFixed);
        assert_eq!(stream.emitted(), 0);
        let _ = stream.next();
        let _ = stream.next();
        assert_eq!(stream.emitted(), 2);
        assert_eq!(stream.variant(), StreamVariant::EpochFixed);
    }

    #[test]
    fn kind_strings() {
        let mut stream = EventStream::new(StreamVariant::EpochCycle);
        let kinds: Vec<&str> = stream.by_ref().take(2).map(|e| e.kind_str()).collect();
        assert_eq!(kinds, vec!["device_join", "comm_summary"]);
        assert_eq!(
            PublishedEvent::Contact(ContactRecord::sample()).kind_str(),
            "contact"
        );
    }
}
