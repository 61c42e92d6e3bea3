use std::collections::HashMap;

use log::{debug, trace};
use nom::number::complete::hex_u32;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Decoder, Event, Fields, SentenceType, TalkerId,
    nmea_content::Satellite,
};

/// Fields before the first satellite record.
const HEADER_LEN: usize = 3;
/// Fields per satellite record.
const RECORD_LEN: usize = 4;
/// Satellite records in a single GSV sentence.
const RECORDS_PER_MESSAGE: usize = 4;

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// One sentence of a GSV group, before accumulation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsvMessage {
    /// Total number of GSV sentences to be transmitted in this group
    pub total_messages: u8,
    /// Sentence number of this GSV message within current group
    pub message_number: u8,
    /// Total number of satellites in view
    pub satellites_in_view: Option<u8>,
    /// Satellite information
    pub satellites: heapless::Vec<Satellite, RECORDS_PER_MESSAGE>,
    /// NMEA 4.11 Signal ID
    pub signal_id: Option<u8>,
}

impl GsvMessage {
    /// Decodes a single GSV sentence.
    ///
    /// Returns [`None`] when the message counters are missing or inconsistent. Satellite
    /// records without a PRN are skipped. A single field trailing the last complete record
    /// is the NMEA 4.11 signal ID.
    pub fn parse(fields: &Fields<'_>) -> Option<Self> {
        let total_messages: u8 = fields.parse(0)?;
        let message_number: u8 = fields.parse(1)?;

        if total_messages == 0 || message_number == 0 || message_number > total_messages {
            debug!("GSV message {message_number} of {total_messages} out of range");
            return None;
        }

        let record_fields = fields.len().saturating_sub(HEADER_LEN);
        let (records, signal_id) = if record_fields % RECORD_LEN == 1 {
            let signal_id = fields
                .parse_with(fields.len() - 1, hex_u32)
                .and_then(|id| u8::try_from(id).ok());
            (record_fields / RECORD_LEN, signal_id)
        } else {
            (record_fields.div_ceil(RECORD_LEN), None)
        };

        let satellites = (0..records)
            .filter_map(|record| satellite(fields, HEADER_LEN + record * RECORD_LEN))
            .take(RECORDS_PER_MESSAGE)
            .collect();

        Some(Self {
            total_messages,
            message_number,
            satellites_in_view: fields.parse(2),
            satellites,
            signal_id,
        })
    }
}

fn satellite(fields: &Fields<'_>, start: usize) -> Option<Satellite> {
    let Some(prn) = fields.parse(start) else {
        trace!("skipping GSV record without PRN at field {start}");
        return None;
    };

    Some(Satellite {
        prn,
        elevation: fields.parse(start + 1),
        azimuth: fields.parse(start + 2),
        snr: fields.parse(start + 3),
    })
}

/// All satellites in view reported by one talker, accumulated over a complete GSV group.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatellitesInView {
    /// Source of the group
    pub talker_id: TalkerId,
    /// Total number of satellites in view, as announced by the last message
    pub total_satellites_in_view: Option<u8>,
    /// Satellites in the order received
    pub satellites: Vec<Satellite>,
    /// NMEA 4.11 Signal ID
    pub signal_id: Option<u8>,
}

#[derive(Debug, Default)]
enum GroupState {
    #[default]
    Empty,
    Accumulating(PartialGroup),
}

#[derive(Debug)]
struct PartialGroup {
    total_messages: u8,
    next_message: u8,
    satellites_in_view: Option<u8>,
    satellites: Vec<Satellite>,
    signal_id: Option<u8>,
}

impl PartialGroup {
    fn new(total_messages: u8) -> Self {
        Self {
            total_messages,
            next_message: 1,
            satellites_in_view: None,
            satellites: Vec::with_capacity(usize::from(total_messages) * RECORDS_PER_MESSAGE),
            signal_id: None,
        }
    }

    fn continues_with(&self, message: &GsvMessage) -> bool {
        message.total_messages == self.total_messages && message.message_number == self.next_message
    }

    fn extend(&mut self, message: GsvMessage) {
        self.next_message = message.message_number.saturating_add(1);
        self.satellites_in_view = message.satellites_in_view.or(self.satellites_in_view);
        self.signal_id = self.signal_id.or(message.signal_id);
        self.satellites.extend(message.satellites);
    }

    fn finish(self, talker_id: TalkerId) -> SatellitesInView {
        SatellitesInView {
            talker_id,
            total_satellites_in_view: self.satellites_in_view,
            satellites: self.satellites,
            signal_id: self.signal_id,
        }
    }
}

/// Accumulates GSV groups per talker and reports each complete group once.
///
/// A group only completes when its messages arrive in order, `1` through `total`, with the
/// same total. Message `1` always starts a new group and drops whatever was pending for that
/// talker; any other gap or mismatch drops the pending group without reporting it. Groups from
/// different talkers (`GP`, `GL`, ...) never mix.
#[derive(Debug, Default)]
pub struct GsvDecoder {
    groups: HashMap<TalkerId, GroupState>,
    satellites_in_view_received: Event<SatellitesInView>,
}

impl GsvDecoder {
    /// Creates a decoder with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every complete GSV group.
    pub fn on_satellites_in_view_received<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&SatellitesInView) + Send + 'static,
    {
        self.satellites_in_view_received.subscribe(handler);
        self
    }

    /// The event raised for every complete GSV group.
    pub fn satellites_in_view_received(&mut self) -> &mut Event<SatellitesInView> {
        &mut self.satellites_in_view_received
    }

    /// Returns `true` while a group from `talker_id` is partially received.
    pub fn is_accumulating(&self, talker_id: TalkerId) -> bool {
        matches!(
            self.groups.get(&talker_id),
            Some(GroupState::Accumulating(_))
        )
    }

    /// Drops every partially received group.
    pub fn reset(&mut self) {
        self.groups.clear();
    }

    /// Adds one message to the group of `talker_id`, returning the group once it completes.
    pub fn accumulate(
        &mut self,
        talker_id: TalkerId,
        message: GsvMessage,
    ) -> Option<SatellitesInView> {
        let state = self.groups.entry(talker_id).or_default();

        let mut group = match std::mem::take(state) {
            GroupState::Accumulating(group) if message.message_number != 1 => {
                if !group.continues_with(&message) {
                    debug!(
                        "{talker_id}GSV message {}/{} out of sequence, dropping group",
                        message.message_number, message.total_messages
                    );
                    return None;
                }
                group
            }
            GroupState::Accumulating(stale) => {
                debug!(
                    "{talker_id}GSV group restarted after {} of {} messages",
                    stale.next_message.saturating_sub(1),
                    stale.total_messages
                );
                PartialGroup::new(message.total_messages)
            }
            GroupState::Empty if message.message_number == 1 => {
                PartialGroup::new(message.total_messages)
            }
            GroupState::Empty => {
                trace!(
                    "{talker_id}GSV message {}/{} without group start",
                    message.message_number, message.total_messages
                );
                return None;
            }
        };

        let complete = message.message_number == message.total_messages;
        group.extend(message);

        if complete {
            return Some(group.finish(talker_id));
        }

        *state = GroupState::Accumulating(group);
        None
    }
}

impl Decoder for GsvDecoder {
    fn sentence_types(&self) -> &[SentenceType] {
        &[SentenceType::GSV]
    }

    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
        let Some(message) = GsvMessage::parse(fields) else {
            return;
        };

        if let Some(satellites) = self.accumulate(talker_id, message) {
            self.satellites_in_view_received.raise(&satellites);
        }
    }
}
