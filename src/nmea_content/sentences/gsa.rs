#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Decoder, Event, Fields, SentenceType, TalkerId,
    nmea_content::{FixDimension, FixMode, SystemId},
};

/// Number of PRN slots in a GSA sentence.
const PRN_SLOTS: usize = 12;

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                      15 16  17
///         | | |                       | |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,*hh<CR><LF>
/// ```
///
/// NMEA 4.11 appends the System ID:
/// ```text
///         1 2 3                      15 16  17  18
///         | | |                       | |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSatellites {
    /// Source of the sentence
    pub talker_id: TalkerId,
    /// Selection mode
    pub fix_mode: Option<FixMode>,
    /// Fix dimension
    pub fix_dimension: Option<FixDimension>,
    /// PRN numbers of the satellites used in the fix, in the order received
    pub satellites_used: heapless::Vec<u16, PRN_SLOTS>,
    /// Position Dilution of Precision
    pub pdop: Option<f32>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f32>,
    /// Vertical Dilution of Precision
    pub vdop: Option<f32>,
    /// NMEA 4.11 System ID of the constellation the PRNs belong to
    pub system_id: Option<SystemId>,
}

/// Decodes GSA sentences into [`ActiveSatellites`].
#[derive(Debug, Default)]
pub struct GsaDecoder {
    active_satellites_received: Event<ActiveSatellites>,
}

impl GsaDecoder {
    /// Creates a decoder with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every decoded GSA sentence.
    pub fn on_active_satellites_received<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&ActiveSatellites) + Send + 'static,
    {
        self.active_satellites_received.subscribe(handler);
        self
    }

    /// The event raised for every decoded GSA sentence.
    pub fn active_satellites_received(&mut self) -> &mut Event<ActiveSatellites> {
        &mut self.active_satellites_received
    }

    /// Decodes the fields of a GSA sentence.
    ///
    /// Empty PRN slots are skipped rather than reported as zero.
    pub fn parse(talker_id: TalkerId, fields: &Fields<'_>) -> ActiveSatellites {
        let prn_fields = 2..2 + PRN_SLOTS;
        let dop = prn_fields.end;

        ActiveSatellites {
            talker_id,
            fix_mode: fields.parse(0),
            fix_dimension: fields.parse(1),
            satellites_used: prn_fields
                .filter_map(|index| fields.parse::<u16>(index))
                .collect(),
            pdop: fields.parse(dop),
            hdop: fields.parse(dop + 1),
            vdop: fields.parse(dop + 2),
            system_id: fields.parse(dop + 3),
        }
    }
}

impl Decoder for GsaDecoder {
    fn sentence_types(&self) -> &[SentenceType] {
        &[SentenceType::GSA]
    }

    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
        let active = Self::parse(talker_id, fields);
        self.active_satellites_received.raise(&active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gsa_parsing() {
        let fields = Fields::split("A,2,25,01,22,,,,,,,,,,2.56,2.36,1.00");
        let gsa = GsaDecoder::parse(TalkerId::GPS, &fields);

        assert_eq!(gsa.fix_mode, Some(FixMode::Automatic));
        assert_eq!(gsa.fix_dimension, Some(FixDimension::Fix2D));
        assert_eq!(gsa.satellites_used, [25, 1, 22]);
        assert_eq!(gsa.pdop, Some(2.56));
        assert_eq!(gsa.hdop, Some(2.36));
        assert_eq!(gsa.vdop, Some(1.0));
        assert_eq!(gsa.system_id, None);
    }

    #[test]
    fn test_gsa_full_with_system_id() {
        let fields = Fields::split("M,3,01,02,03,04,05,06,07,08,09,10,11,12,1.5,1.0,2.0,1");
        let gsa = GsaDecoder::parse(TalkerId::GPS, &fields);

        assert_eq!(gsa.fix_mode, Some(FixMode::Manual));
        assert_eq!(gsa.fix_dimension, Some(FixDimension::Fix3D));
        assert_eq!(gsa.satellites_used, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(gsa.pdop, Some(1.5));
        assert_eq!(gsa.system_id, Some(SystemId::Gps));
    }

    #[test]
    fn test_gsa_sparse_and_malformed() {
        let fields = Fields::split("A,1,,07,,xx,,,,,,,,,,,");
        let gsa = GsaDecoder::parse(TalkerId::GPS, &fields);

        assert_eq!(gsa.fix_dimension, Some(FixDimension::NoFix));
        assert_eq!(gsa.satellites_used, [7]);
        assert_eq!(gsa.pdop, None);
        assert_eq!(gsa.hdop, None);
        assert_eq!(gsa.vdop, None);

        let gsa = GsaDecoder::parse(TalkerId::GPS, &Fields::split("A"));
        assert_eq!(gsa.fix_mode, Some(FixMode::Automatic));
        assert_eq!(gsa.fix_dimension, None);
        assert!(gsa.satellites_used.is_empty());
    }
}
