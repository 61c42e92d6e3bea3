use crate::{
    Decoder, Event, Fields, SentenceType, TalkerId,
    nmea_content::{
        GnssPositionInfo, Status,
        parse::{latitude, longitude},
    },
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
#[derive(Debug, Default)]
pub struct GllDecoder {
    geographic_latitude_longitude_received: Event<GnssPositionInfo>,
}

impl GllDecoder {
    /// Creates a decoder with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every decoded GLL sentence.
    pub fn on_geographic_latitude_longitude_received<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&GnssPositionInfo) + Send + 'static,
    {
        self.geographic_latitude_longitude_received.subscribe(handler);
        self
    }

    /// The event raised for every decoded GLL sentence.
    pub fn geographic_latitude_longitude_received(&mut self) -> &mut Event<GnssPositionInfo> {
        &mut self.geographic_latitude_longitude_received
    }

    /// Decodes the fields of a GLL sentence.
    ///
    /// Latitude and longitude are reported even when the status is `V`, as long as the
    /// receiver sent them.
    pub fn parse(talker_id: TalkerId, fields: &Fields<'_>) -> GnssPositionInfo {
        GnssPositionInfo {
            position_fix_valid: fields.parse::<Status>(5) == Some(Status::Valid),
            latitude: latitude(fields, 0),
            longitude: longitude(fields, 2),
            time_of_fix: fields.parse(4),
            faa_mode: fields.parse(6),
            ..GnssPositionInfo::new(talker_id)
        }
    }
}

impl Decoder for GllDecoder {
    fn sentence_types(&self) -> &[SentenceType] {
        &[SentenceType::GLL]
    }

    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
        let position = Self::parse(talker_id, fields);
        self.geographic_latitude_longitude_received.raise(&position);
    }
}
