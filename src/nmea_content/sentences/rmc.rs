use crate::{
    Decoder, Event, Fields, SentenceType, TalkerId,
    nmea_content::{
        GnssPositionInfo, Status,
        parse::{latitude, longitude, magnetic_variation},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///                                                            12
///         1         2 3       4 5        6  7   8   9    10 11|
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
#[derive(Debug, Default)]
pub struct RmcDecoder {
    position_course_and_time_received: Event<GnssPositionInfo>,
}

impl RmcDecoder {
    /// Creates a decoder with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every decoded RMC sentence.
    pub fn on_position_course_and_time_received<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&GnssPositionInfo) + Send + 'static,
    {
        self.position_course_and_time_received.subscribe(handler);
        self
    }

    /// The event raised for every decoded RMC sentence.
    pub fn position_course_and_time_received(&mut self) -> &mut Event<GnssPositionInfo> {
        &mut self.position_course_and_time_received
    }

    /// Decodes the fields of an RMC sentence.
    pub fn parse(talker_id: TalkerId, fields: &Fields<'_>) -> GnssPositionInfo {
        GnssPositionInfo {
            position_fix_valid: fields.parse::<Status>(1) == Some(Status::Valid),
            time_of_fix: fields.parse(0),
            latitude: latitude(fields, 2),
            longitude: longitude(fields, 4),
            speed_knots: fields.parse(6),
            course_degrees_true: fields.parse(7),
            date_of_fix: fields.parse(8),
            magnetic_variation_degrees: magnetic_variation(fields, 9),
            faa_mode: fields.parse(11),
            ..GnssPositionInfo::new(talker_id)
        }
    }
}

impl Decoder for RmcDecoder {
    fn sentence_types(&self) -> &[SentenceType] {
        &[SentenceType::RMC]
    }

    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
        let position = Self::parse(talker_id, fields);
        self.position_course_and_time_received.raise(&position);
    }
}
