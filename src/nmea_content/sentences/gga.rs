use std::time::Duration;

use crate::{
    Decoder, Event, Fields, SentenceType, TalkerId,
    nmea_content::{
        FixQuality, GnssPositionInfo,
        parse::{latitude, longitude, with_unit},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// The fix is reported valid when the quality indicator is present and not `0`.
#[derive(Debug, Default)]
pub struct GgaDecoder {
    position_received: Event<GnssPositionInfo>,
}

impl GgaDecoder {
    /// Creates a decoder with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every decoded GGA sentence.
    pub fn on_position_received<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&GnssPositionInfo) + Send + 'static,
    {
        self.position_received.subscribe(handler);
        self
    }

    /// The event raised for every decoded GGA sentence.
    pub fn position_received(&mut self) -> &mut Event<GnssPositionInfo> {
        &mut self.position_received
    }

    /// Decodes the fields of a GGA sentence.
    pub fn parse(talker_id: TalkerId, fields: &Fields<'_>) -> GnssPositionInfo {
        let fix_quality = fields.parse::<FixQuality>(5);

        GnssPositionInfo {
            position_fix_valid: fix_quality.is_some_and(|quality| quality != FixQuality::Invalid),
            time_of_fix: fields.parse(0),
            latitude: latitude(fields, 1),
            longitude: longitude(fields, 3),
            fix_quality,
            number_of_satellites_used: fields.parse(6),
            horizontal_dilution_of_precision: fields.parse(7),
            altitude_meters: with_unit(fields, 8, "M"),
            geoidal_separation_meters: with_unit(fields, 10, "M"),
            dgps_age: fields
                .parse::<f32>(12)
                .and_then(|seconds| Duration::try_from_secs_f32(seconds).ok()),
            dgps_station_id: fields.parse(13),
            ..GnssPositionInfo::new(talker_id)
        }
    }
}

impl Decoder for GgaDecoder {
    fn sentence_types(&self) -> &[SentenceType] {
        &[SentenceType::GGA]
    }

    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
        let position = Self::parse(talker_id, fields);
        self.position_received.raise(&position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gga_parsing() {
        let fields =
            Fields::split("001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M,,");
        let gga = GgaDecoder::parse(TalkerId::COMBINED, &fields);

        assert_eq!(gga.talker_id, TalkerId::COMBINED);
        assert!(gga.position_fix_valid);
        assert_eq!(gga.time_of_fix, time::Time::from_hms(0, 10, 43).ok());
        assert!((gga.latitude.unwrap() - 44.0690060).abs() < 1e-6);
        assert!((gga.longitude.unwrap() + 121.3143268).abs() < 1e-6);
        assert_eq!(gga.fix_quality, Some(FixQuality::GpsFix));
        assert_eq!(gga.number_of_satellites_used, Some(12));
        assert_eq!(gga.horizontal_dilution_of_precision, Some(0.98));
        assert_eq!(gga.altitude_meters, Some(1113.0));
        assert_eq!(gga.geoidal_separation_meters, Some(-21.3));
        assert_eq!(gga.dgps_age, None);
        assert_eq!(gga.dgps_station_id, None);
        assert_eq!(gga.date_of_fix, None);
        assert_eq!(gga.faa_mode, None);
    }

    #[test]
    fn test_gga_without_fix() {
        let fields = Fields::split("000049.799,,,,,0,00,,,M,,M,,");
        let gga = GgaDecoder::parse(TalkerId::GPS, &fields);

        assert!(!gga.position_fix_valid);
        assert_eq!(gga.fix_quality, Some(FixQuality::Invalid));
        assert_eq!(gga.location(), None);
        assert_eq!(gga.number_of_satellites_used, Some(0));
        assert_eq!(gga.horizontal_dilution_of_precision, None);
        assert_eq!(gga.altitude_meters, None);
        assert_eq!(gga.time_of_fix.map(|time| time.millisecond()), Some(799));
    }

    #[test]
    fn test_gga_malformed_fields() {
        let fields =
            Fields::split("001043.00,4404.14036,N,12118.85961,W,9,xx,0.98,abc,M,-21.3,F,,");
        let gga = GgaDecoder::parse(TalkerId::GPS, &fields);

        assert!(!gga.position_fix_valid);
        assert_eq!(gga.fix_quality, None);
        assert_eq!(gga.number_of_satellites_used, None);
        assert_eq!(gga.altitude_meters, None);
        assert_eq!(gga.geoidal_separation_meters, None);
        assert!(gga.location().is_some());
        assert_eq!(gga.horizontal_dilution_of_precision, Some(0.98));
    }

    #[test]
    fn test_gga_dgps() {
        let fields = Fields::split("123519,4807.038,N,01131.000,E,2,08,0.9,545.4,M,46.9,M,2.5,0031");
        let gga = GgaDecoder::parse(TalkerId::GPS, &fields);

        assert_eq!(gga.fix_quality, Some(FixQuality::DgpsFix));
        assert_eq!(gga.dgps_age, Some(Duration::from_millis(2500)));
        assert_eq!(gga.dgps_station_id, Some(31));
    }

    #[test]
    fn test_gga_truncated() {
        let cases = ["", "001043.00", "001043.00,4404.14036,N"];

        for input in cases {
            let gga = GgaDecoder::parse(TalkerId::GPS, &Fields::split(input));
            assert!(!gga.position_fix_valid, "Parsed {input:?}");
            assert_eq!(gga.longitude, None, "Parsed {input:?}");
            assert_eq!(gga.fix_quality, None, "Parsed {input:?}");
        }
    }

    #[test]
    fn test_gga_event() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut decoder = GgaDecoder::new();
        decoder.position_received().forward_to(tx);

        let fields = Fields::split("000049.799,,,,,0,00,,,M,,M,,");
        decoder.decode(TalkerId::GPS, &fields);
        decoder.decode(TalkerId::GPS, &fields);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], events[1]);
    }
}
