#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Decoder, Event, Fields, SentenceType, TalkerId,
    nmea_content::{FaaMode, parse::with_unit},
};

const KPH_PER_KNOT: f32 = 1.852;

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
///
/// When only one of the two speeds is sent, the other one is derived from it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct CourseOverGround {
    /// Source of the sentence
    pub talker_id: TalkerId,
    /// Course over ground in degrees true
    pub track_degrees_true: Option<f32>,
    /// Course over ground in degrees magnetic
    pub track_degrees_magnetic: Option<f32>,
    /// Speed over ground in knots
    pub speed_knots: Option<f32>,
    /// Speed over ground in kilometers per hour
    pub speed_kph: Option<f32>,
    /// `false` when the mode indicator is `N` or the sentence carries no data
    pub valid: bool,
    /// FAA Mode Indicator
    pub faa_mode: Option<FaaMode>,
}

/// Decodes VTG sentences into [`CourseOverGround`].
#[derive(Debug, Default)]
pub struct VtgDecoder {
    course_and_velocity_received: Event<CourseOverGround>,
}

impl VtgDecoder {
    /// Creates a decoder with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every decoded VTG sentence.
    pub fn on_course_and_velocity_received<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&CourseOverGround) + Send + 'static,
    {
        self.course_and_velocity_received.subscribe(handler);
        self
    }

    /// The event raised for every decoded VTG sentence.
    pub fn course_and_velocity_received(&mut self) -> &mut Event<CourseOverGround> {
        &mut self.course_and_velocity_received
    }

    /// Decodes the fields of a VTG sentence.
    pub fn parse(talker_id: TalkerId, fields: &Fields<'_>) -> CourseOverGround {
        let track_degrees_true = with_unit(fields, 0, "T");
        let track_degrees_magnetic = with_unit(fields, 2, "M");
        let knots = with_unit::<f32>(fields, 4, "N");
        let kph = with_unit::<f32>(fields, 6, "K");
        let faa_mode = fields.parse(8);

        let speed_knots = knots.or(kph.map(|kph| kph / KPH_PER_KNOT));
        let speed_kph = kph.or(knots.map(|knots| knots * KPH_PER_KNOT));
        let has_data =
            track_degrees_true.is_some() || track_degrees_magnetic.is_some() || speed_knots.is_some();

        CourseOverGround {
            talker_id,
            track_degrees_true,
            track_degrees_magnetic,
            speed_knots,
            speed_kph,
            valid: has_data && faa_mode != Some(FaaMode::DataNotValid),
            faa_mode,
        }
    }
}

impl Decoder for VtgDecoder {
    fn sentence_types(&self) -> &[SentenceType] {
        &[SentenceType::VTG]
    }

    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
        let course = Self::parse(talker_id, fields);
        self.course_and_velocity_received.raise(&course);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtg_parsing() {
        let fields = Fields::split("054.7,T,034.4,M,005.5,N,010.2,K,A");
        let vtg = VtgDecoder::parse(TalkerId::GPS, &fields);

        assert!(vtg.valid);
        assert_eq!(vtg.track_degrees_true, Some(54.7));
        assert_eq!(vtg.track_degrees_magnetic, Some(34.4));
        assert_eq!(vtg.speed_knots, Some(5.5));
        assert_eq!(vtg.speed_kph, Some(10.2));
        assert_eq!(vtg.faa_mode, Some(FaaMode::Autonomous));
    }

    #[test]
    fn test_vtg_not_valid() {
        let vtg = VtgDecoder::parse(TalkerId::GPS, &Fields::split(",T,,M,,N,,K,N"));

        assert!(!vtg.valid);
        assert_eq!(vtg.track_degrees_true, None);
        assert_eq!(vtg.speed_knots, None);
        assert_eq!(vtg.speed_kph, None);
        assert_eq!(vtg.faa_mode, Some(FaaMode::DataNotValid));

        let vtg = VtgDecoder::parse(TalkerId::GPS, &Fields::split("054.7,T,,M,005.5,N,,K,N"));
        assert!(!vtg.valid);
        assert_eq!(vtg.track_degrees_true, Some(54.7));
    }

    #[test]
    fn test_vtg_derived_speed() {
        let vtg = VtgDecoder::parse(TalkerId::GPS, &Fields::split("360.0,T,348.7,M,,N,100.0,K"));
        assert!(vtg.valid);
        assert_eq!(vtg.faa_mode, None);
        assert!((vtg.speed_knots.unwrap() - 53.99568).abs() < 1e-3);

        let vtg = VtgDecoder::parse(TalkerId::GPS, &Fields::split(",T,,M,10.0,N,,K,A"));
        assert!(vtg.valid);
        assert!((vtg.speed_kph.unwrap() - 18.52).abs() < 1e-3);
    }

    #[test]
    fn test_vtg_wrong_unit() {
        let vtg = VtgDecoder::parse(TalkerId::GPS, &Fields::split("054.7,M,034.4,T,005.5,N,010.2,K,A"));

        assert_eq!(vtg.track_degrees_true, None);
        assert_eq!(vtg.track_degrees_magnetic, None);
        assert_eq!(vtg.speed_knots, Some(5.5));
    }
}
