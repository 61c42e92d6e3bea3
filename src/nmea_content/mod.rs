//! # NMEA 0183 Content
//!
//! Typed results produced by the built-in decoders, the single-character enumerations shared
//! between sentence grammars, and the decoders themselves (see [`sentences`]).

use std::time::Duration;

use nom::Parser;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TalkerId;

pub mod parse;
pub mod sentences;

pub use sentences::*;

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The character encoding this value in a sentence.
            pub fn as_char(&self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl crate::FieldParse for $name {
            fn parse_field(i: &str) -> crate::IResult<&str, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }
        }
    };
}

parsable_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

parsable_enum! {
    /// FAA Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum FaaMode {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// C - Quectel Querk, "Caution"
        'C' => Caution,
        /// D - Differential Mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// F - RTK Float mode
        'F' => FloatRtk,
        /// M - Manual Input Mode
        'M' => Manual,
        /// N - Data Not Valid
        'N' => DataNotValid,
        /// P - Precise
        'P' => Precise,
        /// R - RTK Integer mode
        'R' => FixedRtk,
        /// S - Simulated Mode
        'S' => Simulator,
        /// U - Quectel Querk, "Unsafe"
        'U' => Unsafe,
    }
}

parsable_enum! {
    /// Quality of the GPS fix
    pub enum FixQuality {
        /// 0 - Fix not available
        '0' => Invalid,
        /// 1 - GPS fix
        '1' => GpsFix,
        /// 2 - Differential GPS fix
        '2' => DgpsFix,
        /// 3 - PPS fix
        '3' => PpsFix,
        /// 4 - Real Time Kinematic
        '4' => Rtk,
        /// 5 - Float RTK
        '5' => FloatRtk,
        /// 6 - Estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulation,
    }
}

parsable_enum! {
    /// How the receiver selects between 2D and 3D operation
    pub enum FixMode {
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
        /// A - Automatic, 2D/3D
        'A' => Automatic,
    }
}

parsable_enum! {
    /// Dimension of the current fix
    pub enum FixDimension {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D Fix
        '2' => Fix2D,
        /// 3 - 3D Fix
        '3' => Fix3D,
    }
}

parsable_enum! {
    /// NMEA 4.11 System ID
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_nmea_4_11_system_id_and_signal_id>
    pub enum SystemId {
        /// 1 - GPS (GP)
        '1' => Gps,
        /// 2 - GLONASS (GL)
        '2' => Glonass,
        /// 3 - Galileo (GA)
        '3' => Galileo,
        /// 4 - BeiDou (GB/BD)
        '4' => Beidou,
        /// 5 - QZSS (GQ)
        '5' => Qzss,
        /// 6 - NavIC (GI)
        '6' => Navic,
    }
}

/// A position report, as decoded from GGA, GLL, and RMC sentences.
///
/// Each sentence fills in the fields it carries and leaves the others as [`None`]. A field
/// that was blank or malformed is [`None`] as well, never zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GnssPositionInfo {
    /// Source of the sentence
    pub talker_id: TalkerId,
    /// Whether the receiver reports the fix as usable
    pub position_fix_valid: bool,
    /// Fix time in UTC
    pub time_of_fix: Option<time::Time>,
    /// Fix date in UTC (RMC)
    pub date_of_fix: Option<time::Date>,
    /// Latitude in decimal degrees, negative south of the equator
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, negative west of Greenwich
    pub longitude: Option<f64>,
    /// Altitude above/below mean sea level (geoid) in meters (GGA)
    pub altitude_meters: Option<f64>,
    /// Geoidal separation in meters, negative when the geoid is below the ellipsoid (GGA)
    pub geoidal_separation_meters: Option<f64>,
    /// GPS Quality Indicator (GGA)
    pub fix_quality: Option<FixQuality>,
    /// Number of satellites in use (GGA)
    pub number_of_satellites_used: Option<u8>,
    /// Horizontal Dilution of Precision (GGA)
    pub horizontal_dilution_of_precision: Option<f32>,
    /// Speed over ground in knots (RMC)
    pub speed_knots: Option<f32>,
    /// Course over ground in degrees true (RMC)
    pub course_degrees_true: Option<f32>,
    /// Magnetic variation in degrees, negative to the west (RMC)
    pub magnetic_variation_degrees: Option<f32>,
    /// Age of the differential corrections (GGA)
    pub dgps_age: Option<Duration>,
    /// Differential reference station ID (GGA)
    pub dgps_station_id: Option<u16>,
    /// FAA Mode Indicator (GLL, RMC)
    pub faa_mode: Option<FaaMode>,
}

impl GnssPositionInfo {
    /// An empty report: no fix, every value absent.
    pub fn new(talker_id: TalkerId) -> Self {
        Self {
            talker_id,
            position_fix_valid: false,
            time_of_fix: None,
            date_of_fix: None,
            latitude: None,
            longitude: None,
            altitude_meters: None,
            geoidal_separation_meters: None,
            fix_quality: None,
            number_of_satellites_used: None,
            horizontal_dilution_of_precision: None,
            speed_knots: None,
            course_degrees_true: None,
            magnetic_variation_degrees: None,
            dgps_age: None,
            dgps_station_id: None,
            faa_mode: None,
        }
    }

    /// Latitude and longitude, if both are known.
    pub fn location(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Satellite information carried by GSV sentences
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Satellite {
    /// Satellite PRN number
    pub prn: u16,
    /// Elevation in degrees, 0-90
    pub elevation: Option<u8>,
    /// Azimuth in degrees from true north, 0-359
    pub azimuth: Option<u16>,
    /// Signal-to-noise ratio in dB-Hz, absent when not tracking
    pub snr: Option<u8>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::FieldParse;

    #[test]
    fn test_status() {
        assert_eq!(Status::parse_field("A").unwrap(), ("", Status::Valid));
        assert_eq!(Status::parse_field("V").unwrap(), ("", Status::Invalid));
        assert!(Status::parse_field("K").is_err());
    }

    #[test]
    fn test_faa_mode() {
        let cases = [
            ("A", FaaMode::Autonomous),
            ("C", FaaMode::Caution),
            ("D", FaaMode::Differential),
            ("E", FaaMode::Estimated),
            ("F", FaaMode::FloatRtk),
            ("M", FaaMode::Manual),
            ("N", FaaMode::DataNotValid),
            ("P", FaaMode::Precise),
            ("R", FaaMode::FixedRtk),
            ("S", FaaMode::Simulator),
            ("U", FaaMode::Unsafe),
        ];

        for (input, expected) in cases {
            assert_eq!(FaaMode::parse_field(input).unwrap(), ("", expected));
            assert_eq!(expected.as_char().to_string(), input);
        }
        assert!(FaaMode::parse_field("X").is_err());
    }

    #[test]
    fn test_fix_quality() {
        let cases = [
            ("0", FixQuality::Invalid),
            ("1", FixQuality::GpsFix),
            ("2", FixQuality::DgpsFix),
            ("3", FixQuality::PpsFix),
            ("4", FixQuality::Rtk),
            ("5", FixQuality::FloatRtk),
            ("6", FixQuality::Estimated),
            ("7", FixQuality::Manual),
            ("8", FixQuality::Simulation),
        ];

        for (input, expected) in cases {
            assert_eq!(FixQuality::parse_field(input).unwrap(), ("", expected));
        }
        assert!(FixQuality::parse_field("9").is_err());
    }

    #[test]
    fn test_fix_mode_and_dimension() {
        assert_eq!(FixMode::parse_field("A").unwrap(), ("", FixMode::Automatic));
        assert_eq!(FixMode::parse_field("M").unwrap(), ("", FixMode::Manual));
        assert!(FixMode::parse_field("X").is_err());

        assert_eq!(FixDimension::parse_field("1").unwrap(), ("", FixDimension::NoFix));
        assert_eq!(FixDimension::parse_field("2").unwrap(), ("", FixDimension::Fix2D));
        assert_eq!(FixDimension::parse_field("3").unwrap(), ("", FixDimension::Fix3D));
        assert!(FixDimension::parse_field("4").is_err());
    }

    #[test]
    fn test_system_id() {
        assert_eq!(SystemId::parse_field("1").unwrap(), ("", SystemId::Gps));
        assert_eq!(SystemId::parse_field("6").unwrap(), ("", SystemId::Navic));
        assert!(SystemId::parse_field("7").is_err());
    }
}
