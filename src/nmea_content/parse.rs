//! Field helpers shared by the sentence decoders.
//!
//! Each helper reads one logical value that spans one or more adjacent fields (a coordinate
//! and its hemisphere, a value and its unit letter) and yields [`None`] when any part is
//! blank or malformed.

use log::trace;
use nom::{
    character::complete::{one_of, u8},
    combinator::opt,
};

use crate::Fields;

/// Latitude in decimal degrees from `ddmm.mmmm` at `index` and `N`/`S` at `index + 1`.
///
/// ```rust
/// use nmea0183_gnss::{Fields, nmea_content::parse::latitude};
///
/// let fields = Fields::split("4807.038,S");
/// let lat = latitude(&fields, 0).unwrap();
/// assert!((lat + 48.1173).abs() < 1e-9);
///
/// assert_eq!(latitude(&Fields::split("4807.038,"), 0), None);
/// assert_eq!(latitude(&Fields::split("9107.038,N"), 0), None);
/// ```
pub fn latitude(fields: &Fields<'_>, index: usize) -> Option<f64> {
    coordinate(fields, index, "NS", 'S', 90.0)
}

/// Longitude in decimal degrees from `dddmm.mmmm` at `index` and `E`/`W` at `index + 1`.
pub fn longitude(fields: &Fields<'_>, index: usize) -> Option<f64> {
    coordinate(fields, index, "EW", 'W', 180.0)
}

fn coordinate(
    fields: &Fields<'_>,
    index: usize,
    hemispheres: &'static str,
    negative: char,
    limit: f64,
) -> Option<f64> {
    let value: f64 = fields.parse(index)?;
    let hemisphere = fields.parse_with(index + 1, one_of(hemispheres))?;

    let Some(degrees) = sexagesimal_to_degrees(value).filter(|degrees| *degrees <= limit) else {
        trace!("coordinate {value} out of range");
        return None;
    };

    Some(if hemisphere == negative {
        -degrees
    } else {
        degrees
    })
}

/// Converts the NMEA `dddmm.mmmm` encoding into decimal degrees.
///
/// The whole hundreds are degrees, the remainder is minutes. Negative values and minutes of
/// 60 or more are rejected.
///
/// ```rust
/// use nmea0183_gnss::nmea_content::parse::sexagesimal_to_degrees;
///
/// assert_eq!(sexagesimal_to_degrees(4430.0), Some(44.5));
/// assert_eq!(sexagesimal_to_degrees(4460.0), None);
/// assert_eq!(sexagesimal_to_degrees(-4430.0), None);
/// ```
pub fn sexagesimal_to_degrees(value: f64) -> Option<f64> {
    if value < 0.0 {
        return None;
    }

    let degrees = (value / 100.0).trunc();
    let minutes = value - degrees * 100.0;

    (minutes < 60.0).then(|| degrees + minutes / 60.0)
}

/// A value at `index` whose unit letter follows at `index + 1`.
///
/// The unit field may be blank; any other letter than `unit` discards the value.
pub fn with_unit<T: crate::FieldParse>(fields: &Fields<'_>, index: usize, unit: &str) -> Option<T> {
    if let Some(found) = fields.get(index + 1)
        && found != unit
    {
        trace!("field {index}: expected unit {unit:?}, found {found:?}");
        return None;
    }

    fields.parse(index)
}

/// Magnetic variation in degrees at `index`, with `E`/`W` at `index + 1`; west is negative.
pub fn magnetic_variation(fields: &Fields<'_>, index: usize) -> Option<f32> {
    let value: f32 = fields.parse(index)?;

    match fields.parse_with(index + 1, one_of("EW"))? {
        'W' => Some(-value),
        _ => Some(value),
    }
}

/// A UTC offset from the signed hours at `index` and the minutes at `index + 1`.
///
/// The minutes take the sign of the hours; blank minutes count as zero.
///
/// ```rust
/// use nmea0183_gnss::{Fields, nmea_content::parse::utc_offset};
///
/// let offset = utc_offset(&Fields::split("-03,30"), 0).unwrap();
/// assert_eq!(offset.whole_minutes(), -210);
///
/// assert_eq!(utc_offset(&Fields::split(","), 0), None);
/// ```
pub fn utc_offset(fields: &Fields<'_>, index: usize) -> Option<time::UtcOffset> {
    let (sign, hours) = fields.parse_with(index, (opt(one_of("+-")), u8))?;
    let minutes = match fields.get(index + 1) {
        Some(_) => fields.parse::<u8>(index + 1)?,
        None => 0,
    };

    let hours = i8::try_from(hours).ok()?;
    let minutes = i8::try_from(minutes).ok()?;
    let (hours, minutes) = match sign {
        Some('-') => (-hours, -minutes),
        _ => (hours, minutes),
    };

    time::UtcOffset::from_hms(hours, minutes, 0).ok()
}

/// A calendar date from day, month, and four-digit year in three consecutive fields.
pub fn date_full_year(fields: &Fields<'_>, index: usize) -> Option<time::Date> {
    let day: u8 = fields.parse(index)?;
    let month: u8 = fields.parse(index + 1)?;
    let year: i32 = fields.parse(index + 2)?;

    let month = time::Month::try_from(month).ok()?;
    time::Date::from_calendar_date(year, month, day).ok()
}
