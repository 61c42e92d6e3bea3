use nom::{
    Parser,
    character::complete::{anychar, char, digit1},
    combinator::{opt, verify},
    sequence::preceded,
};

use crate::{IResult, parsing::with_take};

/// Trait for parsing a value out of a single NMEA 0183 field.
///
/// A field is the text between two commas. Implementations parse from the start of the
/// field; the caller (usually [`Fields::parse`](crate::Fields::parse)) checks that the whole
/// field was consumed and turns any failure into "no value".
///
/// Implementations are provided for integers, floats, `char`, [`time::Time`]
/// (`hhmmss[.sss]`) and [`time::Date`] (`ddmmyy`).
///
/// # Examples
///
/// ```rust
/// use nmea0183_gnss::{FieldParse, IResult};
///
/// let result: IResult<_, _> = u8::parse_field("42");
/// assert_eq!(result, Ok(("", 42)));
///
/// let result: IResult<_, _> = f32::parse_field("0.98");
/// assert_eq!(result, Ok(("", 0.98)));
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_gnss::{FieldParse, IResult};
/// use nom::{Parser, character::complete::one_of};
///
/// #[derive(Debug, PartialEq)]
/// enum Unit {
///     Meters,
///     Feet,
/// }
///
/// impl FieldParse for Unit {
///     fn parse_field(i: &str) -> IResult<&str, Self> {
///         one_of("Mf")
///             .map(|unit| if unit == 'M' { Unit::Meters } else { Unit::Feet })
///             .parse(i)
///     }
/// }
///
/// assert_eq!(Unit::parse_field("M"), Ok(("", Unit::Meters)));
/// ```
pub trait FieldParse: Sized {
    /// Parses a value from the start of the field.
    ///
    /// Returns the unparsed rest of the field together with the value.
    fn parse_field(i: &str) -> IResult<&str, Self>;
}

macro_rules! impl_int_type {
    ($($t:tt),*) => ($(
        impl FieldParse for $t {
            fn parse_field(i: &str) -> IResult<&str, Self> {
                nom::character::complete::$t.parse(i)
            }
        }
    )*)
}

impl_int_type!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! impl_float_type {
    ($($t:ty, $p:ident),*) => ($(
        impl FieldParse for $t {
            fn parse_field(i: &str) -> IResult<&str, Self> {
                verify(nom::number::complete::$p, |value: &$t| value.is_finite()).parse(i)
            }
        }
    )*)
}

impl_float_type!(f32, float, f64, double);

impl FieldParse for char {
    fn parse_field(i: &str) -> IResult<&str, Self> {
        anychar.parse(i)
    }
}

impl FieldParse for time::Time {
    /// Parses `hhmmss` with an optional fraction of a second of any length.
    ///
    /// The fraction is kept to the nanosecond; extra digits are ignored.
    fn parse_field(i: &str) -> IResult<&str, Self> {
        let (i, hour) = with_take::<u8, _>(2u8).parse(i)?;
        let (i, minute) = with_take::<u8, _>(2u8).parse(i)?;
        let (i, second) = with_take::<u8, _>(2u8).parse(i)?;
        let (i, fraction) = opt(preceded(char('.'), digit1)).parse(i)?;

        let nanosecond = fraction.map_or(0, fraction_to_nanos);

        let time = time::Time::from_hms_nano(hour, minute, second, nanosecond).or(Err(
            nom::Err::Error(nom::error::make_error(i, nom::error::ErrorKind::Verify)),
        ))?;

        Ok((i, time))
    }
}

impl FieldParse for time::Date {
    /// Parses `ddmmyy`; the two-digit year is taken as `2000 + yy`.
    fn parse_field(i: &str) -> IResult<&str, Self> {
        let (i, day) = with_take::<u8, _>(2u8).parse(i)?;
        let (i, month) = with_take::<u8, _>(2u8).parse(i)?;
        let (i, year) = with_take::<u16, _>(2u8).parse(i)?;

        let month = time::Month::try_from(month).or(Err(nom::Err::Error(
            nom::error::make_error(i, nom::error::ErrorKind::Verify),
        )))?;

        let date = time::Date::from_calendar_date(2000 + i32::from(year), month, day).or(Err(
            nom::Err::Error(nom::error::make_error(i, nom::error::ErrorKind::Verify)),
        ))?;

        Ok((i, date))
    }
}

/// Converts the digits after a decimal point into nanoseconds, truncating past the ninth.
fn fraction_to_nanos(digits: &str) -> u32 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(9)
        .fold(0, |nanos, digit| nanos * 10 + u32::from(digit - b'0'))
}

#[cfg(test)]
mod tests {
    use crate::{FieldParse, IResult};

    #[test]
    fn test_parse_time() {
        let result: IResult<_, _> = time::Time::parse_field("001043.00");
        assert_eq!(result, Ok(("", time::Time::from_hms(0, 10, 43).unwrap())));

        let (_, time) = time::Time::parse_field("000049.799").unwrap();
        assert_eq!(time.millisecond(), 799);

        let (_, time) = time::Time::parse_field("235959").unwrap();
        assert_eq!(time, time::Time::from_hms(23, 59, 59).unwrap());

        let (_, time) = time::Time::parse_field("123519.1234567891").unwrap();
        assert_eq!(time.nanosecond(), 123_456_789);

        let (_, time) = time::Time::parse_field("123519.9999999999").unwrap();
        assert_eq!(time, time::Time::from_hms_nano(12, 35, 19, 999_999_999).unwrap());

        let cases = ["246000", "126100", "1200", "12ab00", ""];
        for &input in &cases {
            let result = time::Time::parse_field(input);
            assert!(result.is_err(), "Parsed {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_parse_date() {
        let (_, date) = time::Date::parse_field("100117").unwrap();
        assert_eq!(
            date,
            time::Date::from_calendar_date(2017, time::Month::January, 10).unwrap()
        );

        let (_, date) = time::Date::parse_field("230394").unwrap();
        assert_eq!(date.year(), 2094);

        let cases = ["320117", "101317", "000117", "1001", "10a117", ""];
        for &input in &cases {
            let result = time::Date::parse_field(input);
            assert!(result.is_err(), "Parsed {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_parse_float_rejects_non_finite() {
        assert!(f64::parse_field("nan").is_err());
        assert!(f32::parse_field("inf").is_err());
        assert_eq!(f64::parse_field("-21.3"), Ok(("", -21.3)));
    }
}
