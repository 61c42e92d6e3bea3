//! # Parsing Utilities
//!
//! Small combinators shared by the framing parser and the field parsers.

use nom::{
    Err, Input, Parser, ToUsize,
    bytes::complete::take,
    combinator::{rest_len, verify},
    error::{ErrorKind, ParseError},
    sequence::terminated,
};

use crate::{Error, FieldParse};

/// Ensures that the parser consumes all input.
///
/// Runs `f` and fails with `e` if anything is left over afterwards.
///
/// # Examples
///
/// ```rust
/// use nmea0183_gnss::parsing::consumed;
/// use nom::{IResult, Parser, bytes::complete::take, error::ErrorKind};
///
/// // Parse all 3 bytes
/// let mut parser = consumed(take(3u8), ErrorKind::Count);
/// let result: IResult<_, _> = parser.parse("abc");
/// assert!(result.is_ok());
///
/// // This would fail because not all input is consumed
/// let result: IResult<_, _> = parser.parse("abcd");
/// assert!(result.is_err());
/// ```
pub fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    terminated(
        f,
        verify(rest_len, |len| len == &0)
            .or(move |i| Err(Err::Error(nom::error::make_error(i, e)))),
    )
}

/// Takes exactly `count` characters and parses all of them as `T`.
///
/// This is how the fixed-width sub-fields of NMEA encodings are read, like the
/// `hh`, `mm` and `ss` of a `hhmmss.ss` time or the `dd`, `mm` and `yy` of a date.
///
/// ```rust
/// use nmea0183_gnss::{IResult, parsing::with_take};
/// use nom::Parser;
///
/// let result: IResult<_, u8> = with_take(2u8).parse("123456");
/// assert_eq!(result, Ok(("3456", 12)));
///
/// let result: IResult<_, u8> = with_take(2u8).parse("1x3456");
/// assert!(result.is_err());
/// ```
pub fn with_take<'a, T, C>(count: C) -> impl Parser<&'a str, Output = T, Error = Error<&'a str>>
where
    T: FieldParse,
    C: ToUsize,
{
    take(count).and_then(consumed(T::parse_field, ErrorKind::Count))
}
