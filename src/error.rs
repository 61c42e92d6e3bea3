//! # Error Types
//!
//! This module defines the error types used by the sentence pipeline.
//!
//! None of these errors ever escape [`SentenceProcessor::process`](crate::SentenceProcessor::process):
//! a GNSS stream is noisy by nature, so every failure mode is reported as "no event".
//! They are still surfaced by [`SentenceProcessor::try_process`](crate::SentenceProcessor::try_process)
//! for diagnostics.

use nom::error::{ErrorKind, FromExternalError, ParseError};
use std::fmt::{self, Debug, Display};

/// Holds the result of parsing functions.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`).
///
/// The `Ok` side is a pair containing the remainder of the input (the part of the data that
/// was not parsed) and the produced value. The `Err` side contains an instance of `nom::Err`.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, Error<I, E>>;

/// Represents all the reasons a line can be dropped before or during dispatch.
#[derive(Debug, PartialEq)]
pub enum Error<I, E = nom::error::Error<I>> {
    /// The provided input contains non-ASCII characters.
    ///
    /// NMEA sentences must be ASCII-only for the checksum to be meaningful.
    NonAscii,

    /// The line does not start with `$` or `!`.
    MissingStartDelimiter,

    /// The line is shorter than the smallest possible sentence (`$` + address + `*HH`).
    TooShort,

    /// The checksum of the sentence was corrupt or incorrect.
    ChecksumMismatch {
        /// The checksum calculated from the sentence payload
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The sentence framing could not be parsed (missing `*`, non-hex checksum, stray
    /// characters after the line ending, ...).
    ParsingError(E),

    /// The payload is too short to carry a talker ID and a sentence type, or the address
    /// is not followed by a field separator.
    ///
    /// Contains the payload that could not be tokenized.
    UnrecognizedMessage(I),

    /// The sentence was valid but no decoder is registered for its type.
    ///
    /// Contains the sentence type code.
    UnsupportedSentence(I),

    /// A field could not be converted to the expected type.
    ///
    /// Returned by [`Fields::try_parse_with`](crate::Fields::try_parse_with). Decoders never
    /// fail a whole sentence because of a single field.
    InvalidField(I),
}

impl<I, E> ParseError<I> for Error<I, E>
where
    E: ParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}

impl<I, E> Display for Error<I, E>
where
    I: Display,
    E: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonAscii => write!(f, "sentence contains non-ASCII characters"),
            Error::MissingStartDelimiter => write!(f, "sentence does not start with '$' or '!'"),
            Error::TooShort => write!(f, "sentence is too short"),
            Error::ChecksumMismatch { expected, found } => write!(
                f,
                "checksum mismatch: calculated {expected:02X}, found {found:02X}"
            ),
            Error::ParsingError(e) => write!(f, "malformed sentence: {e:?}"),
            Error::UnrecognizedMessage(i) => write!(f, "unrecognized sentence payload '{i}'"),
            Error::UnsupportedSentence(i) => write!(f, "no decoder registered for {i}"),
            Error::InvalidField(i) => write!(f, "invalid field '{i}'"),
        }
    }
}

/// Flattens a `nom::Err` into the underlying [`Error`].
///
/// Every parser in this crate works on complete input, so `Incomplete` never occurs in
/// practice; it is mapped to a generic parsing error rather than panicking.
pub(crate) fn flatten<I, E>(err: nom::Err<Error<I, E>>, input: I) -> Error<I, E>
where
    E: ParseError<I>,
{
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => Error::from_error_kind(input, ErrorKind::Complete),
    }
}
