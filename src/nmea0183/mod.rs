//! # NMEA 0183 Sentence Framing
//!
//! This module validates the outer structure of an NMEA 0183 sentence:
//! `$<address>,D1,D2,...,Dn*CC\r\n`
//!
//! It strips the start delimiter, the checksum and the line ending, verifies the checksum,
//! and hands the payload (everything between `$` and `*`) to the tokenizer.
//!
//! The framing is configurable through the [`SentenceProcessorBuilder`](crate::SentenceProcessorBuilder):
//! - Checksum requirements (required or optional)
//! - Line ending requirements (optional, required, or forbidden)

use nom::{
    Err, Parser,
    branch::alt,
    bytes::complete::{tag, take, take_until},
    character::complete::{char, hex_digit0, one_of},
    combinator::{opt, rest},
    error::{ErrorKind, ParseError},
    number::complete::hex_u32,
};

use crate::{Error, IResult, error::flatten, parsing::consumed};

/// Length of the sentence address: a 2-character talker ID followed by a 3-character
/// sentence type.
pub const ADDRESS_LEN: usize = 5;

/// The shortest line that can carry a checksummed sentence: `$`, the address and `*HH`.
pub const MIN_SENTENCE_LEN: usize = 1 + ADDRESS_LEN + 3;

/// Defines how the processor should handle sentence checksums.
///
/// NMEA 0183 sentences carry a checksum in the format `*CC` where CC is a two-digit
/// hexadecimal value representing the XOR of all bytes between the `$` and the `*`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    #[default]
    /// Checksum is required and must be present and valid.
    ///
    /// Sentences without a `*CC` suffix are dropped.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// - If no checksum is present (`*CC` missing), the sentence is dispatched anyway
    /// - If a checksum is present, it must be valid or the sentence is dropped
    ///
    /// Use this mode with legacy equipment that does not always emit checksums.
    Optional,
}

/// Defines how the processor should handle CRLF line endings.
///
/// Transports differ in whether they hand over lines with or without their `\r\n`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    #[default]
    /// A trailing `\r\n`, `\n` or `\r` is accepted and stripped, but not required.
    Optional,

    /// CRLF line ending is required and must be present.
    ///
    /// Use this mode when reading raw serial data or NMEA log files.
    Required,

    /// CRLF line ending is forbidden and must not be present.
    ///
    /// Use this mode when lines come from a source that already strips line endings.
    Forbidden,
}

/// A sentence whose framing and checksum have been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame<'a> {
    /// Everything between the start delimiter and the `*` (or the end of the line).
    pub payload: &'a str,
    /// The checksum found in the sentence, if any. When present it matched the payload.
    pub checksum: Option<u8>,
}

/// Splits a line into its payload and checksum and verifies the checksum.
///
/// The checks run in this order:
/// * The input must be ASCII-only
/// * The line must start with `$` or `!`
/// * The line ending must match `le`
/// * The line must be long enough to hold an address (and `*CC` when required)
/// * The checksum must be present (when required), two hex digits, and match the payload
pub(crate) fn frame(line: &str, cc: ChecksumMode, le: LineEndingMode) -> Result<Frame<'_>, Error<&str>> {
    if !line.is_ascii() {
        return Err(Error::NonAscii);
    }

    let start: IResult<&str, char> = one_of("$!").parse(line);
    let Ok((i, _)) = start else {
        return Err(Error::MissingStartDelimiter);
    };

    let (body, _) = line_ending(i, le).map_err(|e| flatten(e, i))?;

    let min_len = match cc {
        ChecksumMode::Required => MIN_SENTENCE_LEN,
        ChecksumMode::Optional => 1 + ADDRESS_LEN,
    };
    if 1 + body.len() < min_len {
        return Err(Error::TooShort);
    }

    let split: IResult<&str, &str> = alt((take_until("*"), rest)).parse(body);
    let (cc_field, payload) = split.map_err(|e| flatten(e, body))?;
    let (_, found) = checksum_field(cc_field, cc).map_err(|e| flatten(e, cc_field))?;

    let calculated = checksum(payload.as_bytes());
    if let Some(found) = found
        && found != calculated
    {
        return Err(Error::ChecksumMismatch {
            expected: calculated,
            found,
        });
    }

    Ok(Frame {
        payload,
        checksum: found,
    })
}

/// Verifies the checksum of a single NMEA sentence.
///
/// The line must start with `$` or `!`, end with `*HH` (two hex digits, any case),
/// optionally followed by `\r\n`, `\n` or `\r`. Every byte strictly between the start
/// delimiter and the `*` is XORed and compared with `HH`.
///
/// Malformed input is never an error here, it is simply reported as invalid.
///
/// # Examples
///
/// ```rust
/// use nmea0183_gnss::validate_checksum;
///
/// assert!(validate_checksum("$GNGLL,,,,,,V,N*7A"));
/// assert!(validate_checksum("$GNGLL,,,,,,V,N*7a\r\n"));
/// assert!(validate_checksum("$GNGLL,,,,,,V,N*7A\n"));
/// assert!(!validate_checksum("$GNGLL,,,,,,V,N*7B"));
/// assert!(!validate_checksum("GNGLL,,,,,,V,N*7A"));
/// assert!(!validate_checksum("$GNGLL,,,,,,V,N"));
/// ```
pub fn validate_checksum(line: &str) -> bool {
    frame(line, ChecksumMode::Required, LineEndingMode::Optional).is_ok()
}

/// Calculates the NMEA 0183 checksum for the given payload.
///
/// The payload is everything between the `$` and the `*`, excluding both.
///
/// ```rust
/// use nmea0183_gnss::checksum;
///
/// assert_eq!(checksum(b"GNGLL,,,,,,V,N"), 0x7A);
/// ```
pub fn checksum(payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Parses the `*CC` suffix of a sentence (line ending already stripped).
///
/// Returns the checksum value, or [`None`] when no checksum is present and
/// `cc` is [`ChecksumMode::Optional`].
fn checksum_field(i: &str, cc: ChecksumMode) -> IResult<&str, Option<u8>> {
    let (i, present) = match cc {
        ChecksumMode::Required => char('*').map(|_| true).parse(i)?,
        ChecksumMode::Optional => opt(char('*')).map(|asterisk| asterisk.is_some()).parse(i)?,
    };

    if present {
        let (i, digits) = consumed(take(2u8), ErrorKind::Count).parse(i)?;
        let (_, digits) = consumed(hex_digit0, ErrorKind::IsA).parse(digits)?;
        let (_, value) = hex_u32.map(|cc| cc as u8).parse(digits)?;

        Ok((i, Some(value)))
    } else if !i.is_empty() {
        Err(Err::Error(Error::from_error_kind(i, ErrorKind::Count)))
    } else {
        Ok((i, None))
    }
}

/// Strips the line ending according to `le`.
///
/// [`LineEndingMode::Optional`] also strips a lone trailing `\n` or `\r`, as left behind by
/// readers that split on one of the two. The other modes only know `\r\n`.
///
/// On success the "remaining input" is the line without its ending.
fn line_ending(i: &str, le: LineEndingMode) -> IResult<&str, ()> {
    let (i, data) = opt(take_until("\r\n")).parse(i)?;

    match (le, data) {
        (LineEndingMode::Required, None) | (LineEndingMode::Forbidden, Some(_)) => {
            Err(Err::Error(Error::from_error_kind(i, ErrorKind::CrLf)))
        }
        (_, Some(data)) => {
            let (_, _) = consumed(tag("\r\n"), ErrorKind::CrLf).parse(i)?;
            Ok((data, ()))
        }
        (LineEndingMode::Optional, None) => Ok((i.strip_suffix(['\n', '\r']).unwrap_or(i), ())),
        (_, None) => Ok((i, ())),
    }
}
