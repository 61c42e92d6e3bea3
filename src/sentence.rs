//! # Sentence Tokenizer
//!
//! Splits the payload of a framed sentence into its address (talker ID and sentence type)
//! and its comma-separated fields.

use std::fmt;

use log::trace;
use nom::{
    Parser,
    bytes::complete::take,
    character::complete::char,
    combinator::rest,
    error::ErrorKind,
    sequence::preceded,
};

use crate::{Error, FieldParse, IResult, nmea_content::SystemId, parsing::consumed};

macro_rules! address_code {
    (
        $(#[$meta:meta])*
        $name:ident, $len:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Builds the code from its textual form.
            ///
            /// Returns [`None`] unless `code` is exactly
            #[doc = concat!(stringify!($len), " ASCII alphanumeric characters.")]
            pub fn new(code: &str) -> Option<Self> {
                let bytes: [u8; $len] = code.as_bytes().try_into().ok()?;
                bytes
                    .iter()
                    .all(u8::is_ascii_alphanumeric)
                    .then_some(Self(bytes))
            }

            /// The code as text.
            pub fn as_str(&self) -> &str {
                std::str::from_utf8(&self.0).unwrap_or_default()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = <heapless::String<$len> as serde::Deserialize>::deserialize(deserializer)?;
                $name::new(&code).ok_or_else(|| {
                    serde::de::Error::custom(concat!(
                        "expected ",
                        stringify!($len),
                        " ASCII alphanumeric characters"
                    ))
                })
            }
        }
    };
}

address_code! {
    /// Two-letter prefix identifying the source of a sentence (`GP`, `GL`, `GN`, ...).
    TalkerId, 2
}

address_code! {
    /// Three-letter code identifying the grammar of a sentence (`GGA`, `RMC`, ...).
    SentenceType, 3
}

impl TalkerId {
    /// GPS (`GP`)
    pub const GPS: Self = Self(*b"GP");
    /// GLONASS (`GL`)
    pub const GLONASS: Self = Self(*b"GL");
    /// Galileo (`GA`)
    pub const GALILEO: Self = Self(*b"GA");
    /// BeiDou (`GB`)
    pub const BEIDOU: Self = Self(*b"GB");
    /// QZSS (`GQ`)
    pub const QZSS: Self = Self(*b"GQ");
    /// NavIC (`GI`)
    pub const NAVIC: Self = Self(*b"GI");
    /// Combined multi-constellation solution (`GN`)
    pub const COMBINED: Self = Self(*b"GN");

    /// The constellation behind this talker, if it names a single one.
    ///
    /// `GN` (combined solution) and non-GNSS talkers return [`None`].
    pub fn system(&self) -> Option<SystemId> {
        match &self.0 {
            b"GP" => Some(SystemId::Gps),
            b"GL" => Some(SystemId::Glonass),
            b"GA" => Some(SystemId::Galileo),
            b"GB" | b"BD" => Some(SystemId::Beidou),
            b"GQ" | b"QZ" => Some(SystemId::Qzss),
            b"GI" => Some(SystemId::Navic),
            _ => None,
        }
    }
}

impl SentenceType {
    /// Global Positioning System Fix Data
    pub const GGA: Self = Self(*b"GGA");
    /// Geographic Position - Latitude/Longitude
    pub const GLL: Self = Self(*b"GLL");
    /// GNSS DOP and active satellites
    pub const GSA: Self = Self(*b"GSA");
    /// Satellites in View
    pub const GSV: Self = Self(*b"GSV");
    /// Recommended Minimum Navigation Information
    pub const RMC: Self = Self(*b"RMC");
    /// Track made good and Ground speed
    pub const VTG: Self = Self(*b"VTG");
    /// Time & Date
    pub const ZDA: Self = Self(*b"ZDA");
}

/// The ordered fields of a sentence, borrowed from the line.
///
/// An empty field (two consecutive commas) and a field past the end of the sentence are
/// both "no value": NMEA producers routinely leave optional fields blank or drop trailing
/// ones altogether, so decoders read every field through the accessors below and never
/// index the list directly.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fields<'a>(Vec<&'a str>);

impl<'a> Fields<'a> {
    /// Splits `data` on every comma, keeping empty fields.
    ///
    /// ```rust
    /// use nmea0183_gnss::Fields;
    ///
    /// let fields = Fields::split("A,,3");
    /// assert_eq!(fields.len(), 3);
    /// assert_eq!(fields.raw(1), Some(""));
    /// assert_eq!(fields.get(1), None);
    /// assert_eq!(fields.parse::<u8>(2), Some(3));
    /// ```
    pub fn split(data: &'a str) -> Self {
        Self(data.split(',').collect())
    }

    /// Number of fields, empty ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the sentence carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The field at `index` exactly as received, or [`None`] past the end.
    pub fn raw(&self, index: usize) -> Option<&'a str> {
        self.0.get(index).copied()
    }

    /// The field at `index`, or [`None`] if it is empty or past the end.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.raw(index).filter(|field| !field.is_empty())
    }

    /// Parses the whole field at `index` as `T`.
    ///
    /// Returns [`None`] when the field is empty, missing, or does not parse; a field with
    /// trailing garbage (`"12x"` for a number) does not parse.
    pub fn parse<T: FieldParse>(&self, index: usize) -> Option<T> {
        self.parse_with(index, T::parse_field)
    }

    /// Parses the whole field at `index` with a custom parser.
    pub fn parse_with<T, P>(&self, index: usize, parser: P) -> Option<T>
    where
        P: Parser<&'a str, Output = T, Error = Error<&'a str>>,
    {
        self.try_parse_with(index, parser).unwrap_or_else(|e| {
            trace!("ignoring field {index}: {e}");
            None
        })
    }

    /// Like [`parse_with`](Self::parse_with), but tells a malformed field apart from an
    /// empty one.
    ///
    /// ```rust
    /// use nmea0183_gnss::{Error, Fields, FieldParse};
    ///
    /// let fields = Fields::split("7,,x");
    /// assert_eq!(fields.try_parse_with(0, u8::parse_field), Ok(Some(7)));
    /// assert_eq!(fields.try_parse_with(1, u8::parse_field), Ok(None));
    /// assert_eq!(fields.try_parse_with(2, u8::parse_field), Err(Error::InvalidField("x")));
    /// ```
    pub fn try_parse_with<T, P>(&self, index: usize, parser: P) -> Result<Option<T>, Error<&'a str>>
    where
        P: Parser<&'a str, Output = T, Error = Error<&'a str>>,
    {
        let Some(field) = self.get(index) else {
            return Ok(None);
        };

        match consumed(parser, ErrorKind::Eof).parse(field) {
            Ok((_, value)) => Ok(Some(value)),
            Err(_) => Err(Error::InvalidField(field)),
        }
    }

    /// Iterates over the raw fields.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.0.iter().copied()
    }
}

/// A checksum-validated sentence split into its parts.
///
/// Created for each incoming line and discarded once the sentence has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence<'a> {
    /// Source of the sentence (`GP`, `GN`, ...)
    pub talker_id: TalkerId,
    /// Grammar of the sentence (`GGA`, `RMC`, ...)
    pub sentence_type: SentenceType,
    /// Fields following the address
    pub fields: Fields<'a>,
    /// `true` if the sentence carried a checksum and it matched.
    ///
    /// Only `false` for checksum-less sentences accepted under
    /// [`ChecksumMode::Optional`](crate::ChecksumMode::Optional).
    pub checksum_valid: bool,
}

impl<'a> RawSentence<'a> {
    /// Splits a sentence payload (the text between `$` and `*`).
    ///
    /// The first two characters are the talker ID, the next three the sentence type; the
    /// address must be followed by a comma or by the end of the payload.
    ///
    /// ```rust
    /// use nmea0183_gnss::{RawSentence, SentenceType, TalkerId};
    ///
    /// let sentence = RawSentence::tokenize("GNGLL,,,,,,V,N", true).unwrap();
    /// assert_eq!(sentence.talker_id, TalkerId::COMBINED);
    /// assert_eq!(sentence.sentence_type, SentenceType::GLL);
    /// assert_eq!(sentence.fields.len(), 7);
    ///
    /// assert!(RawSentence::tokenize("GPGG", true).is_err());
    /// ```
    pub fn tokenize(payload: &'a str, checksum_valid: bool) -> Result<Self, Error<&'a str>> {
        let unrecognized = || Error::UnrecognizedMessage(payload);

        let address: IResult<&str, (&str, &str)> = (take(2u8), take(3u8)).parse(payload);
        let (data, (talker_id, sentence_type)) = address.map_err(|_| unrecognized())?;

        let talker_id = TalkerId::new(talker_id).ok_or_else(unrecognized)?;
        let sentence_type = SentenceType::new(sentence_type).ok_or_else(unrecognized)?;

        let fields = if data.is_empty() {
            Fields::default()
        } else {
            let data: IResult<&str, &str> = preceded(char(','), rest).parse(data);
            let (_, data) = data.map_err(|_| unrecognized())?;
            Fields::split(data)
        };

        Ok(Self {
            talker_id,
            sentence_type,
            fields,
            checksum_valid,
        })
    }
}
