//! # NMEA 0183 GNSS
//!
//! A decoding pipeline for the NMEA 0183 sentences emitted by GNSS receivers, with the format:
//! `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! Lines are validated ([`validate_checksum`]), split into talker ID, sentence type and
//! fields ([`RawSentence`]), and dispatched to the [`Decoder`] registered for their type.
//! Decoders turn the fields into typed values and raise them through [`Event`]s:
//!
//! | Sentence | Decoder | Payload |
//! |---|---|---|
//! | GGA | [`GgaDecoder`](nmea_content::GgaDecoder) | [`GnssPositionInfo`](nmea_content::GnssPositionInfo) |
//! | GLL | [`GllDecoder`](nmea_content::GllDecoder) | [`GnssPositionInfo`](nmea_content::GnssPositionInfo) |
//! | RMC | [`RmcDecoder`](nmea_content::RmcDecoder) | [`GnssPositionInfo`](nmea_content::GnssPositionInfo) |
//! | GSA | [`GsaDecoder`](nmea_content::GsaDecoder) | [`ActiveSatellites`](nmea_content::ActiveSatellites) |
//! | VTG | [`VtgDecoder`](nmea_content::VtgDecoder) | [`CourseOverGround`](nmea_content::CourseOverGround) |
//! | GSV | [`GsvDecoder`](nmea_content::GsvDecoder) | [`SatellitesInView`](nmea_content::SatellitesInView) |
//! | ZDA | [`ZdaDecoder`](nmea_content::ZdaDecoder) | [`DateAndTime`](nmea_content::DateAndTime) |
//!
//! Invalid lines never produce an event and never stop the processing of the lines after
//! them. Fields that are blank or malformed decode as [`None`].
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::mpsc;
//!
//! use nmea0183_gnss::{
//!     SentenceProcessor,
//!     nmea_content::{GsaDecoder, RmcDecoder},
//! };
//!
//! let (tx, rx) = mpsc::channel();
//! let mut rmc = RmcDecoder::new();
//! rmc.position_course_and_time_received().forward_to(tx);
//!
//! let mut gsa = GsaDecoder::new();
//! gsa.on_active_satellites_received(|active| println!("{:?}", active.satellites_used));
//!
//! let mut processor = SentenceProcessor::new();
//! processor.register_decoder(rmc).register_decoder(gsa);
//!
//! processor.process("$GNRMC,001031.00,A,4404.13993,N,12118.86023,W,0.146,,100117,,,A*7B");
//! processor.process("$GPGSA,A,2,25,01,22,,,,,,,,,,2.56,2.36,1.00*02");
//!
//! let position = rx.try_recv().unwrap();
//! assert!(position.position_fix_valid);
//! assert_eq!(position.speed_knots, Some(0.146));
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every decoded value.

pub mod error;
mod event;
mod nmea0183;
pub mod nmea_content;
mod parse;
pub mod parsing;
mod processor;
mod sentence;

pub use error::{Error, IResult};
pub use event::Event;
pub use nmea0183::{
    ADDRESS_LEN, ChecksumMode, LineEndingMode, MIN_SENTENCE_LEN, checksum, validate_checksum,
};
pub use parse::FieldParse;
pub use processor::{Decoder, SentenceProcessor, SentenceProcessorBuilder};
pub use sentence::{Fields, RawSentence, SentenceType, TalkerId};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
