//! # Sentence Processor
//!
//! Ties the pipeline together: framing and checksum validation, tokenizing, and dispatch to
//! the decoder registered for the sentence type.

use std::{collections::HashMap, fmt};

use log::{debug, trace};

use crate::{
    ChecksumMode, Error, Fields, LineEndingMode, RawSentence, SentenceType, TalkerId,
    nmea0183::{ADDRESS_LEN, frame},
};

/// Decodes the fields of one or more sentence types.
///
/// Decoders are registered with a [`SentenceProcessor`], which calls [`decode`](Self::decode)
/// for every valid sentence whose type appears in [`sentence_types`](Self::sentence_types).
/// Decoders report their results through events; `decode` returns nothing.
///
/// # Examples
///
/// ```rust
/// use nmea0183_gnss::{Decoder, Fields, SentenceProcessor, SentenceType, TalkerId};
///
/// struct TextLogger {
///     sentence_types: Vec<SentenceType>,
/// }
///
/// impl Decoder for TextLogger {
///     fn sentence_types(&self) -> &[SentenceType] {
///         &self.sentence_types
///     }
///
///     fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
///         if let Some(text) = fields.get(3) {
///             println!("{talker_id}: {text}");
///         }
///     }
/// }
///
/// let txt = SentenceType::new("TXT").unwrap();
///
/// let mut processor = SentenceProcessor::new();
/// processor.register_decoder(TextLogger {
///     sentence_types: vec![txt],
/// });
///
/// assert!(processor.is_registered(txt));
/// assert_eq!(processor.try_process("$GPTXT,01,01,02,ANTSTATUS=OK*3B"), Ok(txt));
/// ```
pub trait Decoder: Send {
    /// The sentence types this decoder handles.
    fn sentence_types(&self) -> &[SentenceType];

    /// Decodes the fields of a single sentence.
    ///
    /// Fields that are missing or malformed must be treated as absent values; a decoder
    /// never panics on sentence content.
    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>);
}

/// Validates NMEA 0183 lines and dispatches them to registered decoders.
///
/// Every line runs through the same steps, synchronously and on the caller's thread:
/// 1. framing and checksum validation,
/// 2. splitting into talker ID, sentence type and fields,
/// 3. lookup of the decoder registered for the sentence type,
/// 4. decoding, which raises the decoder's events before [`process`](Self::process) returns.
///
/// Lines failing any step are dropped without an event.
///
/// # Examples
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use nmea0183_gnss::{SentenceProcessor, nmea_content::GgaDecoder};
///
/// let positions = Arc::new(Mutex::new(Vec::new()));
///
/// let mut gga = GgaDecoder::new();
/// let sink = Arc::clone(&positions);
/// gga.on_position_received(move |position| sink.lock().unwrap().push(position.clone()));
///
/// let mut processor = SentenceProcessor::new();
/// processor.register_decoder(gga);
/// processor.process(
///     "$GNGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M,,*47",
/// );
///
/// let positions = positions.lock().unwrap();
/// assert_eq!(positions.len(), 1);
/// assert_eq!(positions[0].number_of_satellites_used, Some(12));
/// ```
#[derive(Default)]
pub struct SentenceProcessor {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
    decoders: Vec<Option<Box<dyn Decoder>>>,
    registry: HashMap<SentenceType, usize>,
}

impl SentenceProcessor {
    /// Creates a processor with the default configuration and no decoders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts configuring a processor.
    pub fn builder() -> SentenceProcessorBuilder {
        SentenceProcessorBuilder::new()
    }

    /// Registers `decoder` for every sentence type it declares.
    ///
    /// A later registration for the same type replaces the earlier one. A replaced decoder
    /// that no longer serves any type is dropped.
    pub fn register_decoder<D: Decoder + 'static>(&mut self, decoder: D) -> &mut Self {
        self.register_boxed(Box::new(decoder))
    }

    /// Registers an already boxed decoder, see [`register_decoder`](Self::register_decoder).
    pub fn register_boxed(&mut self, decoder: Box<dyn Decoder>) -> &mut Self {
        let sentence_types = decoder.sentence_types().to_vec();
        if sentence_types.is_empty() {
            debug!("ignoring decoder without sentence types");
            return self;
        }

        let slot = match self.decoders.iter().position(Option::is_none) {
            Some(slot) => {
                self.decoders[slot] = Some(decoder);
                slot
            }
            None => {
                self.decoders.push(Some(decoder));
                self.decoders.len() - 1
            }
        };

        for sentence_type in sentence_types {
            if let Some(previous) = self.registry.insert(sentence_type, slot)
                && previous != slot
            {
                debug!("replacing decoder for {sentence_type}");
                self.release_unused(previous);
            }
        }

        self
    }

    fn release_unused(&mut self, slot: usize) {
        if !self.registry.values().any(|&used| used == slot)
            && let Some(decoder) = self.decoders.get_mut(slot)
        {
            *decoder = None;
        }
    }

    /// Returns `true` if a decoder is registered for `sentence_type`.
    pub fn is_registered(&self, sentence_type: SentenceType) -> bool {
        self.registry.contains_key(&sentence_type)
    }

    /// The sentence types with a registered decoder, in alphabetical order.
    pub fn registered_types(&self) -> Vec<SentenceType> {
        let mut sentence_types: Vec<_> = self.registry.keys().copied().collect();
        sentence_types.sort_unstable();
        sentence_types
    }

    /// Processes one line.
    ///
    /// Invalid, checksum-failing and unsupported lines are dropped silently (they are
    /// logged at `debug`/`trace` level). Use [`try_process`](Self::try_process) to learn why a
    /// line was dropped.
    pub fn process(&mut self, line: &str) {
        match self.try_process(line) {
            Ok(_) => {}
            Err(e @ Error::UnsupportedSentence(_)) => trace!("ignoring {line:?}: {e}"),
            Err(e) => debug!("dropping {line:?}: {e}"),
        }
    }

    /// Processes one line, reporting why it was dropped.
    ///
    /// On success returns the type of the dispatched sentence; the decoder's events have
    /// been raised by the time this returns.
    ///
    /// ```rust
    /// use nmea0183_gnss::{Error, SentenceProcessor, SentenceType, nmea_content::GllDecoder};
    ///
    /// let mut processor = SentenceProcessor::new();
    /// processor.register_decoder(GllDecoder::new());
    ///
    /// assert_eq!(processor.try_process("$GNGLL,,,,,,V,N*7A"), Ok(SentenceType::GLL));
    /// assert_eq!(
    ///     processor.try_process("$GNGLL,,,,,,V,N*7B"),
    ///     Err(Error::ChecksumMismatch { expected: 0x7A, found: 0x7B })
    /// );
    /// assert_eq!(
    ///     processor.try_process("$GPZDA,123519,04,07,2025,,*43"),
    ///     Err(Error::UnsupportedSentence("ZDA"))
    /// );
    /// ```
    pub fn try_process<'a>(&mut self, line: &'a str) -> Result<SentenceType, Error<&'a str>> {
        let frame = frame(line, self.checksum_mode, self.line_ending_mode)?;
        let sentence = RawSentence::tokenize(frame.payload, frame.checksum.is_some())?;

        let decoder = self
            .registry
            .get(&sentence.sentence_type)
            .copied()
            .and_then(|slot| self.decoders.get_mut(slot))
            .and_then(Option::as_mut);

        let Some(decoder) = decoder else {
            let code = frame.payload.get(2..ADDRESS_LEN).unwrap_or(frame.payload);
            return Err(Error::UnsupportedSentence(code));
        };

        trace!(
            "dispatching {}{} with {} fields",
            sentence.talker_id,
            sentence.sentence_type,
            sentence.fields.len()
        );
        decoder.decode(sentence.talker_id, &sentence.fields);

        Ok(sentence.sentence_type)
    }

    /// Processes every line in `lines`, in order.
    pub fn process_all<'a, I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            self.process(line);
        }
    }
}

impl fmt::Debug for SentenceProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceProcessor")
            .field("checksum_mode", &self.checksum_mode)
            .field("line_ending_mode", &self.line_ending_mode)
            .field("registered_types", &self.registered_types())
            .finish()
    }
}

/// Configures a [`SentenceProcessor`].
///
/// ```rust
/// use nmea0183_gnss::{ChecksumMode, LineEndingMode, SentenceProcessor};
///
/// let processor = SentenceProcessor::builder()
///     .checksum_mode(ChecksumMode::Optional)
///     .line_ending_mode(LineEndingMode::Required)
///     .build();
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SentenceProcessorBuilder {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
}

impl SentenceProcessorBuilder {
    /// A builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether sentences must carry a checksum. Defaults to [`ChecksumMode::Required`].
    pub fn checksum_mode(mut self, checksum_mode: ChecksumMode) -> Self {
        self.checksum_mode = checksum_mode;
        self
    }

    /// Sets how a trailing `\r\n` is treated. Defaults to [`LineEndingMode::Optional`].
    pub fn line_ending_mode(mut self, line_ending_mode: LineEndingMode) -> Self {
        self.line_ending_mode = line_ending_mode;
        self
    }

    /// Creates the processor, without decoders.
    pub fn build(self) -> SentenceProcessor {
        SentenceProcessor {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
            ..SentenceProcessor::default()
        }
    }
}
