#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Decoder, Event, Fields, SentenceType, TalkerId,
    nmea_content::parse::{date_full_year, utc_offset},
};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// Not registered by default; add a [`ZdaDecoder`] to the processor to receive it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateAndTime {
    /// Source of the sentence
    pub talker_id: TalkerId,
    /// UTC time
    pub time: Option<time::Time>,
    /// UTC date
    pub date: Option<time::Date>,
    /// Local time zone offset from UTC
    pub utc_offset: Option<time::UtcOffset>,
}

impl DateAndTime {
    /// The UTC timestamp, if both date and time are present.
    pub fn utc_date_time(&self) -> Option<time::OffsetDateTime> {
        Some(self.date?.with_time(self.time?).assume_utc())
    }
}

/// Decodes ZDA sentences into [`DateAndTime`].
#[derive(Debug, Default)]
pub struct ZdaDecoder {
    date_and_time_received: Event<DateAndTime>,
}

impl ZdaDecoder {
    /// Creates a decoder with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every decoded ZDA sentence.
    pub fn on_date_and_time_received<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&DateAndTime) + Send + 'static,
    {
        self.date_and_time_received.subscribe(handler);
        self
    }

    /// The event raised for every decoded ZDA sentence.
    pub fn date_and_time_received(&mut self) -> &mut Event<DateAndTime> {
        &mut self.date_and_time_received
    }

    /// Decodes the fields of a ZDA sentence.
    pub fn parse(talker_id: TalkerId, fields: &Fields<'_>) -> DateAndTime {
        DateAndTime {
            talker_id,
            time: fields.parse(0),
            date: date_full_year(fields, 1),
            utc_offset: utc_offset(fields, 4),
        }
    }
}

impl Decoder for ZdaDecoder {
    fn sentence_types(&self) -> &[SentenceType] {
        &[SentenceType::ZDA]
    }

    fn decode(&mut self, talker_id: TalkerId, fields: &Fields<'_>) {
        let date_and_time = Self::parse(talker_id, fields);
        self.date_and_time_received.raise(&date_and_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zda_parsing() {
        let zda = ZdaDecoder::parse(TalkerId::GPS, &Fields::split("160012.71,11,03,2004,-1,00"));

        assert_eq!(zda.time, time::Time::from_hms_milli(16, 0, 12, 710).ok());
        assert_eq!(
            zda.date,
            time::Date::from_calendar_date(2004, time::Month::March, 11).ok()
        );
        assert_eq!(zda.utc_offset, time::UtcOffset::from_hms(-1, 0, 0).ok());
        assert_eq!(
            zda.utc_date_time().map(|timestamp| timestamp.unix_timestamp()),
            Some(1_079_020_812)
        );
    }

    #[test]
    fn test_zda_missing_parts() {
        let zda = ZdaDecoder::parse(TalkerId::GPS, &Fields::split("123519,04,07,2025,,"));
        assert_eq!(zda.utc_offset, None);
        assert!(zda.date.is_some());

        let zda = ZdaDecoder::parse(TalkerId::GPS, &Fields::split("123519,04,,2025,00,00"));
        assert_eq!(zda.date, None);
        assert_eq!(zda.utc_date_time(), None);
        assert_eq!(zda.utc_offset, Some(time::UtcOffset::UTC));

        let zda = ZdaDecoder::parse(TalkerId::GPS, &Fields::split(""));
        assert_eq!(zda.time, None);
        assert_eq!(zda.date, None);
        assert_eq!(zda.utc_offset, None);
    }
}
