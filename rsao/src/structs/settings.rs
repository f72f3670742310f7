use crate::errors::{Error, Result};
use crate::structs::tools::parse_unsigned;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A value that can be read out of one settings field.
pub trait SettingsValue<'a>: Sized {
    fn from_field(text: &'a str) -> Option<Self>;
}

impl<'a> SettingsValue<'a> for &'a str {
    fn from_field(text: &'a str) -> Option<Self> {
        Some(text)
    }
}

macro_rules! unsigned_value {
    ($($t:ty),+) => {
        $(
            impl<'a> SettingsValue<'a> for $t {
                fn from_field(text: &'a str) -> Option<Self> {
                    parse_unsigned(text).and_then(|v| <$t>::try_from(v).ok())
                }
            }
        )+
    };
}

unsigned_value!(u8, u16, u32);

macro_rules! settings_fields {
    ($(($variant:ident, $method:ident, $start:literal..$end:literal, $ty:ty)),+ $(,)?) => {
        /// Fields of the time stamp and sounder settings group, by byte range.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SettingsField {
            $($variant,)+
        }

        impl SettingsField {
            pub const ALL: &'static [SettingsField] = &[$(SettingsField::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $(SettingsField::$variant => stringify!($method),)+
                }
            }

            pub fn range(self) -> Range<usize> {
                match self {
                    $(SettingsField::$variant => $start..$end,)+
                }
            }
        }

        impl SounderSettings {
            $(
                pub fn $method(&self) -> Result<$ty> {
                    self.get(SettingsField::$variant)
                }
            )+

            fn validate(&self) -> Result<()> {
                $(
                    if SettingsField::$variant.range().end <= self.block.len() {
                        self.$method()?;
                    }
                )+
                Ok(())
            }
        }
    };
}

settings_fields!(
    (VersionIndicator, version_indicator, 0..2, &str),
    (Year, year, 2..6, u16),
    (DayOfYear, day_of_year, 6..9, u16),
    (Month, month, 9..11, u8),
    (Day, day, 11..13, u8),
    (Hour, hour, 13..15, u8),
    (Minute, minute, 15..17, u8),
    (Second, second, 17..19, u8),
    (ReceiverStation, receiver_station, 19..22, &str),
    (TransmitterStation, transmitter_station, 22..25, &str),
    (Schedule, schedule, 25..26, u8),
    (Program, program, 26..27, u8),
    (StartFrequency, start_frequency, 27..32, &str),
    (CoarseFrequencyStep, coarse_frequency_step, 32..36, u16),
    (StopFrequency, stop_frequency, 36..41, &str),
    (FineFrequencyStep, fine_frequency_step, 41..45, &str),
    (MultiplexingDisabled, multiplexing_disabled, 45..46, u8),
    (SmallStepsPerScan, small_steps_per_scan, 46..47, &str),
    (PhaseCode, phase_code, 47..48, &str),
    (AlternativeAntenna, alternative_antenna, 48..49, u8),
    (AntennaOptions, antenna_options, 49..50, &str),
    (FftSamples, fft_samples, 50..51, u8),
    (RadioSilent, radio_silent, 51..52, u8),
    (PulseRepetitionRate, pulse_repetition_rate, 52..55, u16),
    (RangeStart, range_start, 55..59, u16),
    (RangeIncrement, range_increment, 59..60, &str),
    (NumberOfRanges, number_of_ranges, 60..64, u16),
    (ScanDelay, scan_delay, 64..68, u16),
    (BaseGain, base_gain, 68..69, &str),
    (FrequencySearch, frequency_search, 69..70, u8),
    (OperationMode, operation_mode, 70..71, u8),
    (ArtistEnabled, artist_enabled, 71..72, u8),
    (DataFormat, data_format, 72..73, u8),
    (Printer, printer, 73..74, u8),
    (IonogramThreshold, ionogram_threshold, 74..76, u8),
    (HighInterference, high_interference, 76..77, u8),
);

const TIMESTAMP_FIELDS: [SettingsField; 6] = [
    SettingsField::Year,
    SettingsField::Month,
    SettingsField::Day,
    SettingsField::Hour,
    SettingsField::Minute,
    SettingsField::Second,
];

/// Group 3 of a record. Fields are sliced out of the raw block on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SounderSettings {
    block: String,
    offset: usize,
}

impl SounderSettings {
    /// `offset` is the position of `block` in the decoded buffer.
    pub fn parse(block: &[u8], offset: usize) -> Result<Self> {
        if let Some(pos) = block.iter().position(|b| !b.is_ascii()) {
            return Err(Error::MalformedRecord {
                field: "block",
                offset: offset + pos,
                reason: format!("non-ASCII byte 0x{:02X}", block[pos]),
            });
        }
        let settings = SounderSettings {
            block: String::from_utf8_lossy(block).into_owned(),
            offset,
        };

        for field in TIMESTAMP_FIELDS {
            settings.text(field)?;
        }
        settings.validate()?;

        Ok(settings)
    }

    pub fn raw(&self) -> &str {
        &self.block
    }

    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    pub fn contains(&self, field: SettingsField) -> bool {
        field.range().end <= self.block.len()
    }

    /// Verbatim text of `field`.
    pub fn text(&self, field: SettingsField) -> Result<&str> {
        let range = field.range();
        self.block
            .get(range.clone())
            .ok_or_else(|| Error::MalformedRecord {
                field: field.name(),
                offset: self.offset + range.start,
                reason: format!(
                    "bytes {}..{} lie beyond the {}-byte block",
                    range.start,
                    range.end,
                    self.block.len()
                ),
            })
    }

    pub fn get<'a, T: SettingsValue<'a>>(&'a self, field: SettingsField) -> Result<T> {
        let text = self.text(field)?;
        T::from_field(text).ok_or_else(|| Error::MalformedRecord {
            field: field.name(),
            offset: self.offset + field.range().start,
            reason: format!("{:?} is not a valid value", text),
        })
    }

    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        let (year, month, day) = (self.year()?, self.month()?, self.day()?);
        let (hour, minute, second) = (self.hour()?, self.minute()?, self.second()?);

        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .and_then(|date| date.and_hms_opt(hour as u32, minute as u32, second as u32))
            .ok_or_else(|| Error::MalformedRecord {
                field: "timestamp",
                offset: self.offset + SettingsField::Year.range().start,
                reason: format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02} is not a calendar time",
                    year, month, day, hour, minute, second
                ),
            })
    }
}

impl std::fmt::Display for SounderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sounder settings ({} bytes):", self.block.len())?;
        for field in SettingsField::ALL {
            match self.text(*field) {
                Ok(text) => writeln!(f, "  {:<24} {}", field.name(), text)?,
                Err(_) => writeln!(f, "  {:<24} -", field.name())?,
            }
        }
        Ok(())
    }
}
