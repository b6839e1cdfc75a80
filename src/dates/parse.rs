use chrono::{DateTime, FixedOffset, NaiveDate};

use super::format::Period;

/// Length of the `YYYY-MM-DDTHH:mm:ss.SSS` part that precedes the offset
const STAMP_LEN: usize = 23;
const SEPARATORS: [(usize, u8); 6] =
    [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':'), (19, b'.')];

/// Structured form of a raw record date, remembered even when parsing failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    value: Option<DateTime<FixedOffset>>,
}

impl ParsedDate {
    /// Parse `raw` against the fixed `YYYY-MM-DDTHH:mm:ss.SSSZ` format
    ///
    /// Never fails: anything that deviates from the format produces an
    /// invalid date instead.
    pub fn parse(raw: &str) -> Self {
        Self { value: parse_strict(raw) }
    }

    pub fn invalid() -> Self {
        Self { value: None }
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<DateTime<FixedOffset>> {
        self.value
    }

    /// Human-readable bucket label for `period`, e.g. `January 2017`
    pub fn label(&self, period: Period) -> Option<String> {
        self.value.map(|date| period.label(&date))
    }

    /// Path rendering for `period`, e.g. `2017/01`
    pub fn path(&self, period: Period) -> Option<String> {
        self.value.map(|date| period.path(&date))
    }
}

/// Strict fixed-width parse of `YYYY-MM-DDTHH:mm:ss.SSS` followed by an offset
///
/// The offset may be `Z`, `+HH:MM`, `+HHMM` or `+HH` (or the `-` forms).
/// Calendar and clock components must be in range.
pub fn parse_strict(raw: &str) -> Option<DateTime<FixedOffset>> {
    if !raw.is_ascii() || raw.len() <= STAMP_LEN {
        return None;
    }

    let (stamp, zone) = raw.split_at(STAMP_LEN);
    let bytes = stamp.as_bytes();

    for (index, separator) in SEPARATORS {
        if bytes[index] != separator {
            return None;
        }
    }

    let year = digits(bytes, 0, 4)?;
    let month = digits(bytes, 5, 2)?;
    let day = digits(bytes, 8, 2)?;
    let hour = digits(bytes, 11, 2)?;
    let minute = digits(bytes, 14, 2)?;
    let second = digits(bytes, 17, 2)?;
    let millis = digits(bytes, 20, 3)?;

    let offset = parse_offset(zone)?;
    let naive = NaiveDate::from_ymd_opt(year as i32, month, day)?
        .and_hms_milli_opt(hour, minute, second, millis)?;

    naive.and_local_timezone(offset).single()
}

fn parse_offset(zone: &str) -> Option<FixedOffset> {
    if zone == "Z" {
        return FixedOffset::east_opt(0);
    }

    let bytes = zone.as_bytes();
    let sign = match bytes.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };

    let (hours, minutes) = match bytes.len() {
        3 => (digits(bytes, 1, 2)?, 0),
        5 => (digits(bytes, 1, 2)?, digits(bytes, 3, 2)?),
        6 if bytes[3] == b':' => (digits(bytes, 1, 2)?, digits(bytes, 4, 2)?),
        _ => return None,
    };

    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
}

fn digits(bytes: &[u8], start: usize, len: usize) -> Option<u32> {
    bytes.get(start..start + len)?.iter().try_fold(0u32, |acc, byte| {
        byte.is_ascii_digit().then(|| acc * 10 + u32::from(byte - b'0'))
    })
}
