use chrono::{DateTime, Datelike, FixedOffset};

/// Calendar granularity of an archive bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Year,
    Month,
    Day,
}

impl Period {
    /// Coarsest first
    pub const ALL: [Period; 3] = [Period::Year, Period::Month, Period::Day];

    pub fn name(self) -> &'static str {
        match self {
            Period::Year => "years",
            Period::Month => "months",
            Period::Day => "days",
        }
    }

    /// Grouping label: `2017`, `January 2017`, `Sunday, 1st January 2017`
    pub fn label(self, date: &DateTime<FixedOffset>) -> String {
        match self {
            Period::Year => date.format("%Y").to_string(),
            Period::Month => date.format("%B %Y").to_string(),
            Period::Day => {
                format!("{}, {} {}", date.format("%A"), ordinal(date.day()), date.format("%B %Y"))
            }
        }
    }

    /// Page path: `2017`, `2017/01`, `2017/01/01`
    pub fn path(self, date: &DateTime<FixedOffset>) -> String {
        match self {
            Period::Year => date.format("%Y").to_string(),
            Period::Month => date.format("%Y/%m").to_string(),
            Period::Day => date.format("%Y/%m/%d").to_string(),
        }
    }
}

/// English ordinal for a day of the month: 1st, 2nd, 3rd, 4th, 11th, 22nd
fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}
