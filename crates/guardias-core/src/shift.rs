use crate::error::{GuardiasError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format accepted from users and written to the store file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used in rendered reports.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Days covered by one shift, start and end inclusive.
pub const SHIFT_DAYS: i64 = 7;

/// Parse `YYYY-MM-DD`, trimming surrounding whitespace.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| GuardiasError::InvalidDateFormat(text.to_string()))
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];
    NAMES.get(month.checked_sub(1)? as usize).copied()
}

// ---------------------------------------------------------------------------
// KeyStyle
// ---------------------------------------------------------------------------

/// How shifts are grouped in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyStyle {
    /// The literal start date, `2024-12-25`.
    #[default]
    Date,
    /// The ISO year and week of the start date, `2024-W52`.
    IsoWeek,
}

impl KeyStyle {
    pub fn key_for(self, date: NaiveDate) -> String {
        match self {
            KeyStyle::Date => date.format(DATE_FORMAT).to_string(),
            KeyStyle::IsoWeek => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
        }
    }
}

impl fmt::Display for KeyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyStyle::Date => "date",
            KeyStyle::IsoWeek => "iso-week",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

/// One person's seven-day guard duty. The end date is always derived from
/// the start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ShiftRecord", into = "ShiftRecord")]
pub struct Shift {
    person: String,
    start_date: NaiveDate,
}

impl Shift {
    pub fn new(person: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            person: person.into(),
            start_date,
        }
    }

    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Saturates at `NaiveDate::MAX`; stored and registered shifts always
    /// have a representable end.
    pub fn end_date(&self) -> NaiveDate {
        end_of_week(self.start_date).unwrap_or(NaiveDate::MAX)
    }

    /// Month filing: a shift belongs to the month its start date falls in.
    pub fn starts_in(&self, year: i32, month: u32) -> bool {
        self.start_date.year() == year && self.start_date.month() == month
    }

    /// `count` consecutive weekly shifts for `person`, the first starting on
    /// `start`. Stops early at the last week whose end is representable.
    pub fn weekly(person: &str, start: NaiveDate, count: u32) -> Vec<Shift> {
        (0..i64::from(count))
            .map_while(|i| start.checked_add_signed(Duration::weeks(i)))
            .take_while(|week_start| end_of_week(*week_start).is_some())
            .map(|week_start| Shift::new(person, week_start))
            .collect()
    }
}

fn end_of_week(start: NaiveDate) -> Option<NaiveDate> {
    start.checked_add_signed(Duration::days(SHIFT_DAYS - 1))
}

// ---------------------------------------------------------------------------
// Wire record
// ---------------------------------------------------------------------------

/// On-disk and API shape of a shift. `end_date` is written for readers of
/// the file but ignored when reading back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRecord {
    #[serde(alias = "nombre")]
    pub person: String,
    #[serde(alias = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(default, alias = "fecha_fin")]
    pub end_date: Option<NaiveDate>,
}

impl TryFrom<ShiftRecord> for Shift {
    type Error = GuardiasError;

    fn try_from(record: ShiftRecord) -> Result<Self> {
        if end_of_week(record.start_date).is_none() {
            return Err(GuardiasError::DateOutOfRange(record.start_date));
        }
        Ok(Shift::new(record.person, record.start_date))
    }
}

impl From<Shift> for ShiftRecord {
    fn from(shift: Shift) -> Self {
        let end_date = Some(shift.end_date());
        ShiftRecord {
            person: shift.person,
            start_date: shift.start_date,
            end_date,
        }
    }
}
