//! Canonical formatting for matched field values.
//!
//! Dates of birth become `MM/DD/YYYY` and phone numbers `DDD-DDD-DDDD`.
//! Values that cannot be normalized resolve to fixed sentinels instead of
//! errors. Everything else is only trimmed.

use std::sync::LazyLock;

use chrono::NaiveDate;
use intake_robot_models::{PatientField, PatientRecord};
use regex::Regex;

use crate::matcher::RawFields;

/// Date of birth substituted when none of the accepted formats parse.
pub const DOB_SENTINEL: &str = "01/01/1970";

/// Phone substituted when the raw value contains no digits.
pub const PHONE_SENTINEL: &str = "000-000-0000";

const MONTH: &str = r"(?P<month>1[0-2]|0[1-9]|[1-9])";
/// Also accepts a space-padded single digit (`" 4"`).
const DAY: &str = r"(?P<day>3[01]|[12][0-9]|0[1-9]|[1-9]| [1-9])";

/// Two-digit years below this map to 20xx, the rest to 19xx.
const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

static NON_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("valid regex"));

/// Accepted date of birth layouts.
///
/// Tried in declaration order; the first layout that yields a real
/// calendar date wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `MM/DD/YYYY`
    SlashFourDigitYear,
    /// `MM-DD-YYYY`
    DashFourDigitYear,
    /// `YYYY-MM-DD`
    Iso,
    /// `MM/DD/YY`
    SlashTwoDigitYear,
}

impl DateFormat {
    /// Every accepted layout, in resolution order.
    pub const ALL: [Self; 4] = [
        Self::SlashFourDigitYear,
        Self::DashFourDigitYear,
        Self::Iso,
        Self::SlashTwoDigitYear,
    ];

    fn regex(self) -> &'static Regex {
        static SLASH_YYYY: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(&format!(r"^{MONTH}/{DAY}/(?P<year>[0-9]{{4}})$")).expect("valid regex")
        });
        static DASH_YYYY: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(&format!(r"^{MONTH}-{DAY}-(?P<year>[0-9]{{4}})$")).expect("valid regex")
        });
        static ISO: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(&format!(r"^(?P<year>[0-9]{{4}})-{MONTH}-{DAY}$")).expect("valid regex")
        });
        static SLASH_YY: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(&format!(r"^{MONTH}/{DAY}/(?P<year>[0-9]{{2}})$")).expect("valid regex")
        });

        match self {
            Self::SlashFourDigitYear => &SLASH_YYYY,
            Self::DashFourDigitYear => &DASH_YYYY,
            Self::Iso => &ISO,
            Self::SlashTwoDigitYear => &SLASH_YY,
        }
    }

    /// Parses `value` if it is laid out in this format and names a real
    /// date.
    #[must_use]
    pub fn parse(self, value: &str) -> Option<NaiveDate> {
        let caps = self.regex().captures(value)?;
        let month: u32 = caps["month"].parse().ok()?;
        let day: u32 = caps["day"].trim_start().parse().ok()?;
        let mut year: i32 = caps["year"].parse().ok()?;

        if self == Self::SlashTwoDigitYear {
            year += if year < TWO_DIGIT_YEAR_PIVOT { 2000 } else { 1900 };
        } else if year < 1 {
            return None;
        }

        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Normalizes a date of birth to `MM/DD/YYYY`.
///
/// Returns [`DOB_SENTINEL`] for empty or unrecognized input.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    let cleaned = raw.trim();

    DateFormat::ALL
        .iter()
        .find_map(|format| format.parse(cleaned))
        .map_or_else(
            || {
                if !cleaned.is_empty() {
                    log::warn!("Unrecognized date of birth {cleaned:?}, using {DOB_SENTINEL}");
                }
                DOB_SENTINEL.to_owned()
            },
            |date| date.format("%m/%d/%Y").to_string(),
        )
}

/// Normalizes a phone number to `DDD-DDD-DDDD`.
///
/// Input with exactly ten digits is formatted; any other non-empty digit
/// run is returned bare. Returns [`PHONE_SENTINEL`] when there are no
/// digits at all.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let digits = NON_DIGIT_RE.replace_all(raw, "");
    let chars: Vec<char> = digits.chars().collect();

    match chars.len() {
        0 => PHONE_SENTINEL.to_owned(),
        10 => format!(
            "{}-{}-{}",
            chars[..3].iter().collect::<String>(),
            chars[3..6].iter().collect::<String>(),
            chars[6..].iter().collect::<String>()
        ),
        n => {
            log::warn!("Phone number has {n} digits, leaving unformatted");
            digits.into_owned()
        }
    }
}

/// Trims surrounding whitespace from an email address. No validation.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_owned()
}

/// Builds a normalized record from raw matches.
///
/// The returned record has `confidence` of `0.0`; see
/// [`crate::confidence::score`].
#[must_use]
pub fn normalize_record(raw: &RawFields) -> PatientRecord {
    let text = |field: PatientField| raw.get(field).trim().to_owned();

    PatientRecord {
        first_name: text(PatientField::FirstName),
        last_name: text(PatientField::LastName),
        dob: normalize_date(raw.get(PatientField::Dob)),
        phone: normalize_phone(raw.get(PatientField::Phone)),
        email: normalize_email(raw.get(PatientField::Email)),
        insurance: text(PatientField::Insurance),
        member_id: text(PatientField::MemberId),
        referring_physician: text(PatientField::ReferringPhysician),
        confidence: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_every_date_format() {
        assert_eq!(normalize_date("02/14/1990"), "02/14/1990");
        assert_eq!(normalize_date("02-14-1990"), "02/14/1990");
        assert_eq!(normalize_date("1990-02-14"), "02/14/1990");
        assert_eq!(normalize_date("02/14/90"), "02/14/1990");
    }

    #[test]
    fn accepts_single_digit_month_and_day() {
        assert_eq!(normalize_date("2/4/1990"), "02/04/1990");
        assert_eq!(normalize_date("1990-2-4"), "02/04/1990");
    }

    #[test]
    fn accepts_space_padded_day() {
        assert_eq!(normalize_date("02/ 4/1990"), "02/04/1990");
        assert_eq!(normalize_date("02- 4-1990"), "02/04/1990");
        assert_eq!(normalize_date("1990-02- 4"), "02/04/1990");
        assert_eq!(normalize_date("02/ 4/90"), "02/04/1990");
        assert_eq!(normalize_date("02/  4/1990"), DOB_SENTINEL);
        assert_eq!(normalize_date("02/ 14/1990"), DOB_SENTINEL);
    }

    #[test]
    fn two_digit_years_pivot_at_69() {
        assert_eq!(normalize_date("01/01/68"), "01/01/2068");
        assert_eq!(normalize_date("01/01/69"), "01/01/1969");
        assert_eq!(normalize_date("07/04/05"), "07/04/2005");
    }

    #[test]
    fn trims_before_parsing() {
        assert_eq!(normalize_date("  1990-02-14 \t"), "02/14/1990");
    }

    #[test]
    fn unparsable_dates_use_sentinel() {
        assert_eq!(normalize_date(""), DOB_SENTINEL);
        assert_eq!(normalize_date("   "), DOB_SENTINEL);
        assert_eq!(normalize_date("Feb 14 1990"), DOB_SENTINEL);
        assert_eq!(normalize_date("02/30/1990"), DOB_SENTINEL);
        assert_eq!(normalize_date("13/01/1990"), DOB_SENTINEL);
        assert_eq!(normalize_date("02/14/199"), DOB_SENTINEL);
        assert_eq!(normalize_date("02/14/19901"), DOB_SENTINEL);
        assert_eq!(normalize_date("00/00/0000"), DOB_SENTINEL);
        assert_eq!(normalize_date("01/01/0000"), DOB_SENTINEL);
    }

    #[test]
    fn leap_days_are_checked() {
        assert_eq!(normalize_date("02/29/2000"), "02/29/2000");
        assert_eq!(normalize_date("02/29/1900"), DOB_SENTINEL);
    }

    #[test]
    fn canonical_date_is_unchanged() {
        let once = normalize_date("1990-02-14");
        assert_eq!(normalize_date(&once), once);
        assert_eq!(normalize_date(DOB_SENTINEL), DOB_SENTINEL);
    }

    #[test]
    fn four_digit_year_format_takes_priority() {
        assert_eq!(
            DateFormat::SlashTwoDigitYear.parse("02/14/1990"),
            None,
            "two-digit year layout must not accept four digits"
        );
        assert_eq!(
            DateFormat::SlashFourDigitYear.parse("02/14/90"),
            None,
            "four-digit year layout must not accept two digits"
        );
    }

    #[test]
    fn formats_ten_digit_phone() {
        assert_eq!(normalize_phone("(555) 123-4567"), "555-123-4567");
        assert_eq!(normalize_phone("555.123.4567"), "555-123-4567");
        assert_eq!(normalize_phone("5551234567"), "555-123-4567");
    }

    #[test]
    fn other_lengths_stay_bare_digits() {
        assert_eq!(normalize_phone("12345"), "12345");
        assert_eq!(normalize_phone("+1 (555) 123-4567"), "15551234567");
    }

    #[test]
    fn no_digits_use_sentinel() {
        assert_eq!(normalize_phone(""), PHONE_SENTINEL);
        assert_eq!(normalize_phone("n/a"), PHONE_SENTINEL);
    }

    #[test]
    fn canonical_phone_is_unchanged() {
        assert_eq!(normalize_phone("555-123-4567"), "555-123-4567");
        assert_eq!(normalize_phone(PHONE_SENTINEL), PHONE_SENTINEL);
    }

    #[test]
    fn email_is_only_trimmed() {
        assert_eq!(normalize_email("  Jane.Doe@Example.com \n"), "Jane.Doe@Example.com");
        assert_eq!(normalize_email("not an email"), "not an email");
    }

    #[test]
    fn builds_record_from_raw_fields() {
        let mut raw = RawFields::default();
        raw.set(PatientField::FirstName, " Jane ");
        raw.set(PatientField::Dob, "1990-02-14");
        raw.set(PatientField::Phone, "(555) 123-4567");

        let record = normalize_record(&raw);

        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.last_name, "");
        assert_eq!(record.dob, "02/14/1990");
        assert_eq!(record.phone, "555-123-4567");
        assert_eq!(record.email, "");
    }

    #[test]
    fn missing_fields_normalize_to_sentinels() {
        let record = normalize_record(&RawFields::default());
        assert_eq!(record.dob, DOB_SENTINEL);
        assert_eq!(record.phone, PHONE_SENTINEL);
    }
}
