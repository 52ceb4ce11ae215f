use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::{format_description::FormatItem, macros::format_description, Date};

const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[day].[month].[year]");

/// Calendar date with no time component, carried over the wire as
/// `"DD.MM.YYYY"`. Stored as a plain SQL DATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct DayDate(pub Date);

impl fmt::Display for DayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(DAY_FORMAT) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl std::str::FromStr for DayDate {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, DAY_FORMAT).map(DayDate)
    }
}

impl Serialize for DayDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = self
            .0
            .format(DAY_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for DayDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_day_month_year() {
        let d: DayDate = "15.03.1990".parse().expect("valid date");
        assert_eq!(d.0, date!(1990 - 03 - 15));
    }

    #[test]
    fn rejects_iso_format() {
        assert!("1990-03-15".parse::<DayDate>().is_err());
    }

    #[test]
    fn rejects_out_of_range_day() {
        assert!("32.01.2000".parse::<DayDate>().is_err());
    }

    #[test]
    fn json_round_trip() {
        let d = DayDate(date!(2024 - 12 - 01));
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""01.12.2024""#);
        let back: DayDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn optional_field_accepts_null() {
        #[derive(Deserialize)]
        struct Holder {
            birthdate: Option<DayDate>,
        }
        let h: Holder = serde_json::from_str(r#"{"birthdate": null}"#).unwrap();
        assert!(h.birthdate.is_none());
    }
}
