//! Display strings for a profile. All output is locale-independent.

use serde::Serialize;

use crate::{CalendarDate, DISPLAY_SEPARATOR, HeightUnit, ProfileRecord, ZodiacSign};

/// Whole years from `birthday` to `today`; `None` when no birthday is set.
pub fn format_age(birthday: Option<&CalendarDate>, today: &CalendarDate) -> Option<i32> {
    birthday.map(|birthday| birthday.whole_years_until(today))
}

/// `DD/MM/YYYY`, or `None` when no birthday is set.
pub fn format_birthday(birthday: Option<&CalendarDate>) -> Option<String> {
    birthday.map(|date| {
        format!(
            "{:02}{sep}{:02}{sep}{:04}",
            date.day(),
            date.month(),
            date.year(),
            sep = DISPLAY_SEPARATOR
        )
    })
}

/// Height in the record's own unit, or `""` when no height was entered in
/// either unit.
pub fn format_height(record: &ProfileRecord) -> String {
    if record.height == 0.0 && record.height_feet == 0.0 && record.height_inches == 0.0 {
        return String::new();
    }

    match record.height_unit {
        HeightUnit::FeetInches => {
            format!("{} ft {:.2} in", record.height_feet, record.height_inches)
        }
        HeightUnit::Centimeters => format!("{:.2} cm", record.height),
    }
}

/// Kilograms to two decimals, or `""` when no weight was entered.
pub fn format_weight(weight: f64) -> String {
    if weight == 0.0 {
        return String::new();
    }
    format!("{weight:.2} kg")
}

/// Every derived display value for one profile, computed in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub age: Option<i32>,
    pub birthday: Option<String>,
    pub sign: Option<ZodiacSign>,
    /// `"♊ Gemini"`
    pub zodiac: Option<String>,
    /// `"👯 Twins"`
    pub creature: Option<String>,
    pub height: String,
    pub weight: String,
}

impl ProfileSummary {
    pub fn of(record: &ProfileRecord, today: CalendarDate) -> Self {
        let birthday = record.birthday.as_ref();
        let sign = birthday.map(ZodiacSign::for_date);

        Self {
            age: format_age(birthday, &today),
            birthday: format_birthday(birthday),
            sign,
            zodiac: sign.map(ZodiacSign::label),
            creature: sign.map(ZodiacSign::creature_label),
            height: format_height(record),
            weight: format_weight(record.weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_age_one_day_before_birthday() {
        let birthday = date(2000, 6, 15);
        assert_eq!(format_age(Some(&birthday), &date(2024, 6, 14)), Some(23));
        assert_eq!(format_age(Some(&birthday), &date(2024, 6, 15)), Some(24));
    }

    #[test]
    fn test_age_earlier_month() {
        let birthday = date(2000, 12, 1);
        assert_eq!(format_age(Some(&birthday), &date(2024, 11, 30)), Some(23));
        assert_eq!(format_age(Some(&birthday), &date(2025, 1, 1)), Some(24));
    }

    #[test]
    fn test_age_unset() {
        assert_eq!(format_age(None, &date(2024, 6, 15)), None);
    }

    #[test]
    fn test_birthday_is_zero_padded() {
        assert_eq!(
            format_birthday(Some(&date(2000, 6, 5))).as_deref(),
            Some("05/06/2000")
        );
        assert_eq!(
            format_birthday(Some(&date(1999, 12, 31))).as_deref(),
            Some("31/12/1999")
        );
        assert_eq!(format_birthday(None), None);
    }

    #[test]
    fn test_height_cases() {
        struct TestCase {
            record: ProfileRecord,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                record: ProfileRecord {
                    height: 175.0,
                    ..ProfileRecord::default()
                },
                expected: "175.00 cm",
            },
            TestCase {
                record: ProfileRecord {
                    height_unit: HeightUnit::FeetInches,
                    height_feet: 5.0,
                    height_inches: 9.0,
                    ..ProfileRecord::default()
                },
                expected: "5 ft 9.00 in",
            },
            TestCase {
                record: ProfileRecord::default(),
                expected: "",
            },
            TestCase {
                record: ProfileRecord {
                    height_unit: HeightUnit::FeetInches,
                    height: 180.0,
                    ..ProfileRecord::default()
                },
                expected: "0 ft 0.00 in",
            },
            TestCase {
                record: ProfileRecord {
                    height_feet: 6.0,
                    ..ProfileRecord::default()
                },
                expected: "0.00 cm",
            },
            TestCase {
                record: ProfileRecord {
                    height: 172.5,
                    ..ProfileRecord::default()
                },
                expected: "172.50 cm",
            },
        ];

        for case in &cases {
            let height = format_height(&case.record);
            assert_eq!(height, case.expected, "{:?}", case.record);
        }
    }

    #[test]
    fn test_weight() {
        assert_eq!(format_weight(62.5), "62.50 kg");
        assert_eq!(format_weight(70.0), "70.00 kg");
        assert_eq!(format_weight(0.0), "");
    }

    #[test]
    fn test_summary_of_full_record() {
        let record = ProfileRecord {
            name: "Ada".to_owned(),
            birthday: Some(date(2000, 6, 15)),
            height: 175.0,
            weight: 62.5,
            ..ProfileRecord::default()
        };

        let summary = ProfileSummary::of(&record, date(2024, 6, 15));
        assert_eq!(summary.age, Some(24));
        assert_eq!(summary.birthday.as_deref(), Some("15/06/2000"));
        assert_eq!(summary.sign, Some(ZodiacSign::Gemini));
        assert_eq!(summary.zodiac.as_deref(), Some("♊ Gemini"));
        assert_eq!(summary.creature.as_deref(), Some("👯 Twins"));
        assert_eq!(summary.height, "175.00 cm");
        assert_eq!(summary.weight, "62.50 kg");
    }

    #[test]
    fn test_summary_of_blank_record() {
        let summary = ProfileSummary::of(&ProfileRecord::default(), date(2024, 6, 15));
        assert_eq!(summary, ProfileSummary::default());
    }
}
