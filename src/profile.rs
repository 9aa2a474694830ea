use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::consts::{UNIT_CENTIMETERS, UNIT_FEET_INCHES, field};
use crate::{CalendarDate, Interests, prelude::*};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum Gender {
    #[default]
    #[display(fmt = "")]
    Unset,
    #[display(fmt = "male")]
    Male,
    #[display(fmt = "female")]
    Female,
}

impl Gender {
    /// Lenient parse of the wire value; anything unrecognised is `Unset`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unset,
        }
    }

    /// Wire value; `""` when unset.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Which height fields are authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum HeightUnit {
    #[default]
    #[display(fmt = "cm")]
    Centimeters,
    #[display(fmt = "ft")]
    FeetInches,
}

impl HeightUnit {
    /// Exact wire match; anything else falls back to centimeters.
    pub fn from_wire(value: &str) -> Self {
        match value {
            UNIT_FEET_INCHES => Self::FeetInches,
            _ => Self::Centimeters,
        }
    }

    /// Wire value, `"cm"` or `"ft"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Centimeters => UNIT_CENTIMETERS,
            Self::FeetInches => UNIT_FEET_INCHES,
        }
    }
}

/// Canonical profile as edited and submitted.
///
/// `height` is authoritative when `height_unit` is centimeters,
/// `height_feet` + `height_inches` otherwise. The other side may hold stale
/// values and is never displayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRecord {
    pub name: String,
    pub birthday: Option<CalendarDate>,
    /// Centimeters.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub interests: Interests,
    pub gender: Gender,
    /// Data URI or URL.
    pub profile_image: Option<String>,
    pub height_unit: HeightUnit,
    pub height_feet: f64,
    pub height_inches: f64,
}

impl ProfileRecord {
    /// Returns true if a name has been entered
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Nothing a visitor would see on the profile card has been filled in.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.birthday.is_none()
            && self.height == 0.0
            && self.weight == 0.0
    }

    /// Full outbound payload with the API's field names. Unset optional
    /// fields are sent as empty strings.
    pub fn to_payload(&self) -> Value {
        let birthday = self.birthday.map(|date| date.to_string());
        let image = self.profile_image.as_deref().unwrap_or_default();
        let fields = [
            (field::NAME, Value::from(self.name.as_str())),
            (field::BIRTHDAY, Value::from(birthday.unwrap_or_default())),
            (field::HEIGHT, Value::from(self.height)),
            (field::WEIGHT, Value::from(self.weight)),
            (field::INTERESTS, Value::from(self.interests.to_vec())),
            (field::GENDER, Value::from(self.gender.as_str())),
            (field::PROFILE_IMAGE, Value::from(image)),
            (field::HEIGHT_UNIT, Value::from(self.height_unit.as_str())),
            (field::HEIGHT_FEET, Value::from(self.height_feet)),
            (field::HEIGHT_INCHES, Value::from(self.height_inches)),
        ];
        let payload: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect();
        Value::Object(payload)
    }

    /// Payload safe to log: the image body is masked.
    pub fn to_log_payload(&self) -> Value {
        let mut payload = self.to_payload();
        if self.profile_image.is_some() {
            payload[field::PROFILE_IMAGE] = Value::from("***");
        }
        payload
    }
}

impl Serialize for ProfileRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_payload().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProfileRecord {
    /// Deserialization never fails on shape: it goes through [`normalize`].
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}

/// Coerces a loosely-typed profile payload into a [`ProfileRecord`].
///
/// Missing fields take their defaults; wrongly typed fields are coerced or
/// dropped to defaults. Never fails.
pub fn normalize(raw: &Value) -> ProfileRecord {
    let Some(map) = raw.as_object() else {
        tracing::debug!(
            kind = value_kind(raw),
            "profile payload is not an object, using defaults"
        );
        return ProfileRecord::default();
    };

    ProfileRecord {
        name: text(map, field::NAME),
        birthday: birthday(map),
        height: magnitude(map, field::HEIGHT),
        weight: magnitude(map, field::WEIGHT),
        interests: interests(map),
        gender: map
            .get(field::GENDER)
            .and_then(Value::as_str)
            .map(Gender::from_wire)
            .unwrap_or_default(),
        profile_image: map
            .get(field::PROFILE_IMAGE)
            .and_then(Value::as_str)
            .filter(|image| !image.is_empty())
            .map(str::to_owned),
        height_unit: map
            .get(field::HEIGHT_UNIT)
            .and_then(Value::as_str)
            .map(HeightUnit::from_wire)
            .unwrap_or_default(),
        height_feet: magnitude(map, field::HEIGHT_FEET),
        height_inches: magnitude(map, field::HEIGHT_INCHES),
    }
}

fn text(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            tracing::debug!(
                field = key,
                kind = value_kind(other),
                "dropping non-text value"
            );
            String::new()
        }
    }
}

fn birthday(map: &Map<String, Value>) -> Option<CalendarDate> {
    let raw = map.get(field::BIRTHDAY)?.as_str()?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::debug!(%err, "dropping unparseable birthday");
            None
        }
    }
}

/// Non-negative finite number. Numeric strings are parsed as decimals;
/// everything else, including negatives, becomes 0.
fn magnitude(map: &Map<String, Value>, key: &str) -> f64 {
    let parsed = match map.get(key) {
        None | Some(Value::Null) => return 0.0,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    let value = parsed.unwrap_or(f64::NAN);
    if value.is_finite() && value > 0.0 {
        return value;
    }
    if value != 0.0 {
        tracing::debug!(field = key, "coercing invalid magnitude to 0");
    }
    0.0
}

fn interests(map: &Map<String, Value>) -> Interests {
    match map.get(field::INTERESTS) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        None | Some(Value::Null) => Interests::new(),
        Some(other) => {
            tracing::debug!(
                kind = value_kind(other),
                "interests is not an array, using empty set"
            );
            Interests::new()
        }
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use serde_json::json;

    #[test]
    fn test_empty_object_yields_defaults() {
        let record = normalize(&json!({}));
        assert_eq!(record, ProfileRecord::default());
        assert_eq!(record.name, "");
        assert_eq!(record.birthday, None);
        assert_eq!(record.height, 0.0);
        assert_eq!(record.weight, 0.0);
        assert!(record.interests.is_empty());
        assert_eq!(record.gender, Gender::Unset);
        assert_eq!(record.profile_image, None);
        assert_eq!(record.height_unit, HeightUnit::Centimeters);
        assert_eq!(record.height_feet, 0.0);
        assert_eq!(record.height_inches, 0.0);
    }

    #[test]
    fn test_non_object_yields_defaults() {
        for raw in [json!(null), json!([1, 2]), json!("profile"), json!(42)] {
            assert_eq!(normalize(&raw), ProfileRecord::default(), "{raw}");
        }
    }

    #[test]
    fn test_full_payload() {
        let record = normalize(&json!({
            "name": "Ada",
            "birthday": "2000-06-15",
            "height": 175,
            "weight": 62.5,
            "interests": ["Music", "Art"],
            "gender": "female",
            "profileImage": "data:image/png;base64,AAAA",
            "heightUnit": "ft",
            "heightFeet": 5,
            "heightInches": 9,
        }));

        assert_eq!(record.name, "Ada");
        assert_eq!(record.birthday, Some(date(2000, 6, 15)));
        assert_eq!(record.height, 175.0);
        assert_eq!(record.weight, 62.5);
        assert_eq!(record.interests.as_slice(), ["Music", "Art"]);
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(
            record.profile_image.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert_eq!(record.height_unit, HeightUnit::FeetInches);
        assert_eq!(record.height_feet, 5.0);
        assert_eq!(record.height_inches, 9.0);
    }

    #[test]
    fn test_numeric_coercion() {
        struct TestCase {
            raw: Value,
            expected: f64,
            description: &'static str,
        }

        let cases = [
            TestCase {
                raw: json!("12.5"),
                expected: 12.5,
                description: "numeric string",
            },
            TestCase {
                raw: json!(" 80 "),
                expected: 80.0,
                description: "padded numeric string",
            },
            TestCase {
                raw: json!("abc"),
                expected: 0.0,
                description: "non-numeric string",
            },
            TestCase {
                raw: json!(""),
                expected: 0.0,
                description: "empty string",
            },
            TestCase {
                raw: json!("NaN"),
                expected: 0.0,
                description: "NaN string",
            },
            TestCase {
                raw: json!("inf"),
                expected: 0.0,
                description: "infinite string",
            },
            TestCase {
                raw: json!(-4),
                expected: 0.0,
                description: "negative number",
            },
            TestCase {
                raw: json!(true),
                expected: 0.0,
                description: "boolean",
            },
            TestCase {
                raw: json!([180]),
                expected: 0.0,
                description: "array",
            },
            TestCase {
                raw: json!(null),
                expected: 0.0,
                description: "null",
            },
            TestCase {
                raw: json!(172.25),
                expected: 172.25,
                description: "plain number",
            },
            TestCase {
                raw: json!(0),
                expected: 0.0,
                description: "zero",
            },
            TestCase {
                raw: json!(-0.0),
                expected: 0.0,
                description: "negative zero",
            },
            TestCase {
                raw: json!("0"),
                expected: 0.0,
                description: "zero string",
            },
            TestCase {
                raw: json!("-0"),
                expected: 0.0,
                description: "negative zero string",
            },
        ];

        for case in &cases {
            let record = normalize(&json!({ "height": case.raw }));
            assert_eq!(record.height, case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_zero_magnitudes_are_positive_zero() {
        for raw in [json!(-0.0), json!("-0"), json!("0"), json!(0)] {
            let record = normalize(&json!({ "weight": raw }));
            assert!(record.weight.is_sign_positive(), "{raw}");
            assert_eq!(record.to_payload()["weight"], json!(0.0), "{raw}");
        }
    }

    #[test]
    fn test_interest_coercion() {
        let scalar = normalize(&json!({ "interests": "Music" }));
        assert!(scalar.interests.is_empty());
        let object = normalize(&json!({ "interests": { "a": 1 } }));
        assert!(object.interests.is_empty());

        let record = normalize(&json!({ "interests": ["Music", 3, null, "Music", "Art"] }));
        assert_eq!(record.interests.as_slice(), ["Music", "Music", "Art"]);
    }

    #[test]
    fn test_text_and_enum_coercion() {
        let record = normalize(&json!({
            "name": 7,
            "gender": "MALE",
            "heightUnit": "inches",
            "profileImage": "",
            "birthday": "15/06/2000",
        }));
        assert_eq!(record.name, "7");
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.height_unit, HeightUnit::Centimeters);
        assert_eq!(record.profile_image, None);
        assert_eq!(record.birthday, None);

        let record = normalize(&json!({
            "name": ["Ada"],
            "gender": "other",
            "heightUnit": "FT",
        }));
        assert_eq!(record.name, "");
        assert_eq!(record.gender, Gender::Unset);
        assert_eq!(record.height_unit, HeightUnit::Centimeters);
    }

    #[test]
    fn test_payload_uses_api_field_names() {
        let payload = ProfileRecord::default().to_payload();
        assert_eq!(
            payload,
            json!({
                "name": "",
                "birthday": "",
                "height": 0.0,
                "weight": 0.0,
                "interests": [],
                "gender": "",
                "profileImage": "",
                "heightUnit": "cm",
                "heightFeet": 0.0,
                "heightInches": 0.0,
            })
        );
    }

    #[test]
    fn test_normalize_is_idempotent_through_payload() {
        let inputs = [
            json!({}),
            json!({ "height": "12.5", "weight": "abc" }),
            json!({ "interests": ["a", "a", 1] }),
            json!({
                "name": "Ada",
                "birthday": "2000-06-15T00:00:00Z",
                "gender": "Female",
                "profileImage": "https://example.com/a.png",
                "heightUnit": "ft",
                "heightFeet": "5",
                "heightInches": 9.5,
            }),
            json!("not an object"),
        ];

        for raw in &inputs {
            let once = normalize(raw);
            let twice = normalize(&once.to_payload());
            assert_eq!(twice, once, "{raw}");
        }
    }

    #[test]
    fn test_serde_goes_through_normalize() {
        let raw = r#"{"height":"180","interests":"none","heightUnit":"ft"}"#;
        let record: ProfileRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.height, 180.0);
        assert!(record.interests.is_empty());
        assert_eq!(record.height_unit, HeightUnit::FeetInches);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, record.to_payload());
    }

    #[test]
    fn test_log_payload_masks_image() {
        let record = ProfileRecord {
            profile_image: Some("data:image/png;base64,AAAA".to_owned()),
            ..ProfileRecord::default()
        };
        assert_eq!(record.to_log_payload()["profileImage"], json!("***"));
        let without_image = ProfileRecord::default().to_log_payload();
        assert_eq!(without_image["profileImage"], json!(""));
    }

    #[test]
    fn test_is_blank() {
        assert!(ProfileRecord::default().is_blank());
        let with_interest = normalize(&json!({ "interests": ["Art"] }));
        assert!(with_interest.is_blank());
        assert!(!normalize(&json!({ "weight": 60 })).is_blank());
        assert!(!normalize(&json!({ "birthday": "2000-01-01" })).is_blank());
    }
}
