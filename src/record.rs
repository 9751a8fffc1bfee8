/// GameSales Record Model
///
/// A Record is one row of the joined sales dataset. Attribute access from the
/// filter and aggregation layers goes through closed selector enums (`Field`,
/// `NumericField`) instead of string column names, so an unknown attribute
/// cannot be expressed.
///
/// Values read through a selector come back as a `FieldValue`, which has a
/// total order and can key sorted sets and maps.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Storage type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int64,
    Float64,
    String,
}

/// Every attribute of a `Record`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Rank,
    Title,
    CriticScore,
    UserScore,
    TotalShipped,
    Year,
    Platform,
    Publisher,
    Developer,
}

impl Field {
    /// All fields, in query column order.
    pub const ALL: [Field; 9] = [
        Field::Rank,
        Field::Title,
        Field::CriticScore,
        Field::UserScore,
        Field::TotalShipped,
        Field::Year,
        Field::Platform,
        Field::Publisher,
        Field::Developer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Rank => "rank",
            Field::Title => "title",
            Field::CriticScore => "critic_score",
            Field::UserScore => "user_score",
            Field::TotalShipped => "total_shipped",
            Field::Year => "year",
            Field::Platform => "platform",
            Field::Publisher => "publisher",
            Field::Developer => "developer",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Rank | Field::Year => FieldType::Int64,
            Field::CriticScore | Field::UserScore | Field::TotalShipped => FieldType::Float64,
            Field::Title | Field::Platform | Field::Publisher | Field::Developer => FieldType::String,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Field::CriticScore | Field::UserScore)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The numeric subset of `Field`, accepted by sum/mean/min/max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Rank,
    CriticScore,
    UserScore,
    TotalShipped,
    Year,
}

impl From<NumericField> for Field {
    fn from(field: NumericField) -> Self {
        match field {
            NumericField::Rank => Field::Rank,
            NumericField::CriticScore => Field::CriticScore,
            NumericField::UserScore => Field::UserScore,
            NumericField::TotalShipped => Field::TotalShipped,
            NumericField::Year => Field::Year,
        }
    }
}

/// A single attribute value read from a record.
///
/// Ordering is total: `Null` sorts first, numbers compare numerically across
/// `Int` and `Float`, strings sort lexicographically after all numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Int(_) | FieldValue::Float(_) => 1,
            FieldValue::String(_) => 2,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Float)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => normalize_zero(x).total_cmp(&normalize_zero(y)),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            // Int and Float that compare equal must hash equal.
            FieldValue::Int(v) => normalize_zero(*v as f64).to_bits().hash(state),
            FieldValue::Float(v) => normalize_zero(*v).to_bits().hash(state),
            FieldValue::String(v) => v.hash(state),
            FieldValue::Null => {}
        }
    }
}

fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => f.pad(&v.to_string()),
            FieldValue::Float(v) => f.pad(&v.to_string()),
            FieldValue::String(v) => f.pad(v),
            FieldValue::Null => f.pad("null"),
        }
    }
}

/// One row of the game × developer × platform × publisher join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub rank: i64,
    pub title: String,
    pub critic_score: Option<f64>,
    pub user_score: Option<f64>,
    /// Units shipped, in millions
    pub total_shipped: f64,
    pub year: i32,
    pub platform: String,
    pub publisher: String,
    pub developer: String,
}

impl Record {
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Rank => FieldValue::Int(self.rank),
            Field::Title => FieldValue::String(self.title.clone()),
            Field::CriticScore => self.critic_score.into(),
            Field::UserScore => self.user_score.into(),
            Field::TotalShipped => FieldValue::Float(self.total_shipped),
            Field::Year => FieldValue::Int(self.year as i64),
            Field::Platform => FieldValue::String(self.platform.clone()),
            Field::Publisher => FieldValue::String(self.publisher.clone()),
            Field::Developer => FieldValue::String(self.developer.clone()),
        }
    }

    /// Numeric attribute, or `None` when the attribute is null.
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Rank => Some(self.rank as f64),
            NumericField::CriticScore => self.critic_score,
            NumericField::UserScore => self.user_score,
            NumericField::TotalShipped => Some(self.total_shipped),
            NumericField::Year => Some(self.year as f64),
        }
    }

    /// Reject rows whose numeric attributes are not finite.
    pub fn validate(&self) -> Result<(), String> {
        if !self.total_shipped.is_finite() {
            return Err(format!(
                "Record {}: total_shipped must be finite, got {}",
                self.rank, self.total_shipped
            ));
        }
        for (field, score) in [
            (Field::CriticScore, self.critic_score),
            (Field::UserScore, self.user_score),
        ] {
            if let Some(v) = score {
                if !v.is_finite() {
                    return Err(format!("Record {}: {} must be finite, got {}", self.rank, field, v));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    fn sample() -> Record {
        Record {
            rank: 7,
            title: "Metroid".to_string(),
            critic_score: Some(9.1),
            user_score: None,
            total_shipped: 2.5,
            year: 1986,
            platform: "NES".to_string(),
            publisher: "Nintendo".to_string(),
            developer: "Nintendo R&D1".to_string(),
        }
    }

    #[test]
    fn test_get_every_field() {
        let r = sample();
        assert_eq!(r.get(Field::Rank), FieldValue::Int(7));
        assert_eq!(r.get(Field::Title).as_str(), Some("Metroid"));
        assert_eq!(r.get(Field::CriticScore).as_f64(), Some(9.1));
        assert!(r.get(Field::UserScore).is_null());
        assert_eq!(r.get(Field::TotalShipped).as_f64(), Some(2.5));
        assert_eq!(r.get(Field::Year).as_i64(), Some(1986));
        assert_eq!(r.get(Field::Platform).as_str(), Some("NES"));
        assert_eq!(r.get(Field::Publisher).as_str(), Some("Nintendo"));
        assert_eq!(r.get(Field::Developer).as_str(), Some("Nintendo R&D1"));
    }

    #[test]
    fn test_field_types_match_values() {
        let r = sample();
        for field in Field::ALL {
            let value = r.get(field);
            match field.field_type() {
                FieldType::Int64 => assert!(value.as_i64().is_some(), "{}", field),
                FieldType::Float64 => assert!(value.is_null() || value.as_f64().is_some(), "{}", field),
                FieldType::String => assert!(value.as_str().is_some(), "{}", field),
            }
            if value.is_null() {
                assert!(field.is_nullable(), "{} returned null", field);
            }
        }
    }

    #[test]
    fn test_numeric_matches_get() {
        let r = sample();
        for field in [
            NumericField::Rank,
            NumericField::CriticScore,
            NumericField::UserScore,
            NumericField::TotalShipped,
            NumericField::Year,
        ] {
            assert_eq!(r.numeric(field), r.get(field.into()).as_f64());
        }
    }

    #[test]
    fn test_value_ordering() {
        let mut values = vec![
            FieldValue::from("b"),
            FieldValue::Float(2.5),
            FieldValue::Null,
            FieldValue::Int(3),
            FieldValue::from("a"),
            FieldValue::Int(-1),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Int(-1),
                FieldValue::Float(2.5),
                FieldValue::Int(3),
                FieldValue::from("a"),
                FieldValue::from("b"),
            ]
        );
    }

    #[test]
    fn test_int_and_float_equal_values_collapse() {
        assert_eq!(FieldValue::Int(80), FieldValue::Float(80.0));
        assert_eq!(FieldValue::Float(0.0), FieldValue::Float(-0.0));

        let hashed: HashSet<FieldValue> = [FieldValue::Int(80), FieldValue::Float(80.0)].into_iter().collect();
        assert_eq!(hashed.len(), 1);

        let sorted: BTreeSet<FieldValue> = [FieldValue::Float(80.0), FieldValue::Int(80)].into_iter().collect();
        assert_eq!(sorted.len(), 1);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(sample().validate().is_ok());

        let mut bad = sample();
        bad.total_shipped = f64::NAN;
        assert!(bad.validate().unwrap_err().contains("total_shipped"));

        let mut bad = sample();
        bad.user_score = Some(f64::INFINITY);
        assert!(bad.validate().unwrap_err().contains("user_score"));
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["title"], "Metroid");
        assert!(json["user_score"].is_null());

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());

        let unknown = r#"{"rank":1,"title":"x","critic_score":null,"user_score":null,
            "total_shipped":1.0,"year":2000,"platform":"p","publisher":"p","developer":"d","genre":"rpg"}"#;
        assert!(serde_json::from_str::<Record>(unknown).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Float(80.0).to_string(), "80");
        assert_eq!(FieldValue::Float(8.5).to_string(), "8.5");
        assert_eq!(FieldValue::Int(2001).to_string(), "2001");
        assert_eq!(FieldValue::from("PS2").to_string(), "PS2");
        assert_eq!(Field::TotalShipped.to_string(), "total_shipped");
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("{:<4}|", FieldValue::from("DS")), "DS  |");
        assert_eq!(format!("{:>6}", FieldValue::Int(2001)), "  2001");
        assert_eq!(format!("{:>4}", FieldValue::Float(8.5)), " 8.5");
        assert_eq!(format!("{:-^6}", FieldValue::Null), "-null-");
    }
}
