//! Serializable query predicates.
//!
//! A `Filter` names fields by their storage name and carries plain values,
//! so the same predicate can be evaluated by SQL adapters or in memory.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use uuid::Uuid;

/// Comparison operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Uuid(Uuid),
    Text(String),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        FilterValue::Uuid(value)
    }
}

impl FilterValue {
    /// JSON form as it appears in a serialized entity.
    pub fn to_json(&self) -> Json {
        match self {
            FilterValue::Null => Json::Null,
            FilterValue::Bool(b) => Json::Bool(*b),
            FilterValue::Int(i) => Json::from(*i),
            FilterValue::Float(f) => Json::from(*f),
            FilterValue::Uuid(u) => Json::String(u.to_string()),
            FilterValue::Text(s) => Json::String(s.clone()),
        }
    }
}

/// A predicate over one entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    /// Matches every record
    All,
    Eq { field: String, value: FilterValue },
    Ne { field: String, value: FilterValue },
    Gt { field: String, value: FilterValue },
    Gte { field: String, value: FilterValue },
    Lt { field: String, value: FilterValue },
    Lte { field: String, value: FilterValue },
    /// Substring match on a text field
    Contains { field: String, value: String },
    IsNull { field: String },
    And { filters: Vec<Filter> },
    Or { filters: Vec<Filter> },
    Not { filter: Box<Filter> },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Filter::Ne {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Filter::IsNull {
            field: field.into(),
        }
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And { filters }
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or { filters }
    }

    pub fn not(filter: Filter) -> Self {
        Filter::Not {
            filter: Box::new(filter),
        }
    }

    /// Evaluate against the serde JSON form of an entity.
    ///
    /// Missing fields compare as null.
    pub fn matches(&self, record: &Json) -> bool {
        let field_of = |field: &str| record.get(field).cloned().unwrap_or(Json::Null);

        match self {
            Filter::All => true,
            Filter::Eq { field, value } => json_eq(&field_of(field), &value.to_json()),
            Filter::Ne { field, value } => !json_eq(&field_of(field), &value.to_json()),
            Filter::Gt { field, value } => {
                compare(&field_of(field), &value.to_json()).is_some_and(|o| o.is_gt())
            }
            Filter::Gte { field, value } => {
                compare(&field_of(field), &value.to_json()).is_some_and(|o| o.is_ge())
            }
            Filter::Lt { field, value } => {
                compare(&field_of(field), &value.to_json()).is_some_and(|o| o.is_lt())
            }
            Filter::Lte { field, value } => {
                compare(&field_of(field), &value.to_json()).is_some_and(|o| o.is_le())
            }
            Filter::Contains { field, value } => field_of(field)
                .as_str()
                .is_some_and(|s| s.contains(value.as_str())),
            Filter::IsNull { field } => field_of(field).is_null(),
            Filter::And { filters } => filters.iter().all(|f| f.matches(record)),
            Filter::Or { filters } => filters.iter().any(|f| f.matches(record)),
            Filter::Not { filter } => !filter.matches(record),
        }
    }
}

fn json_eq(left: &Json, right: &Json) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

fn compare(left: &Json, right: &Json) -> Option<std::cmp::Ordering> {
    match (left, right) {
        (Json::Number(l), Json::Number(r)) => l.as_f64()?.partial_cmp(&r.as_f64()?),
        (Json::String(l), Json::String(r)) => Some(l.cmp(r)),
        (Json::Bool(l), Json::Bool(r)) => Some(l.cmp(r)),
        _ => None,
    }
}
