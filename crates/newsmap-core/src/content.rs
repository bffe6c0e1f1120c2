//! Content item model.
//!
//! Articles and videos are opaque to newsmap: they only expose named attributes
//! which the sitemap feeds read through [`ContentItem`]. Collections of items are
//! served through [`Collection`], which lets a feed slice a page out of its source
//! without knowing where the items live.

use std::{fmt, ops::Range, path::Path};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// A single attribute value exposed by a content item.
///
/// Strings always decode as [`AttrValue::Text`], so `"10:30"` stays a headline.
/// Time fields are read with [`AttrValue::into_timestamp`], which is the only
/// place text is turned into a date or time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Timestamp carrying its own UTC offset.
    #[serde(skip_deserializing)]
    DateTime(DateTime<FixedOffset>),
    /// Timestamp without an offset; rendered with the publication timezone.
    #[serde(skip_deserializing)]
    LocalDateTime(NaiveDateTime),
    #[serde(skip_deserializing)]
    Date(NaiveDate),
    #[serde(skip_deserializing)]
    Time(NaiveTime),
    Text(String),
    List(Vec<String>),
}

impl AttrValue {
    /// Convert a JSON value. Null and shapes with no attribute form (objects,
    /// arrays holding non-strings) give `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            Value::Object(_) => None,
        }
    }

    /// JSON form of the value. Dates and times become their display string.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Float(x) => Value::from(*x),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::from(items.clone()),
            other => Value::String(other.to_string()),
        }
    }

    /// Read text as a timestamp when it parses as RFC 3339, a naive date-time
    /// or a date. Anything else, including unparseable text, passes through.
    #[must_use]
    pub fn into_timestamp(self) -> Self {
        let Self::Text(text) = &self else {
            return self;
        };
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            Self::DateTime(dt)
        } else if let Ok(dt) = text.parse::<NaiveDateTime>() {
            Self::LocalDateTime(dt)
        } else if let Ok(d) = text.parse::<NaiveDate>() {
            Self::Date(d)
        } else {
            self
        }
    }

    /// Drop sub-second precision from time values. Other values pass through.
    #[must_use]
    pub fn truncate_subsecs(self) -> Self {
        match self {
            Self::DateTime(dt) => Self::DateTime(dt.trunc_subsecs(0)),
            Self::LocalDateTime(dt) => Self::LocalDateTime(dt.trunc_subsecs(0)),
            Self::Time(t) => Self::Time(t.trunc_subsecs(0)),
            other => other,
        }
    }

    /// Flatten the value into a list of strings.
    ///
    /// Lists are returned as-is, text is split on commas, anything else becomes a
    /// single element.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f%:z")),
            Self::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<FixedOffset>> for AttrValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDateTime> for AttrValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::LocalDateTime(value)
    }
}

impl From<NaiveDate> for AttrValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for AttrValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

/// Anything that can be listed in a sitemap.
pub trait ContentItem {
    /// Look up an attribute by name. `None` means the item does not expose it.
    fn attribute(&self, name: &str) -> Option<AttrValue>;
}

/// A content item backed by a JSON object, as loaded from a feed source.
///
/// Attributes are converted on lookup. A `null` attribute is treated the same
/// as a missing one, and attributes with no [`AttrValue`] form are ignored until
/// asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    attributes: Map<String, Value>,
}

impl Item {
    /// Create an item with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.insert(name.into(), value.into().to_json());
    }
}

impl ContentItem for Item {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        let raw = self.attributes.get(name)?;
        let value = AttrValue::from_json(raw);
        if value.is_none() && !raw.is_null() {
            tracing::debug!(attribute = name, "unsupported attribute shape, treated as absent");
        }
        value
    }
}

/// An ordered source of content items that can be sliced into pages.
///
/// Implementations must keep a stable order between calls so that page N always
/// yields the same slice while the underlying data is unchanged.
pub trait Collection: Send + Sync {
    /// Item type produced by this collection.
    type Item: ContentItem;

    /// Total number of items.
    fn count(&self) -> usize;

    /// Fetch the items in `range`. Out-of-bounds ranges yield what is available.
    fn fetch(&self, range: Range<usize>) -> Vec<Self::Item>;
}

impl<T> Collection for Vec<T>
where
    T: ContentItem + Clone + Send + Sync,
{
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn fetch(&self, range: Range<usize>) -> Vec<T> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self[start..end].to_vec()
    }
}

/// Load a JSON array of items from a file.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    if !path.exists() {
        return Err(CoreError::source(path, "source file not found"));
    }

    let content = std::fs::read_to_string(path)?;
    let items: Vec<Item> =
        serde_json::from_str(&content).map_err(|e| CoreError::source(path, e.to_string()))?;

    tracing::debug!(path = %path.display(), count = items.len(), "loaded content items");
    Ok(items)
}
