//! Records and options for the Columnist tools.
//!
//! Field names serialize in snake_case. Deserialization also takes the
//! camelCase spellings some servers emit (`userId`, `insertedIds`), and query
//! results may arrive either as a page object or as a bare array of rows.
//!
//! Rows of tables other than `messages` can be read with any
//! `DeserializeOwned` row type, e.g. `QueryResult<serde_json::Value>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de, de::DeserializeOwned};
use serde_json::{Map, Value};

// =============================================================================
// Records
// =============================================================================

/// A message row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier.
    pub id: String,
    /// Message body.
    pub content: String,
    /// Owning user.
    #[serde(alias = "userId")]
    pub user_id: String,
    /// When the message was written.
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Columns beyond the message schema, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// A message stamped with the current time and no metadata.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            metadata: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Rows returned by `columnist_query` and `columnist_search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<R = Message> {
    pub data: Vec<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl<R> QueryResult<R> {
    /// A result made of bare rows, with no paging fields.
    pub fn from_rows(data: Vec<R>) -> Self {
        Self {
            data,
            total: None,
            limit: None,
            offset: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Deserialize)]
struct Page<R> {
    data: Vec<R>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    offset: Option<u64>,
}

// Branch on the JSON shape first so a bad row reports its own error.
impl<'de, R: DeserializeOwned> Deserialize<'de> for QueryResult<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            rows @ Value::Array(_) => serde_json::from_value::<Vec<R>>(rows)
                .map(Self::from_rows)
                .map_err(de::Error::custom),
            page @ Value::Object(_) => {
                let page: Page<R> = serde_json::from_value(page).map_err(de::Error::custom)?;
                Ok(Self {
                    data: page.data,
                    total: page.total,
                    limit: page.limit,
                    offset: page.offset,
                })
            }
            other => Err(de::Error::custom(format!(
                "expected a page object or an array of rows, got {other}"
            ))),
        }
    }
}

/// Outcome of `columnist_insert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResult {
    pub success: bool,
    #[serde(default, alias = "insertedIds")]
    pub inserted_ids: Vec<String>,
}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort order, sent as `{"field": ..., "direction": "asc"|"desc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Keyword options for `columnist_query`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryOptions {
    /// Filter conditions, sent as `where`.
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Additional arguments passed through verbatim. Later keys win.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition to `where`.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions
            .get_or_insert_with(Map::new)
            .insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Keyword options for `columnist_search`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters
            .get_or_insert_with(Map::new)
            .insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
