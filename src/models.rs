use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub expiry: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Expired,
    Soon,
    Ok,
}

impl StatusCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Soon => "soon",
            Self::Ok => "ok",
        }
    }
}

/// Freshness of an item relative to "now". Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub category: StatusCategory,
    pub label: String,
    pub days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Expired,
    Soon,
    Ok,
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 4] = [Self::All, Self::Expired, Self::Soon, Self::Ok];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Expired => "expired",
            Self::Soon => "soon",
            Self::Ok => "ok",
        }
    }

    pub fn matches(self, category: StatusCategory) -> bool {
        match self {
            Self::All => true,
            Self::Expired => category == StatusCategory::Expired,
            Self::Soon => category == StatusCategory::Soon,
            Self::Ok => category == StatusCategory::Ok,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl fmt::Display for UnknownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status filter '{}'", self.0)
    }
}

impl std::error::Error for UnknownFilter {}

impl TryFrom<String> for StatusFilter {
    type Error = UnknownFilter;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "expired" => Ok(Self::Expired),
            "soon" => Ok(Self::Soon),
            "ok" => Ok(Self::Ok),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: StatusFilter,
}

impl ListQuery {
    /// `?q=..&status=..` for the non-default parts, or an empty string.
    pub fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        if !self.q.is_empty() {
            pairs.push(format!("q={}", utf8_percent_encode(&self.q, NON_ALPHANUMERIC)));
        }
        if self.status != StatusFilter::All {
            pairs.push(format!("status={}", self.status));
        }

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }

    /// The page showing the same search and filter.
    pub fn page_url(&self) -> String {
        format!("/{}", self.query_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub expiry: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub expiry: NaiveDate,
    pub status: StatusCategory,
    pub label: String,
    pub days: i64,
}

impl ItemResponse {
    pub fn new(item: Item, status: Status) -> Self {
        Self {
            id: item.id,
            name: item.name,
            expiry: item.expiry,
            status: status.category,
            label: status.label,
            days: status.days,
        }
    }
}
