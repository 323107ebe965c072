use thiserror::Error;

/// Literal that precedes the numeric rank in a record name, e.g. `"Item 276"`.
pub const RANK_PREFIX: &str = "Item ";

/// One fetched catalog item. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: i64,
    group_id: i64,
    name: Option<String>,
    price: f64,
    rating: i64,
}

/// A displayable record whose name carries no integer rank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {id} has no integer rank in name {name:?}")]
pub struct RankParseError {
    pub id: i64,
    pub name: String,
}

impl Record {
    pub fn new(id: i64, group_id: i64, name: Option<String>, price: f64, rating: i64) -> Self {
        Self {
            id,
            group_id,
            name,
            price,
            rating,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn rating(&self) -> i64 {
        self.rating
    }

    /// True when the name is present and not blank after trimming.
    pub fn is_displayable(&self) -> bool {
        self.name().is_some_and(|name| !name.trim().is_empty())
    }

    /// Parses the rank out of the name.
    ///
    /// Everything after the first `"Item "` must be a signed decimal integer;
    /// without the prefix the whole name is parsed. No trimming is applied.
    pub fn sort_rank(&self) -> Result<i64, RankParseError> {
        let name = self.name().unwrap_or_default();
        let digits = name
            .split_once(RANK_PREFIX)
            .map_or(name, |(_, rest)| rest);
        digits.parse::<i64>().map_err(|_| RankParseError {
            id: self.id,
            name: name.to_string(),
        })
    }
}
