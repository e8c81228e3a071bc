use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// `created_at` as the provider sends it, e.g. `Tue Jun 15 09:37:24 +0000 2010`.
const PROVIDER_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
);

const DISPLAY_TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Saved search record from `1.1/saved_searches/list.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedSearch {
    pub id: u64,
    pub name: String,
    pub query: String,
    #[serde(deserialize_with = "deserialize_provider_date")]
    pub created_at: OffsetDateTime,
}

/// Listing entry returned by `/api/saved_searches/list`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SavedSearchEntry {
    pub id: u64,
    pub name: String,
    pub query: String,
    pub timestamp: String,
}

impl SavedSearchEntry {
    pub fn from_saved_search(search: SavedSearch) -> Result<Self, time::error::Format> {
        let timestamp = search
            .created_at
            .to_offset(UtcOffset::UTC)
            .format(DISPLAY_TIMESTAMP)?;

        Ok(Self {
            id: search.id,
            name: search.name,
            query: search.query,
            timestamp,
        })
    }
}

/// Projects provider records into listing entries, keeping their order.
pub fn project_saved_searches(
    searches: Vec<SavedSearch>,
) -> Result<Vec<SavedSearchEntry>, time::error::Format> {
    searches
        .into_iter()
        .map(SavedSearchEntry::from_saved_search)
        .collect()
}

fn deserialize_provider_date<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    OffsetDateTime::parse(&raw, PROVIDER_DATE).map_err(serde::de::Error::custom)
}
