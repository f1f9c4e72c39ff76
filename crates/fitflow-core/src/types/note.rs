//! Free-text note types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A saved note. The store embeds `text` for similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Store-generated id.
    #[serde(rename = "_id")]
    pub id: String,

    /// Owner of the note.
    pub user_id: String,

    /// Note body.
    pub text: String,

    #[serde(default)]
    pub metadata: NoteMetadata,

    /// Similarity to the search query, present only on search results.
    #[serde(
        rename = "$similarity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub similarity: Option<f64>,
}

/// Bookkeeping attached to a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteMetadata {
    /// When the note was stored.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingested: Option<DateTime<Utc>>,
}

/// Accept RFC 3339 timestamps as well as offset-less ISO 8601 ones (read as UTC).
/// Anything else is dropped rather than failing the whole note.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }))
}
