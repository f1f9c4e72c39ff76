//! Profile and note operations over a [`DocumentStore`].

use crate::error::{StoreError, DOCUMENT_ALREADY_EXISTS};
use crate::query::{CollectionSpec, Filter, FindQuery, VECTORIZE_FIELD};
use crate::store::DocumentStore;
use crate::Result;
use fitflow_core::config::VectorizeSettings;
use fitflow_core::{Document, Note, NoteMetadata, Profile, ProfileUpdate};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Collection holding one profile per user.
pub const PROFILES_COLLECTION: &str = "fitness_profiles";

/// Collection holding notes, with a vector index over the note text.
pub const NOTES_COLLECTION: &str = "notes";

/// Profiles and notes, persisted in an injected document store.
#[derive(Clone)]
pub struct FitnessRepository {
    store: Arc<dyn DocumentStore>,
}

impl FitnessRepository {
    /// Wrap a store. Call [`initialize`](Self::initialize) once before serving.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create both collections if they are missing. Safe to call repeatedly.
    pub async fn initialize(&self, vectorize: &VectorizeSettings) -> Result<()> {
        self.store
            .ensure_collection(&CollectionSpec::plain(PROFILES_COLLECTION))
            .await?;
        self.store
            .ensure_collection(&CollectionSpec::vectorized(
                NOTES_COLLECTION,
                vectorize.clone(),
            ))
            .await?;
        info!(
            "Collections initialized ({}, {})",
            PROFILES_COLLECTION, NOTES_COLLECTION
        );
        Ok(())
    }

    /// Insert the default profile for `user_id` unless one exists, and return
    /// the stored profile.
    pub async fn create_profile(&self, user_id: &str) -> Result<Profile> {
        if let Some(existing) = self.get_profile(user_id).await? {
            return Ok(existing);
        }

        let profile = Profile::with_defaults(user_id);
        let document = to_document(&profile)?;
        let inserted = match self.store.insert_one(PROFILES_COLLECTION, document).await {
            Ok(inserted) => inserted,
            Err(e) if e.has_code(DOCUMENT_ALREADY_EXISTS) => {
                debug!("Profile for {} was created concurrently", user_id);
                return self.get_profile(user_id).await?.ok_or_else(|| {
                    StoreError::persistence(format!(
                        "profile {} exists but could not be read back",
                        user_id
                    ))
                });
            }
            Err(e) => return Err(e),
        };

        match inserted {
            Some(id) => {
                info!("Created default profile for {}", id);
                Ok(Profile {
                    user_id: id,
                    ..profile
                })
            }
            None => Err(StoreError::persistence(format!(
                "profile insert for {} was not confirmed",
                user_id
            ))),
        }
    }

    /// Get the profile for `user_id`, if any.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let document = self
            .store
            .find_one(PROFILES_COLLECTION, &Filter::id(user_id))
            .await?;

        document.map(from_document).transpose()
    }

    /// Apply one group update, creating the default profile first if needed.
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Profile> {
        self.update_profile_groups(user_id, vec![update]).await
    }

    /// Apply several group updates in order with a single `$set`, creating the
    /// default profile first if needed.
    pub async fn update_profile_groups(
        &self,
        user_id: &str,
        updates: Vec<ProfileUpdate>,
    ) -> Result<Profile> {
        let mut profile = self.create_profile(user_id).await?;
        if updates.is_empty() {
            return Ok(profile);
        }

        let mut set = Document::new();
        for update in &updates {
            set.extend(update.apply(&mut profile));
        }

        let matched = self
            .store
            .update_one(PROFILES_COLLECTION, &Filter::id(&profile.user_id), set)
            .await?;
        if matched == 0 {
            return Err(StoreError::persistence(format!(
                "profile {} vanished before it could be updated",
                profile.user_id
            )));
        }

        let groups: Vec<&str> = updates.iter().map(|u| u.group().as_str()).collect();
        debug!("Updated {} for {}", groups.join(", "), profile.user_id);
        Ok(profile)
    }

    /// All notes owned by `user_id`.
    pub async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        let documents = self
            .store
            .find(
                NOTES_COLLECTION,
                &FindQuery::new(Filter::equals("user_id", user_id)),
            )
            .await?;

        Ok(readable_notes(documents))
    }

    /// Store a note. The store embeds the text server-side.
    pub async fn add_note(&self, text: &str, user_id: &str) -> Result<Note> {
        let metadata = NoteMetadata {
            ingested: Some(chrono::Utc::now()),
        };

        let mut document = Document::new();
        document.insert("user_id".to_string(), Value::from(user_id));
        document.insert("text".to_string(), Value::from(text));
        document.insert(VECTORIZE_FIELD.to_string(), Value::from(text));
        document.insert("metadata".to_string(), serde_json::to_value(&metadata)?);

        let id = self
            .store
            .insert_one(NOTES_COLLECTION, document)
            .await?
            .ok_or_else(|| StoreError::persistence("Note creation returned no data"))?;

        info!("Added note {} for {}", id, user_id);
        Ok(Note {
            id,
            user_id: user_id.to_string(),
            text: text.to_string(),
            metadata,
            similarity: None,
        })
    }

    /// Delete a note by id. Returns whether a note was removed.
    pub async fn delete_note(&self, note_id: &str) -> Result<bool> {
        let deleted = self
            .store
            .delete_one(NOTES_COLLECTION, &Filter::id(note_id))
            .await?;
        Ok(deleted > 0)
    }

    /// Up to `limit` of `user_id`'s notes, most similar to `query` first.
    ///
    /// Best-effort: store failures are logged and yield an empty list.
    pub async fn search_similar_notes(&self, query: &str, user_id: &str, limit: usize) -> Vec<Note> {
        if limit == 0 {
            return Vec::new();
        }

        let find = FindQuery::new(Filter::equals("user_id", user_id))
            .sort_by_vectorize(query)
            .with_limit(limit)
            .include_similarity();

        let documents = match self.store.find(NOTES_COLLECTION, &find).await {
            Ok(documents) => documents,
            Err(e) => {
                warn!("Note search failed for {}: {}", user_id, e);
                return Vec::new();
            }
        };

        let mut notes: Vec<Note> = readable_notes(documents)
            .into_iter()
            .filter(|note| note.user_id == user_id)
            .collect();

        notes.truncate(limit);
        notes
    }
}

/// Deserialize notes, skipping documents that do not have the note shape.
fn readable_notes(documents: Vec<Document>) -> Vec<Note> {
    documents
        .into_iter()
        .filter_map(|d| match from_document::<Note>(d) {
            Ok(note) => Some(note),
            Err(e) => {
                warn!("Skipping unreadable note: {}", e);
                None
            }
        })
        .collect()
}

fn to_document<T: serde::Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::command(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn from_document<T: serde::de::DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
