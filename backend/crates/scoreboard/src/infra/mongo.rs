//! MongoDB Repository Implementation
//!
//! Documents keep the field names existing clients and records already use:
//! `username`, `password`, `score`, `emissionCO2`, `image`.

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_duplicate_key;
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::{User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{progress_delta::ProgressDelta, user_name::UserName};
use crate::error::{ScoreboardError, ScoreboardResult};

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "users";

/// MongoDB-backed user repository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
        }
    }

    /// Create the unique index on `username`
    ///
    /// Fails if the collection already holds duplicate names; the service
    /// must not run without the constraint.
    pub async fn ensure_indexes(&self) -> ScoreboardResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let result = self.collection.create_index(index).await?;

        tracing::info!(
            collection = %self.collection.name(),
            index = %result.index_name,
            "Ensured unique user name index"
        );

        Ok(())
    }
}

// ============================================================================
// Document mapping
// ============================================================================

/// Stored shape of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub score: f64,
    #[serde(rename = "emissionCO2", default)]
    pub emission_co2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl UserDocument {
    /// Map back to the domain entity
    ///
    /// Records written before timestamps existed fall back to the ObjectId
    /// creation time.
    pub fn into_user(self) -> ScoreboardResult<User> {
        let user_name = UserName::new(self.username).map_err(|e| {
            ScoreboardError::CorruptRecord(format!("invalid username in store: {e}"))
        })?;
        let password_hash = HashedPassword::from_stored(self.password).map_err(|e| {
            ScoreboardError::CorruptRecord(format!("invalid password hash for {user_name}: {e}"))
        })?;

        let created_at = self
            .created_at
            .or_else(|| self.id.map(|id| id.timestamp()))
            .map(to_chrono)
            .unwrap_or_else(Utc::now);
        let updated_at = self.updated_at.map(to_chrono).unwrap_or(created_at);

        Ok(User {
            user_name,
            password_hash,
            score: self.score,
            emission_co2: self.emission_co2,
            image: self.image,
            created_at,
            updated_at,
        })
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: None,
            username: user.user_name.as_str().to_owned(),
            password: user.password_hash.as_str().to_owned(),
            score: user.score,
            emission_co2: user.emission_co2,
            image: user.image.clone(),
            created_at: Some(to_bson(user.created_at)),
            updated_at: Some(to_bson(user.updated_at)),
        }
    }
}

/// Public fields read back after an increment
///
/// Carries no `password`, so the credential is never parsed on this path.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressDocument {
    #[serde(default)]
    pub score: f64,
    #[serde(rename = "emissionCO2", default)]
    pub emission_co2: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProgressDocument {
    pub fn into_profile(self, user_name: UserName) -> UserProfile {
        UserProfile {
            user_name,
            score: self.score,
            emission_co2: self.emission_co2,
            image: self.image,
        }
    }
}

/// Projection matching [`ProgressDocument`]
pub fn progress_projection() -> Document {
    doc! { "_id": 0, "score": 1, "emissionCO2": 1, "image": 1 }
}

fn to_bson(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn to_chrono(at: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or_else(Utc::now)
}

fn by_user_name(user_name: &UserName) -> Document {
    doc! { "username": user_name.as_str() }
}

/// Update document adding `delta` to both counters in one server-side step
pub fn progress_update(delta: &ProgressDelta) -> Document {
    doc! {
        "$inc": { "score": delta.score(), "emissionCO2": delta.emission() },
        "$set": { "updatedAt": bson::DateTime::now() },
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MongoUserRepository {
    async fn create(&self, user: &User) -> ScoreboardResult<()> {
        let document = UserDocument::from(user);

        match self.collection.insert_one(&document).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(ScoreboardError::UserNameTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> ScoreboardResult<Option<User>> {
        self.collection
            .find_one(by_user_name(user_name))
            .await?
            .map(UserDocument::into_user)
            .transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> ScoreboardResult<bool> {
        let count = self
            .collection
            .count_documents(by_user_name(user_name))
            .limit(1)
            .await?;

        Ok(count > 0)
    }

    async fn add_progress(
        &self,
        user_name: &UserName,
        delta: &ProgressDelta,
    ) -> ScoreboardResult<Option<UserProfile>> {
        let updated = self
            .collection
            .clone_with_type::<ProgressDocument>()
            .find_one_and_update(by_user_name(user_name), progress_update(delta))
            .projection(progress_projection())
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(|document| document.into_profile(user_name.clone())))
    }

    async fn update_password_hash(
        &self,
        user_name: &UserName,
        password_hash: &HashedPassword,
    ) -> ScoreboardResult<()> {
        let result = self
            .collection
            .update_one(
                by_user_name(user_name),
                doc! {
                    "$set": {
                        "password": password_hash.as_str(),
                        "updatedAt": bson::DateTime::now(),
                    }
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ScoreboardError::UserNotFound);
        }

        Ok(())
    }
}
