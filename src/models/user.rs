use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub password: String, // Always hashed
    pub is_verified: bool,
    // Email verification, set at signup and cleared once confirmed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code_expires: Option<DateTime<Utc>>,
    // Password reset, set by forgot-password and cleared after a successful reset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_expires: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// What `/auth/profile` returns: the user document without the credential and
/// token fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: self.username.clone(),
            email: self.email.clone(),
            is_verified: self.is_verified,
            created_at: self.created_at,
        }
    }
}
