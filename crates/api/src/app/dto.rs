//! Request bodies and JSON mapping helpers.
//!
//! Entities serialize with serde directly except for `User`, which is mapped
//! by hand so the credential hash never crosses the boundary.

use serde::Deserialize;
use serde_json::json;

use jobnexus_board::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleSignInRequest {
    pub id_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubadminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubadminRequest {
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job_id: String,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct EmployerProfileRequest {
    pub company_name: String,
    pub company_description: Option<String>,
    pub company_website: Option<String>,
    pub company_location: Option<String>,
    pub company_size: Option<String>,
    pub company_logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateProfileRequest {
    pub headline: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub resume_url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

pub fn user_to_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id.to_string(),
        "name": user.name,
        "email": user.email,
        "role": user.role.as_str(),
        "permissions": user.permissions.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        "status": user.status.as_str(),
        "approved_by": user.approved_by.map(|id| id.to_string()),
        "created_at": user.created_at,
    })
}
