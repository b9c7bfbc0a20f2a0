//! Role-specific profile documents, upserted by their owners.

use serde::{Deserialize, Serialize};

use jobnexus_core::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub user_id: UserId,
    pub company_name: String,
    pub company_description: Option<String>,
    pub company_website: Option<String>,
    pub company_location: Option<String>,
    pub company_size: Option<String>,
    pub company_logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub user_id: UserId,
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
