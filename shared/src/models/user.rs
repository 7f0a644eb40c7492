//! User account and preference models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Language;

/// A signed-in user as returned by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    #[serde(rename = "isResearcher", default)]
    pub is_researcher: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

/// Bearer token plus the user it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserProfile,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Sign-up form as typed by the user
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign-in form as typed by the user
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Researcher portal application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResearcherApplication {
    pub institution: String,
    pub research_id: String,
    pub credentials: String,
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

/// AQI scale the user prefers to read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AqiUnit {
    /// US EPA
    #[default]
    Standard,
    /// India CPCB
    India,
    Eu,
}

/// Per-user display and notification preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub language: Language,
    pub theme: Theme,
    pub default_location: String,
    pub aqi_unit: AqiUnit,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: false,
            language: Language::English,
            theme: Theme::Light,
            default_location: String::new(),
            aqi_unit: AqiUnit::Standard,
        }
    }
}
