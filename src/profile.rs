//! Static personal data consumed by the portfolio's UI.

use serde::{Deserialize, Serialize};

/// The site owner's public profile, served read-only at `/api/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PersonalData {
    pub name: String,
    /// Path of the profile picture relative to the site root.
    pub profile: String,
    pub designation: String,
    pub description: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_overflow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leetcode: Option<String>,
    pub dev_username: String,
    pub resume: String,
}

impl Default for PersonalData {
    fn default() -> Self {
        Self {
            name: "Luis Antonio".to_string(),
            profile: "/profile.png".to_string(),
            designation: "Software Developer".to_string(),
            description: "My name is Luis Antonio. Professional Software Developer with 5+ years of experience \
                building web applications and backend systems. Specialized in modern JavaScript frameworks, \
                APIs, and cloud deployment. Experienced working remotely with international clients and \
                delivering high-quality, scalable solutions. Strong problem-solving skills, reliable \
                communication, and committed to clean, maintainable code."
                .to_string(),
            email: "phoenix.dev351@outlook.com".to_string(),
            phone: None,
            address: "Jalan Kiara, Mont Kiara, 50480 Kuala Lumpur, Malaysia".to_string(),
            github: None,
            linked_in: None,
            twitter: None,
            stack_overflow: None,
            leetcode: None,
            dev_username: "said7388".to_string(),
            resume: "https://drive.google.com/file/d/1eyutpKFFhJ9X-qpQGKhUNnVRkB5Wer00/view?usp=sharing"
                .to_string(),
        }
    }
}
