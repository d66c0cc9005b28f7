use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Social identity providers users can sign in with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Kakao,
    Google,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Kakao => "kakao",
            SocialProvider::Google => "google",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kakao" => Ok(SocialProvider::Kakao),
            "google" => Ok(SocialProvider::Google),
            other => Err(DomainError::InvalidInput(format!(
                "Unsupported social provider: {other}"
            ))),
        }
    }
}

/// A user profile already validated by the identity provider.
///
/// Token verification happens upstream; this is what survives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    provider: SocialProvider,
    subject: String,
    nickname: Option<String>,
    email: Option<String>,
}

impl SocialProfile {
    pub fn new(
        provider: SocialProvider,
        subject: String,
        nickname: Option<String>,
        email: Option<String>,
    ) -> Result<Self, DomainError> {
        if subject.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Provider subject id cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            provider,
            subject: subject.trim().to_string(),
            nickname: nickname.filter(|n| !n.trim().is_empty()),
            email: email.filter(|e| !e.trim().is_empty()),
        })
    }

    pub fn provider(&self) -> SocialProvider {
        self.provider
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Nickname to register with: the provider's, else the e-mail local part
    pub fn display_name(&self) -> String {
        if let Some(nickname) = &self.nickname {
            return nickname.trim().to_string();
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}
