use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// The locally remembered login. At most one exists at a time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialRecord {
    pub username: String,
    #[serde(with = "crate::cryptography::types::secret_string")]
    pub password: SecretString,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password: String = password.into();
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }
}

/// One saved password. `created_at` is stamped by the store on insertion.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PasswordEntry {
    #[serde(with = "crate::cryptography::types::secret_string")]
    pub pwd: SecretString,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PasswordEntry {
    pub fn matches(&self, pwd: &str) -> bool {
        self.pwd.expose_secret() == pwd
    }
}

/// Input accepted by `PasswordStore::save_password`: either a bare password
/// or a password with optional metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewPassword {
    Bare(String),
    Detailed {
        pwd: String,
        platform: Option<String>,
        label: Option<String>,
    },
}

impl NewPassword {
    /// Empty metadata strings count as absent.
    pub fn with_metadata(
        pwd: impl Into<String>,
        platform: Option<String>,
        label: Option<String>,
    ) -> Self {
        NewPassword::Detailed {
            pwd: pwd.into(),
            platform: platform.filter(|s| !s.is_empty()),
            label: label.filter(|s| !s.is_empty()),
        }
    }

    pub fn into_entry(self, created_at: i64) -> PasswordEntry {
        let (pwd, platform, label) = match self {
            NewPassword::Bare(pwd) => (pwd, None, None),
            NewPassword::Detailed {
                pwd,
                platform,
                label,
            } => (pwd, platform, label),
        };
        PasswordEntry {
            pwd: SecretString::new(pwd.into()),
            created_at,
            platform,
            label,
        }
    }
}

impl From<String> for NewPassword {
    fn from(pwd: String) -> Self {
        NewPassword::Bare(pwd)
    }
}

impl From<&str> for NewPassword {
    fn from(pwd: &str) -> Self {
        NewPassword::Bare(pwd.to_string())
    }
}
