use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Admin,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Client => "client",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(UserRole::Admin),
            "client" => Some(UserRole::Client),
            _ => None,
        }
    }
}

/// Session user. Set once per session and passed to every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl AppUser {
    pub fn admin() -> Self {
        Self {
            role: UserRole::Admin,
            client_id: None,
        }
    }

    pub fn client(client_id: impl Into<String>) -> Self {
        Self {
            role: UserRole::Client,
            client_id: Some(client_id.into()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Client id the role filter restricts to, if any.
    /// A client-role user without a client id is not restricted.
    pub fn scoped_client(&self) -> Option<&str> {
        match self.role {
            UserRole::Client => self.client_id.as_deref().filter(|c| !c.is_empty()),
            UserRole::Admin => None,
        }
    }
}
