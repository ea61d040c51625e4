use serde::{Deserialize, Serialize};

/// The locally fabricated "logged in user".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub token: String,
}

/// Text before the first `@`, or the whole address when there is none.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
