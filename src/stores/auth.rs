use rand::Rng;

use crate::types::{email_local_part, Identity, StoreError};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Turns credentials into an identity.
///
/// A backend that refuses credentials returns [`StoreError::Rejected`].
pub trait Authenticator: Send + Sync {
    fn login(&self, email: &str, credential: &str) -> Result<Identity, StoreError>;
    fn signup(&self, name: &str, email: &str, credential: &str) -> Result<Identity, StoreError>;
}

/// Accepts any credentials and fabricates a fresh identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockAuthenticator;

impl Authenticator for MockAuthenticator {
    fn login(&self, email: &str, _credential: &str) -> Result<Identity, StoreError> {
        Ok(fabricate(email_local_part(email), email))
    }

    fn signup(&self, name: &str, email: &str, _credential: &str) -> Result<Identity, StoreError> {
        Ok(fabricate(name, email))
    }
}

fn fabricate(name: &str, email: &str) -> Identity {
    Identity {
        id: format!("user_{}", random_base36(9)),
        email: email.to_string(),
        name: name.to_string(),
        token: format!("mock_jwt_token_{}", random_base36(16)),
    }
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
