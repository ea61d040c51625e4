use anyhow::{Context, Result};

use crate::cli;
use crate::forms::SignupForm;
use crate::stores::SessionStore;

impl cli::SessionCmd {
    pub async fn run(&self, store: &SessionStore) -> Result<()> {
        match self {
            cli::SessionCmd::Login { email, password } => {
                let password = match password {
                    Some(p) => p.clone(),
                    None => rpassword::prompt_password("Password: ")
                        .context("reading password")?,
                };
                let identity = store.login(email, &password).await.context("logging in")?;
                println!("Logged in as {} <{}>", identity.name, identity.email);
                Ok(())
            }
            cli::SessionCmd::Signup {
                name,
                email,
                password,
            } => {
                let (password, confirm_password) = match password {
                    Some(p) => (p.clone(), p.clone()),
                    None => {
                        let first = rpassword::prompt_password("Password: ")
                            .context("reading password")?;
                        let second = rpassword::prompt_password("Confirm password: ")
                            .context("reading password confirmation")?;
                        (first, second)
                    }
                };
                let form = SignupForm {
                    name: name.clone(),
                    email: email.clone(),
                    password,
                    confirm_password,
                };
                form.validate()?;

                let identity = store
                    .signup(&form.name, &form.email, &form.password)
                    .await
                    .context("signing up")?;
                println!("Welcome, {} <{}>", identity.name, identity.email);
                Ok(())
            }
            cli::SessionCmd::Logout => {
                store.logout().await;
                println!("Logged out");
                Ok(())
            }
            cli::SessionCmd::Show => {
                match store.current() {
                    Some(identity) => println!(
                        "Hello, {} <{}> (id {})",
                        identity.name, identity.email, identity.id
                    ),
                    None => println!("Not logged in"),
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::stores::{MockAuthenticator, RecordingNotifier};
    use std::sync::Arc;
    use std::time::Duration;

    fn store() -> SessionStore {
        SessionStore::open(
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingNotifier::new()),
            Arc::new(MockAuthenticator),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn signup_with_short_password_is_rejected() {
        let store = store();
        let cmd = cli::SessionCmd::Signup {
            name: "Ann".into(),
            email: "ann@shop.example".into(),
            password: Some("123".into()),
        };
        let err = cmd.run(&store).await.unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn login_then_logout() {
        let store = store();
        cli::SessionCmd::Login {
            email: "ann@shop.example".into(),
            password: Some("pw".into()),
        }
        .run(&store)
        .await
        .unwrap();
        assert_eq!(store.current().unwrap().name, "ann");

        cli::SessionCmd::Logout.run(&store).await.unwrap();
        assert!(!store.is_authenticated());
    }
}
