mod auth;
mod category;
mod notifier;
mod seed;
mod session;

pub use auth::{Authenticator, MockAuthenticator};
pub use category::{CategoryEvent, CategoryStore};
pub use notifier::{LogNotifier, Notifier, RecordingNotifier, Severity};
pub use seed::default_categories;
pub use session::{SessionEvent, SessionStore};
