mod category;
mod identity;
mod store_error;

pub use category::{Category, CategoryId, CategoryPatch, NewCategory};
pub use identity::{email_local_part, Identity};
pub use store_error::StoreError;
