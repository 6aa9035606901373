use log::info;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::models::{NewUser, UserRole};
use crate::store::UserStore;

/// Well-known identifier of the default administrator account.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@test.com";
const DEFAULT_ADMIN_NAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Guarantees that at least one administrator account exists.
///
/// Called once during startup, before the server begins accepting requests.
/// Idempotent: the existence check makes a second run (or a restart) a no-op,
/// and signup can never create an admin, so this is the only path that does.
pub async fn ensure_admin_account(store: &dyn UserStore) -> Result<(), AppError> {
    if store.find_by_role(UserRole::Admin).await?.is_some() {
        info!("admin account already exists");
        return Ok(());
    }

    let admin = NewUser {
        name: DEFAULT_ADMIN_NAME.to_string(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
        role: UserRole::Admin,
    };
    store.insert(admin).await?;
    info!("admin account created");

    Ok(())
}
