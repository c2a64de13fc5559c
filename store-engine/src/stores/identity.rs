//! User accounts and the current-session pointer
//!
//! Registration, login and logout over plain stored credentials. The
//! "session" is just the signed-in user id persisted under its own key,
//! mirroring the single-seat deployment this runs in.

use std::sync::Arc;

use shared::models::{ADMIN_SENTINEL, Role, User};

use crate::engine::error::{EngineError, EngineResult};
use crate::storage::{self, DurableStore, keys};

/// Built-in administrator sign-in
pub const ADMIN_EMAIL: &str = "admin3262@gmail.com";
const ADMIN_PASSWORD: &str = "beautiful54321";

/// Registration input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

/// User account store
pub struct IdentityStore {
    store: Arc<dyn DurableStore>,
    users: Vec<User>,
    current: Option<String>,
}

impl IdentityStore {
    /// Load accounts and the persisted session, if any; a first run seeds
    /// the built-in administrator
    pub fn load(store: Arc<dyn DurableStore>) -> EngineResult<Self> {
        let users: Vec<User> = match storage::load_collection(store.as_ref(), keys::USERS)? {
            Some(users) => users,
            None => {
                let seeded = vec![built_in_admin()];
                storage::persist_collection(store.as_ref(), keys::USERS, &seeded)?;
                tracing::info!("seeded built-in administrator account");
                seeded
            }
        };
        let current: Option<String> =
            storage::load_collection(store.as_ref(), keys::CURRENT_USER)?;
        // A stale pointer to a deleted account is dropped on load
        let current = current.filter(|id| users.iter().any(|u| &u.id == id));
        Ok(Self {
            store,
            users,
            current,
        })
    }

    /// Register a new account; the new user is always `Role::User`
    ///
    /// Registration does not sign the account in.
    pub fn register(&mut self, new_user: NewUser) -> EngineResult<User> {
        let email = new_user.email.trim().to_lowercase();
        if self.users.iter().any(|u| u.email == email) {
            return Err(EngineError::Conflict(format!(
                "an account already exists for {}",
                email
            )));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            full_name: new_user.full_name,
            phone: new_user.phone,
            address: new_user.address,
            password: Some(new_user.password),
            role: Role::User,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        self.users.push(user.clone());
        if let Err(e) = self.persist() {
            self.users.pop();
            return Err(e);
        }
        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Sign in with a stored credential match
    pub fn login(&mut self, email: &str, password: &str) -> EngineResult<User> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .iter()
            .find(|u| u.email == email && u.password.as_deref() == Some(password))
            .cloned()
            .ok_or_else(|| EngineError::Forbidden("invalid credentials".to_string()))?;

        storage::persist_collection(self.store.as_ref(), keys::CURRENT_USER, &user.id)?;
        self.current = Some(user.id.clone());
        tracing::info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Sign out and drop the persisted session
    pub fn logout(&mut self) -> EngineResult<()> {
        self.store.remove(keys::CURRENT_USER)?;
        self.current = None;
        Ok(())
    }

    /// The signed-in user, if any
    pub fn current(&self) -> Option<&User> {
        let id = self.current.as_deref()?;
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up an account by id
    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// All accounts
    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn persist(&self) -> EngineResult<()> {
        storage::persist_collection(self.store.as_ref(), keys::USERS, &self.users)?;
        Ok(())
    }
}

/// The only account that ever carries `Role::Admin`; its id is the
/// notification routing sentinel
fn built_in_admin() -> User {
    User {
        id: ADMIN_SENTINEL.to_string(),
        email: ADMIN_EMAIL.to_string(),
        full_name: "Main Admin".to_string(),
        phone: "000".to_string(),
        address: "Headquarters".to_string(),
        password: Some(ADMIN_PASSWORD.to_string()),
        role: Role::Admin,
        created_at: chrono::Utc::now().timestamp_millis(),
    }
}
