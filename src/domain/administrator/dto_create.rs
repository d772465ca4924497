use super::Role;

/// Input for creating an administrator.
///
/// `password_hash` is already hashed; `role` falls back to [`Role::Editor`].
#[derive(Debug, Clone)]
pub struct NewAdministrator {
    pub email: String,
    pub password_hash: String,
    pub role: Option<Role>,
}
