//! Access policies applied to everything created in a session.

/// Global policy granting access to every logged-in user.
pub const USERS_POLICY: &str = "users";

/// View and edit policies (PHIDs or global policy names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policies {
    /// Who may see the object.
    pub view: String,
    /// Who may change the object.
    pub edit: String,
}

impl Policies {
    /// Uses the same policy for viewing and editing.
    pub fn uniform(policy: impl Into<String>) -> Self {
        let policy = policy.into();
        Self {
            view: policy.clone(),
            edit: policy,
        }
    }

    /// Policies used when no group project is available.
    #[must_use]
    pub fn all_users() -> Self {
        Self::uniform(USERS_POLICY)
    }
}
