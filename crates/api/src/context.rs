use storefront_core::RecordId;

/// Principal context for a request (the authenticated user).
///
/// Inserted by [`auth_middleware`](crate::middleware::auth_middleware); only
/// present on routes behind it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: RecordId,
}

impl PrincipalContext {
    pub fn new(user_id: RecordId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> RecordId {
        self.user_id
    }
}
