use std::rc::Rc;

use crate::api::{ApiClient, ApiError};

#[derive(Clone)]
pub struct AdminUsersRepository {
    client: Rc<ApiClient>,
}

impl AdminUsersRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Reset another user's password through the admin function. The
    /// function re-checks both the caller's admin flag and the password
    /// policy server-side.
    pub async fn reset_password(
        &self,
        user_email: String,
        new_password: String,
    ) -> Result<String, ApiError> {
        self.client
            .invoke_password_update(&user_email, &new_password)
            .await
    }
}
