use crate::models::Tier;
use serde::Deserialize;

/// Caller identity resolved by the authentication middleware.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub email_confirmed: bool,
    /// Active subscription plans. `None` when the auth provider did not say.
    pub plans: Option<Vec<Tier>>,
    pub access_token: Option<String>,
}
