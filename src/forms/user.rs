use crate::models::{self, Tier};
use serde_derive::{Deserialize, Serialize};

/// Body returned by the auth server for a bearer token.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub user: User,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub email_confirmed: bool,
    #[serde(default)]
    pub role: Option<String>,
    /// Plan codes as the provider spells them. Absent means the provider could not say.
    #[serde(default)]
    pub plans: Option<Vec<String>>,
}

impl TryInto<models::User> for UserForm {
    type Error = String;

    fn try_into(self) -> Result<models::User, Self::Error> {
        if self.user.id.trim().is_empty() {
            return Err("auth server returned a user without id".to_string());
        }

        // Unknown plan codes are not tiers; they grant nothing.
        let plans = self.user.plans.map(|codes| {
            codes
                .iter()
                .filter_map(|code| code.parse::<Tier>().ok())
                .collect::<Vec<Tier>>()
        });

        Ok(models::User {
            id: self.user.id,
            first_name: self.user.first_name,
            last_name: self.user.last_name,
            email: self.user.email,
            role: self
                .user
                .role
                .filter(|role| !role.is_empty())
                .unwrap_or_else(|| "group_user".to_string()),
            email_confirmed: self.user.email_confirmed,
            plans,
            access_token: None,
        })
    }
}
