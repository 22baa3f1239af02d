//! Query resolvers exposed to the API layer.
//!
//! Resolvers return [`PublicUser`], which never carries the stored password,
//! and only ever surface sanitized [`UserError`]s.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::clients::UserClient;
use crate::domain::{User, UserCriteria};
use crate::user_actor::UserError;

/// A user as seen by API callers.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Arguments of the `getUser` query. Any one key is enough.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUserInput {
    pub id: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl GetUserInput {
    fn describe(&self) -> String {
        [&self.id, &self.email, &self.username]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .cloned()
            .unwrap_or_default()
    }
}

/// Root query resolvers.
#[derive(Clone)]
pub struct Query {
    users: UserClient,
}

impl Query {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    /// `getUser(id, email, username)`: first user matching any given key.
    #[instrument(skip(self))]
    pub async fn get_user(&self, input: GetUserInput) -> Result<PublicUser, UserError> {
        let criteria = UserCriteria {
            id: input.id.clone(),
            name: None,
            email: input.email.clone(),
            username: input.username.clone(),
        };
        match self.users.find_user_by_id_or_email_or_username(&criteria).await? {
            Some(user) => Ok(user.into()),
            None => {
                debug!("No user matched");
                Err(UserError::NotFound(input.describe()))
            }
        }
    }

    /// `search(query)`: users whose name matches `query`, case-insensitively.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<PublicUser>, UserError> {
        let users = self.users.find_users_by_name(query).await?;
        debug!(count = users.len(), "Search complete");
        Ok(users.into_iter().map(PublicUser::from).collect())
    }
}
