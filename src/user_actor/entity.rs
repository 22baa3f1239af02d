use chrono::{DateTime, Utc};

use crate::actor_framework::Document;
use crate::domain::{User, UserCreate, UserField, UserId, UserUpdate};

impl Document for User {
    type Id = UserId;
    type Field = UserField;
    type CreatePayload = UserCreate;
    type Patch = UserUpdate;

    fn id(&self) -> &UserId {
        &self.id
    }

    /// Creates a new User from a complete creation payload.
    ///
    /// Every field is required. Both timestamps start at `now`.
    fn from_create(id: UserId, payload: UserCreate, now: DateTime<Utc>) -> Result<Self, String> {
        require("name", Some(&payload.name))?;
        require("username", Some(&payload.username))?;
        require("email", Some(&payload.email))?;
        require("password", Some(&payload.password))?;
        Ok(Self {
            id,
            name: payload.name,
            username: payload.username,
            email: payload.email,
            password: payload.password,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges the update into the user and bumps `updated_at`.
    ///
    /// # Fields Updated
    /// - `name`, `username`, `email`: replaced when present
    /// - `password`: replaced when present, never read back by this layer
    ///
    /// A present field may not be blank.
    fn on_update(&mut self, patch: UserUpdate, now: DateTime<Utc>) -> Result<(), String> {
        require("name", patch.name.as_ref())?;
        require("username", patch.username.as_ref())?;
        require("email", patch.email.as_ref())?;
        require("password", patch.password.as_ref())?;
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        self.updated_at = now;
        Ok(())
    }

    fn field(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Id => Some(self.id.as_str()),
            UserField::Name => Some(self.name.as_str()),
            UserField::Username => Some(self.username.as_str()),
            UserField::Email => Some(self.email.as_str()),
        }
    }

    fn unique_fields() -> &'static [UserField] {
        &[UserField::Username, UserField::Email]
    }
}

fn require(field: &str, value: Option<&String>) -> Result<(), String> {
    match value {
        Some(v) if v.trim().is_empty() => Err(format!("{field} is required")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn alice() -> User {
        let now = Utc::now();
        User::from_create(
            UserId::from_parts(1, 1),
            UserCreate::new("Alice", "alice", "alice@example.com", "secret"),
            now,
        )
        .unwrap()
    }

    #[test]
    fn update_merges_present_fields_only() {
        let mut user = alice();
        let created_at = user.created_at;
        let later = created_at + Duration::seconds(5);
        let patch = UserUpdate { email: Some("a@new.io".into()), ..Default::default() };

        user.on_update(patch, later).unwrap();

        assert_eq!(user.email, "a@new.io");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "secret");
        assert_eq!(user.created_at, created_at);
        assert_eq!(user.updated_at, later);
    }

    #[test]
    fn create_rejects_missing_fields() {
        let err = User::from_create(
            UserId::from_parts(1, 1),
            UserCreate::new("Alice", "alice", "", "secret"),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, "email is required");

        let err = User::from_create(
            UserId::from_parts(1, 2),
            UserCreate::new("", "", "", ""),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, "name is required");
    }

    #[test]
    fn update_rejects_blank_fields() {
        let mut user = alice();
        let before = user.clone();
        let patch = UserUpdate { username: Some("  ".into()), ..Default::default() };

        assert_eq!(user.on_update(patch, Utc::now()).unwrap_err(), "username is required");
        assert_eq!(user, before);
    }

    #[test]
    fn field_projection_covers_the_allow_list() {
        let user = alice();
        assert_eq!(user.field(UserField::Id), Some(user.id.as_str()));
        assert_eq!(user.field(UserField::Username), Some("alice"));
        assert_eq!(user.field(UserField::Email), Some("alice@example.com"));
    }
}
