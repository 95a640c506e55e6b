//! User models.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use super::primitives::{nullable, Custom, ModelBase};
use super::relation::{RawRelation, Relation};
use super::resource::{Creatable, Handle, Hydrate, Resource, Updatable};
use super::{Application, Directory, Membership, Tenant, Usergroup};
use crate::Result;

/// A user stored in a [`Directory`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Base fields
    pub base: ModelBase,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub surname: String,
    /// Whether the account is active, when the server reports it
    pub activated: Option<bool>,
    /// Last successful sign-in
    pub last_successful_login: Option<DateTime<Utc>>,
    /// Last rejected sign-in
    pub last_failed_login: Option<DateTime<Utc>>,
    /// Pending activation code
    pub activation_code: String,
    /// Custom attributes
    pub custom: Custom,
    /// Owning tenant
    pub tenant: Relation<Tenant>,
    /// Applications the user may sign in to
    pub applications: Relation<Vec<Application>>,
    /// Directory holding the user
    pub directory: Relation<Directory>,
    /// Usergroups the user belongs to
    pub usergroups: Relation<Vec<Usergroup>>,
    /// Usergroup memberships
    pub memberships: Relation<Vec<Membership>>,
    handle: Handle,
}

/// User as sent by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(flatten)]
    pub(crate) base: ModelBase,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) username: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) first_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) surname: String,
    #[serde(default)]
    pub(crate) activated: Option<bool>,
    #[serde(default)]
    pub(crate) last_successful_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) last_failed_login: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) activation_code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) custom: Custom,
    pub(crate) tenant: Option<RawRelation>,
    pub(crate) applications: Option<RawRelation>,
    pub(crate) directory: Option<RawRelation>,
    pub(crate) usergroups: Option<RawRelation>,
    pub(crate) memberships: Option<RawRelation>,
}

fn expose_password<S: Serializer>(
    password: &Option<SecretString>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match password {
        Some(p) => serializer.serialize_str(p.expose_secret()),
        None => serializer.serialize_none(),
    }
}

/// Client-settable user fields, used for both create and update.
///
/// The password is write-only: it is never read back from the API, and it
/// is redacted from `Debug` output.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    /// Login name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Email address
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Given name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    /// Family name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub surname: String,
    /// New password
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_password"
    )]
    pub password: Option<SecretString>,
    /// Activation flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
    /// Custom attributes
    #[serde(skip_serializing_if = "Custom::is_empty")]
    pub custom: Custom,
}

/// User update payload.
pub type UserUpdate = UserCreate;

impl From<&User> for UserCreate {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            surname: user.surname.clone(),
            password: None,
            activated: user.activated,
            custom: user.custom.clone(),
        }
    }
}

impl Hydrate for User {
    type Raw = UserResponse;

    fn hydrate(raw: Self::Raw, handle: &Handle) -> Result<Self> {
        Ok(Self {
            base: raw.base,
            username: raw.username,
            email: raw.email,
            first_name: raw.first_name,
            surname: raw.surname,
            activated: raw.activated,
            last_successful_login: raw.last_successful_login,
            last_failed_login: raw.last_failed_login,
            activation_code: raw.activation_code,
            custom: raw.custom,
            tenant: Relation::hydrate(raw.tenant, handle)?,
            applications: Relation::hydrate(raw.applications, handle)?,
            directory: Relation::hydrate(raw.directory, handle)?,
            usergroups: Relation::hydrate(raw.usergroups, handle)?,
            memberships: Relation::hydrate(raw.memberships, handle)?,
            handle: handle.clone(),
        })
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "users";

    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Creatable for User {
    type Create = UserCreate;
}

impl Updatable for User {
    type Update = UserUpdate;

    fn to_update(&self) -> Self::Update {
        self.into()
    }

    fn keep_expanded(&mut self, previous: Self) {
        self.tenant.keep_expanded(previous.tenant);
        self.applications.keep_expanded(previous.applications);
        self.directory.keep_expanded(previous.directory);
        self.usergroups.keep_expanded(previous.usergroups);
        self.memberships.keep_expanded(previous.memberships);
    }
}

impl User {
    /// Full name, `first_name surname`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
            .trim()
            .to_owned()
    }

    /// Push local changes to the API.
    pub async fn save(&mut self) -> Result<()> {
        self.handle.service::<User>().save(self).await
    }

    /// Push local changes together with a new password.
    pub async fn change_password(&mut self, password: impl Into<String>) -> Result<()> {
        let mut update = self.to_update();
        update.password = Some(SecretString::from(password.into()));

        let updated = self
            .handle
            .service::<User>()
            .update_by_link(&self.base.href, &update)
            .await?;
        let previous = std::mem::replace(self, updated);
        self.keep_expanded(previous);
        Ok(())
    }

    /// Delete this user.
    pub async fn delete(self) -> Result<()> {
        self.handle.service::<User>().delete(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_user() {
        let raw: UserResponse = serde_json::from_value(json!({
            "href": "https://acme.cloudthing.io/api/v1/users/u1",
            "username": "jdoe",
            "firstName": "Jane",
            "surname": "Doe",
            "lastSuccessfulLogin": "2024-04-01T08:30:00Z",
            "lastFailedLogin": null,
            "directory": { "href": "https://acme.cloudthing.io/api/v1/directories/dir1" }
        }))
        .unwrap();
        let user = User::hydrate(raw, &Handle::detached()).unwrap();

        assert_eq!(user.full_name(), "Jane Doe");
        assert!(user.last_successful_login.is_some());
        assert!(user.last_failed_login.is_none());
        assert_eq!(user.directory.href(), Some("https://acme.cloudthing.io/api/v1/directories/dir1"));
    }

    #[test]
    fn test_password_is_serialized_but_not_debugged() {
        let request = UserCreate {
            username: "jdoe".into(),
            password: Some(SecretString::from("hunter2".to_string())),
            activated: Some(true),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "username": "jdoe", "password": "hunter2", "activated": true })
        );
        assert!(!format!("{request:?}").contains("hunter2"));
    }
}
