//! Users service.

use crate::client::RequestOptions;
use crate::models::{Directory, Page, Resource, User, UserCreate, Usergroup};
use crate::Result;

use super::resource::scoped;
use super::ResourceService;

/// Service for directory users.
pub type UsersService = ResourceService<User>;

impl UsersService {
    /// Get the user the session was opened for.
    pub async fn get_current(&self, options: Option<RequestOptions>) -> Result<User> {
        self.get_following_redirect("users/current", options).await
    }

    /// List users of a directory.
    pub async fn list_by_directory(
        &self,
        directory_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<User>> {
        self.list_by_link(&scoped::<Directory>(directory_id, User::COLLECTION), options)
            .await
    }

    /// List members of a usergroup.
    pub async fn list_by_usergroup(
        &self,
        usergroup_id: &str,
        options: Option<RequestOptions>,
    ) -> Result<Page<User>> {
        self.list_by_link(&scoped::<Usergroup>(usergroup_id, User::COLLECTION), options)
            .await
    }

    /// Create a user in a directory.
    pub async fn create_by_directory(
        &self,
        directory_id: &str,
        request: &UserCreate,
    ) -> Result<User> {
        self.create_by_link(&scoped::<Directory>(directory_id, User::COLLECTION), request)
            .await
    }
}
