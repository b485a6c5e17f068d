//! User data client: the typed seam between controllers and the remote store.

mod http;

pub use http::HttpUserClient;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::{User, UserId, UserPayload};

/// Remote operations on the user collection.
///
/// Implementations must classify every failure as one of the
/// [`ApiError`](crate::error::ApiError) variants.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Full collection in server order. No pagination.
    async fn list_users(&self) -> ApiResult<Vec<User>>;

    async fn get_user(&self, id: &UserId) -> ApiResult<User>;

    async fn create_user(&self, payload: &UserPayload) -> ApiResult<User>;

    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> ApiResult<User>;

    async fn delete_user(&self, id: &UserId) -> ApiResult<()>;
}
