use tracing::{debug, instrument};

use crate::actor_framework::CollectionClient;
use crate::clients::user_filters;
use crate::domain::{
    FieldFilter, Pagination, PaginationPolicy, User, UserCreate, UserCriteria, UserField,
    UserUpdate,
};
use crate::filter::{Filter, FindOptions};
use crate::user_actor::UserError;

/// Client for the user collection.
///
/// Every method is a single store round-trip. Input is validated first, so an
/// [`UserError::InvalidArgument`] means nothing was sent to the store. A lookup
/// that matches nothing is `Ok(None)` or an empty vector, never an error.
#[derive(Clone)]
pub struct UserClient {
    inner: CollectionClient<User>,
    pagination: PaginationPolicy,
}

impl UserClient {
    pub fn new(inner: CollectionClient<User>) -> Self {
        Self { inner, pagination: PaginationPolicy::default() }
    }

    pub fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.pagination = pagination;
        self
    }

    #[instrument(fields(username = %user.username), skip(self, user))]
    pub async fn create_user(&self, user: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        store_call!("create_user", self.inner.insert(user))
    }

    #[instrument(skip(self))]
    pub async fn find_user_by_username_or_email(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<User>, UserError> {
        let filter = user_filters::username_or_email(email, username)?;
        debug!("Sending request");
        store_call!("find_user_by_username_or_email", self.inner.find_one(filter))
    }

    #[instrument(skip(self))]
    pub async fn find_user_by_id_or_email_or_username(
        &self,
        criteria: &UserCriteria,
    ) -> Result<Option<User>, UserError> {
        let filter = user_filters::id_or_email_or_username(criteria)?;
        debug!("Sending request");
        store_call!("find_user_by_id_or_email_or_username", self.inner.find_one(filter))
    }

    #[instrument(skip(self))]
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let filter = user_filters::by_email(email)?;
        debug!("Sending request");
        store_call!("find_user_by_email", self.inner.find_one(filter))
    }

    #[instrument(skip(self))]
    pub async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, UserError> {
        let id = user_filters::parse_id(id)?;
        debug!("Sending request");
        store_call!("find_user_by_id", self.inner.find_by_id(id))
    }

    /// Case-insensitive pattern search on `name`, in store order.
    #[instrument(skip(self))]
    pub async fn find_users_by_name(&self, query: &str) -> Result<Vec<User>, UserError> {
        let pattern = user_filters::name_pattern(query)?;
        debug!("Sending request");
        let filter = Filter::Matches(UserField::Name, pattern);
        store_call!("find_users_by_name", self.inner.find(filter, FindOptions::default()))
    }

    /// Merges `update` into the user and returns the stored result.
    #[instrument(skip(self, update))]
    pub async fn update_user_by_id(
        &self,
        id: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, UserError> {
        let id = user_filters::parse_id(id)?;
        debug!(?update, "Sending request");
        store_call!("update_user_by_id", self.inner.update_by_id(id, update))
    }

    /// Users matching `filter` but not `exclude`, used for "taken by someone
    /// else" checks.
    ///
    /// This is a hint only. The check and a later write are not atomic; the
    /// unique index on username and email is what actually rejects duplicates.
    #[instrument(skip(self))]
    pub async fn find_users_excluding(
        &self,
        filter: &FieldFilter,
        exclude: &FieldFilter,
    ) -> Result<Vec<User>, UserError> {
        let filter = user_filters::excluding(filter, exclude)?;
        debug!("Sending request");
        store_call!("find_users_excluding", self.inner.find(filter, FindOptions::default()))
    }

    /// Users matching every present criterion, paged by the configured policy.
    #[instrument(skip(self))]
    pub async fn find_users(
        &self,
        criteria: &UserCriteria,
        page: Pagination,
    ) -> Result<Vec<User>, UserError> {
        let filter = user_filters::by_criteria(criteria)?;
        let options = self.pagination.find_options(page);
        debug!(?options, "Sending request");
        store_call!("find_users", self.inner.find(filter, options))
    }
}
