//! # User Resolver
//!
//! User lookup, search, and update operations over a document collection.
//!
//! - **Domain types** - [`domain::User`], optional [`domain::UserCriteria`], and paging hints
//! - **Collection actor** - an in-memory document store driven over channels,
//!   with predicate queries and a unique index → [`actor_framework::CollectionActor`]
//! - **User client** - validates input, builds the predicate, and makes one
//!   store round-trip per call → [`clients::UserClient`]
//! - **Resolvers** - the query surface handed to the API layer → [`resolvers::Query`]
//! - **System** - startup, configuration, tracing, and shutdown → [`app_system::UserSystem`]
//!
//! ## Example Usage
//!
//! ```no_run
//! use user_resolver::app_system::{SystemConfig, UserSystem};
//! use user_resolver::domain::UserCreate;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = UserSystem::new(&SystemConfig::from_env()?);
//! let alice = system
//!     .user_client
//!     .create_user(UserCreate::new("Alice", "alice", "alice@example.com", "secret"))
//!     .await?;
//! let found = system.user_client.find_user_by_id(alice.id.as_str()).await?;
//! assert_eq!(found, Some(alice));
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod error;
pub mod filter;
pub mod resolvers;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
