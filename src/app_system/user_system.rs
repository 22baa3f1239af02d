use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::actor_framework::CollectionActor;
use crate::app_system::{SystemConfig, SystemError};
use crate::clients::UserClient;
use crate::domain::{User, UserId};
use crate::resolvers::Query;

/// Owns the user collection actor and the clients wired to it.
pub struct UserSystem {
    pub user_client: UserClient,
    pub query: Query,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl UserSystem {
    /// Spawns the collection actor. Must be called inside a Tokio runtime.
    pub fn new(config: &SystemConfig) -> Self {
        info!(
            buffer_size = config.buffer_size,
            pagination = ?config.pagination,
            "Starting user system"
        );

        let sequence = Arc::new(AtomicU64::new(1));
        let next_user_id = move || {
            let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or_default();
            UserId::from_parts(seconds, sequence.fetch_add(1, Ordering::SeqCst))
        };

        let (user_actor, user_collection) =
            CollectionActor::<User>::new("users", config.buffer_size, next_user_id);
        let user_client = UserClient::new(user_collection).with_pagination(config.pagination);
        let user_handle = tokio::spawn(user_actor.run());

        Self {
            query: Query::new(user_client.clone()),
            user_client,
            handles: vec![user_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        // Actors stop once every client is gone and their channels close.
        drop(self.query);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
