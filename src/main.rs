use tracing::{error, info, warn, Instrument};

use user_resolver::app_system::{setup_tracing, SystemConfig, UserSystem};
use user_resolver::domain::{FieldFilter, Pagination, UserCreate, UserCriteria, UserUpdate};
use user_resolver::resolvers::GetUserInput;
use user_resolver::user_actor::UserError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SystemConfig::from_env()?;
    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!("Starting user system demo");
    let system = UserSystem::new(&config);

    let span = tracing::info_span!("user_creation");
    let alice = async {
        info!("Creating demo users");
        system
            .user_client
            .create_user(UserCreate::new("Alice", "alice", "alice@example.com", "secret"))
            .await
    }
    .instrument(span)
    .await?;
    system
        .user_client
        .create_user(UserCreate::new("Alan", "alan", "alan@example.com", "secret"))
        .await?;
    info!(user_id = %alice.id, "User created successfully");

    let found = system
        .query
        .get_user(GetUserInput { username: Some("alice".into()), ..Default::default() })
        .await?;
    info!(user_id = %found.id, email = %found.email, "Resolved getUser");

    let matches = system.query.search("al").await?;
    info!(count = matches.len(), "Resolved search");

    // Pre-flight check before renaming: is "alan" taken by anyone else?
    let taken = system
        .user_client
        .find_users_excluding(
            &FieldFilter::new("username", "alan"),
            &FieldFilter::new("_id", alice.id.as_str()),
        )
        .await?;
    if taken.is_empty() {
        info!("Username available");
    } else {
        warn!(count = taken.len(), "Username already taken");
    }

    let rename = UserUpdate { username: Some("alan".into()), ..Default::default() };
    match system.user_client.update_user_by_id(alice.id.as_str(), rename).await {
        Ok(user) => info!(found = user.is_some(), "Update applied"),
        Err(UserError::AlreadyExists(field)) => warn!(%field, "Update rejected by unique index"),
        Err(e) => error!(error = %e, "Update failed"),
    }

    let page = system
        .user_client
        .find_users(&UserCriteria::default().with_name("al"), Pagination::new(1, 1))
        .await?;
    info!(count = page.len(), "Paged search complete");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
