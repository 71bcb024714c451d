//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::ports::{
    CommentRepository, PasswordService, PostRepository, TokenBlocklist, TokenService,
    UserRepository,
};
use inkwell_infra::{
    Argon2PasswordService, InMemoryStore, InMemoryTokenBlocklist, JwtConfig, JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub revoked_tokens: Arc<dyn TokenBlocklist>,
    /// Which store backs the repositories, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match Self::postgres(db_config, config).await {
                Ok(state) => {
                    tracing::info!("Application state initialized (postgres)");
                    return state;
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to initialize database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        tracing::info!("Application state initialized (memory)");
        Self::in_memory(config.jwt.clone())
    }

    #[cfg(feature = "postgres")]
    async fn postgres(
        db_config: &inkwell_infra::DatabaseConfig,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        use inkwell_infra::database::connect;
        use inkwell_infra::{
            PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
        };
        use migration::MigratorTrait;

        let conn = Arc::new(connect(db_config).await?);

        if config.run_migrations {
            tracing::info!("Applying pending migrations");
            migration::Migrator::up(conn.as_ref(), None).await?;
        }

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn)),
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            revoked_tokens: Arc::new(InMemoryTokenBlocklist::new()),
            storage: "postgres",
        })
    }

    /// State backed by the in-memory store.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        let store = InMemoryStore::new();

        Self {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
            revoked_tokens: Arc::new(InMemoryTokenBlocklist::new()),
            storage: "memory",
        }
    }
}
