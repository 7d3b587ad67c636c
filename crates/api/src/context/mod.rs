//! Application context - dependency injection container

use std::sync::Arc;

use tracing::info;
use vibekeeper_core::{
    AuthService, ExtractionChain, OccasionExtractor, OccasionService, PatternExtractor,
};
use vibekeeper_domain::constants::DEFAULT_PROVIDER;
use vibekeeper_domain::{Config, ExtractorConfig, Result, User};
use vibekeeper_infra::{
    DbManager, JwtTokenService, LlmOccasionExtractor, SqliteOccasionRepository,
    SqliteUserRepository,
};

/// Shared handle passed to every handler as router state
pub type SharedContext = Arc<AppContext>;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub auth: Arc<AuthService>,
    pub occasions: Arc<OccasionService>,
    /// Account the HTML pages act as
    pub web_user: User,
}

impl AppContext {
    /// Open the configured database, apply the schema and wire all services.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let extractor = build_extractor(&config.extractor)?;
        Self::with_extractor(config, db, extractor).await
    }

    /// Wire services around an existing database and extractor
    ///
    /// The schema must already exist on `db`. Tests use this to plug in a
    /// scripted extractor.
    pub async fn with_extractor(
        config: Config,
        db: Arc<DbManager>,
        extractor: Arc<dyn OccasionExtractor>,
    ) -> Result<Self> {
        let users = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let tokens = Arc::new(JwtTokenService::from_config(&config.auth)?);
        let auth = Arc::new(AuthService::new(users, tokens));

        let repository = Arc::new(SqliteOccasionRepository::new(Arc::clone(&db)));
        let occasions = Arc::new(OccasionService::new(repository, extractor));

        let web_user = auth
            .ensure_user(
                &config.server.web_user_email,
                &config.server.web_user_name,
                DEFAULT_PROVIDER,
            )
            .await?;
        info!(user_id = web_user.id, "Web pages bound to guest user");

        Ok(Self { config, db, auth, occasions, web_user })
    }
}

fn build_extractor(config: &ExtractorConfig) -> Result<Arc<dyn OccasionExtractor>> {
    let pattern: Arc<dyn OccasionExtractor> =
        Arc::new(PatternExtractor::new(config.default_date_offset_days));
    let llm = LlmOccasionExtractor::from_config(config)?
        .map(|extractor| Arc::new(extractor) as Arc<dyn OccasionExtractor>);

    let mode = config.effective_mode();
    let chain = ExtractionChain::for_mode(mode, pattern, llm)?;
    info!(%mode, extractors = ?chain.names(), "Occasion extraction configured");

    Ok(Arc::new(chain))
}
