use anyhow::{Context, Result};
use cinedex_application::{CatalogUsecase, UserAccountUsecase};
use cinedex_core::config::CinedexConfig;
use cinedex_core::credential::BcryptGuard;
use cinedex_infrastructure::catalog_seed::load_or_seed;
use cinedex_infrastructure::{CinedexPaths, ConfigService, InMemoryCatalog, TomlUserRepository};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Everything a command needs, wired from the configuration.
pub struct AppContext {
    pub accounts: UserAccountUsecase,
    pub catalog: CatalogUsecase,
}

impl AppContext {
    /// `data_dir` wins over `config.data_dir`, which wins over the platform default.
    pub fn build(config: &CinedexConfig, data_dir: Option<&Path>) -> Result<Self> {
        let paths = CinedexPaths::new(data_dir.or(config.data_dir.as_deref()))
            .context("Failed to resolve the data directory")?;
        tracing::debug!("Using data directory {:?}", paths.data_dir());

        let catalog_file = load_or_seed(&paths.catalog_file())
            .with_context(|| format!("Failed to load catalog {:?}", paths.catalog_file()))?;
        let catalog = Arc::new(InMemoryCatalog::from_catalog(catalog_file));
        let users = Arc::new(TomlUserRepository::with_dir(paths.users_dir()));
        let guard = Arc::new(BcryptGuard::new(config.security.bcrypt_cost)?);

        Ok(Self {
            accounts: UserAccountUsecase::new(
                users,
                catalog.clone(),
                guard,
                config.storage.max_conflict_retries,
            ),
            catalog: CatalogUsecase::new(catalog.clone(), catalog),
        })
    }
}

/// Reads `config.toml` from `path`, or from the platform config directory.
pub fn load_config(path: Option<PathBuf>) -> Result<CinedexConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = service
        .get_config()
        .with_context(|| format!("Failed to load config {:?}", service.path()))?;
    Ok(config)
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the configured level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
