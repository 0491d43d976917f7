use crate::error::Result;
use crate::settings::{save_settings, Settings, StoreConfig};

/// The store is already initialized by the time this runs; remember an explicit
/// `--db` so later invocations use the same file.
pub fn run(mut settings: Settings, config: &StoreConfig, db_override: Option<&str>) -> Result<()> {
    if db_override.is_some() {
        settings.database_path = config.database_path.to_string_lossy().to_string();
        save_settings(&settings)?;
    }
    println!("Initialized expense store at {}", config.database_path.display());
    Ok(())
}
