//! Resolve settings and build the manager a command runs against

use std::path::Path;

use projview_core::ViewManager;
use projview_core::config::{Settings, resolve_config_path};
use tracing::debug;

use crate::error::Result;

/// Load the config named by `--config`, `$PROJVIEW_CONFIG` or the home
/// default, and validate the roots it points at.
pub fn open(config: Option<&Path>) -> Result<ViewManager> {
    let path = resolve_config_path(config, |key| std::env::var(key).ok())?;
    debug!("Using config {}", path.display());

    let settings = Settings::load(&path)?;
    let manager = ViewManager::from_settings(&settings)?;
    debug!(
        "Storage {} | view {} | profile {} | backend {}",
        manager.layout().storage_root().display(),
        manager.layout().view_root().display(),
        manager.layout().profile(),
        manager.backend().mechanism()
    );
    Ok(manager)
}
