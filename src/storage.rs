use crate::errors::AppError;
use crate::models::{EventData, StorageData};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const STORAGE_KEY: &str = "countdown-event";

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

pub async fn load_data(path: &Path) -> StorageData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                StorageData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StorageData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            StorageData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &StorageData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Stored event, or the default when the key is absent or unreadable.
///
/// The default is never written back.
pub fn load_event(data: &StorageData) -> EventData {
    let Some(raw) = data.items.get(STORAGE_KEY).filter(|raw| !raw.is_empty()) else {
        return EventData::default();
    };

    match serde_json::from_str(raw) {
        Ok(event) => event,
        Err(err) => {
            warn!("ignoring malformed stored event: {err}");
            EventData::default()
        }
    }
}

pub fn save_event(data: &mut StorageData, event: &EventData) {
    match serde_json::to_string(event) {
        Ok(raw) => {
            data.items.insert(STORAGE_KEY.to_string(), raw);
        }
        Err(err) => error!("failed to serialize event: {err}"),
    }
}
