use crate::errors::AppError;
use crate::models::CounterData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/counters.json"))
}

/// Loads the counter file, degrading to empty counters on any failure.
/// A corrupt or missing file must never block startup.
pub async fn load_data(path: &Path) -> CounterData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse counter file: {err}");
                CounterData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => CounterData::default(),
        Err(err) => {
            error!("failed to read counter file: {err}");
            CounterData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &CounterData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
