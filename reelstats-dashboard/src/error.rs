/// Errors that can occur while building or writing the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid colour '{0}': expected #rrggbb")]
    InvalidColor(String),
}
