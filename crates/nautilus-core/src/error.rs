pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parent cycle detected through: {}", node_ids.join(", "))]
    ParentCycle { node_ids: Vec<String> },

    #[error("invalid layout config at `{path}`: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
