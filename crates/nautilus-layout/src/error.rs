use nautilus_core::ContainerKey;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown layout engine: {name}")]
    UnknownEngine { name: String },

    #[error("layout engine `{engine}` failed for container `{container}`: {message}")]
    Engine {
        engine: String,
        container: ContainerKey,
        message: String,
    },

    /// Raised inside a request when its token is cancelled; the public entry points turn it into
    /// [`crate::LayoutOutcome::Cancelled`].
    #[error("layout request cancelled")]
    Cancelled,

    #[error(transparent)]
    Core(#[from] nautilus_core::Error),
}
