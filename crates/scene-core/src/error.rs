use thiserror::Error;

/// Errors raised by the scene core.
///
/// `BinderAlreadyConstructed` and `UnknownParameter` indicate lifecycle or
/// wiring mistakes; callers are expected to let them abort initialization
/// rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("unknown shading parameter `{0}`")]
    UnknownParameter(String),

    #[error("shading parameter `{field}` expects a {expected} value")]
    ParameterType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("control panel binder was already constructed for this scene")]
    BinderAlreadyConstructed,

    #[error("control panel requested before load completion")]
    PanelNotDue,

    #[error("asset load tracker is already active; register assets before activation")]
    TrackerActivated,

    #[error("failed to decode asset `{url}`: {reason}")]
    AssetDecode { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// A single asset fetch that did not produce a usable hierarchy.
///
/// Recoverable: the tracker counts it toward completion and logs it; the
/// scene simply never receives the entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("asset `{url}` failed to load: {reason}")]
pub struct AssetLoadFailure {
    pub url: String,
    pub reason: String,
}

impl AssetLoadFailure {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<SceneError> for AssetLoadFailure {
    fn from(err: SceneError) -> Self {
        match err {
            SceneError::AssetDecode { url, reason } => Self { url, reason },
            other => Self {
                url: String::new(),
                reason: other.to_string(),
            },
        }
    }
}
