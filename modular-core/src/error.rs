// Error types for the modular framework

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicated module name: \"{0}\"")]
    DuplicateModule(String),

    #[error("Duplicated view name \"{view}\" on the module \"{module}\"")]
    DuplicateView { module: String, view: String },

    #[error("State already declared: {0}")]
    DuplicateState(String),

    #[error("State not found: {0}")]
    StateNotFound(String),

    #[error("Cannot activate an abstract state: {0}")]
    AbstractState(String),

    #[error("Controller not found: {0}")]
    ControllerNotFound(String),

    #[error("Unknown service: {0}")]
    ServiceNotFound(String),

    #[error("Cannot find the dependency: \"{0}\"")]
    DependencyNotFound(String),

    #[error("Failed to load bundle: {0}")]
    BundleLoad(String),

    #[error("Resolve step failed: {0}")]
    ResolveStep(String),

    #[error("Module already started: {0}")]
    AlreadyStarted(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors raised while registering modules, views and states.
    ///
    /// These abort construction of the application.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateModule(_)
                | Error::DuplicateView { .. }
                | Error::DuplicateState(_)
                | Error::AlreadyStarted(_)
                | Error::Config(_)
        )
    }

    /// Errors raised while activating a single route.
    ///
    /// These fail the affected route only; other routes stay activatable.
    pub fn is_activation_error(&self) -> bool {
        matches!(
            self,
            Error::StateNotFound(_)
                | Error::AbstractState(_)
                | Error::ControllerNotFound(_)
                | Error::ServiceNotFound(_)
                | Error::DependencyNotFound(_)
                | Error::BundleLoad(_)
                | Error::ResolveStep(_)
        )
    }
}
