// Modular - A module and route registry for dashboard shells
//
// This library groups dashboard pages into modules and views, declares their
// routes under one namespace, and resolves each route's lazily loaded
// dependencies in order before its controller runs.

// Re-export core functionality
pub use modular_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use modular_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Application,
        AssetLoader,
        BundleLoader,
        Callback,
        Controller,
        CoreSettings,
        Dependency,
        Error,
        LazyModule,
        MenuItem,
        Module,
        ModuleSettings,
        Result,
        RootScope,
        Runtime,
        StateConfig,
        View,
        ViewParams,
        ROOT_SCOPE,
    };

    #[cfg(feature = "config")]
    pub use modular_config::{ConfigService, load_core_settings};
}
