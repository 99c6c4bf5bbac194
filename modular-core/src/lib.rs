// Core library of the modular dashboard framework
// Applications, modules, views and controllers, plus the route resolver

pub mod application;
pub mod controller;
pub mod error;
mod host;
pub mod inspect;
pub mod loader;
pub mod logging;
pub mod menu;
pub mod module;
pub mod resolve;
pub mod router;
pub mod runtime;
pub mod scope;
pub mod services;
pub mod settings;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use application::Application;
pub use controller::{Callback, CallbackFn, Controller, InjectableController};
pub use error::{Error, Result};
pub use loader::AssetLoader;
pub use menu::{Menu, MenuItem, SharedMenuItem};
pub use module::Module;
pub use resolve::{BundleLoader, Dependency, DependencyTable, Resolver};
pub use router::{StateRegistry, StateRouter};
pub use runtime::Runtime;
pub use scope::{ROOT_SCOPE, RootScope};
pub use services::{ServiceRef, ServiceRegistry, Services};
pub use settings::{CoreSettings, LazyModule, ModuleSettings};
pub use state::{ControllerRef, State, StateConfig, Template};
pub use view::{View, ViewParams};
