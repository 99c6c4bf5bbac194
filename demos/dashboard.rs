// Dashboard shell example
//
// Registers the "trends" module of a nightly-build dashboard, bootstraps the
// application and navigates to the trends page.
//
// Run with:
//   cargo run --example dashboard --features config
//
// Settings may be overridden from the environment, e.g.
//   MODULAR_NAMESPACE=dash cargo run --example dashboard --features config

use async_trait::async_trait;
use modular::logging::{LogConfig, LogFormat, LogLevel, info};
use modular::prelude::*;
use std::sync::Arc;

/// Pretends to inject every asset into the page
struct ConsoleLoader;

#[async_trait]
impl BundleLoader for ConsoleLoader {
    async fn load(&self, files: &[String]) -> Result<()> {
        for file in files {
            info!(file = %file, "Injecting asset");
        }
        Ok(())
    }
}

fn trends_controller() -> Callback {
    Callback::new([ROOT_SCOPE, "ngDialog"], |services| {
        let dialogs = services.get::<String>("ngDialog");
        info!(
            dialog_service = dialogs.as_deref().map(String::as_str).unwrap_or("missing"),
            "Trends controller running"
        );
    })
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _guard = LogConfig::new()
        .level(LogLevel::Info)
        .format(LogFormat::Compact)
        .init()?;

    let config = ConfigService::builder().load_dotenv(None).build()?;
    let mut settings = load_core_settings(&config)?;
    if settings.lazy_modules.is_empty() {
        settings = settings.with_lazy_module(LazyModule::new(
            "ngDialog",
            ["vendor/ngDialog/ngDialog.css", "vendor/ngDialog/ngDialog.js"],
        ));
    }

    let mut app = Application::new(settings);
    app.services()
        .register("ngDialog", "ngDialog service".to_string());

    let trends = app.add_module("trends", "Trends", 1, ModuleSettings::default())?;
    trends
        .add_view(
            ViewParams::new("trends")
                .title("Trends")
                .vendor("ngDialog")
                .controller(trends_controller()),
        )?
        .compile();
    trends.start()?;

    let builds = app.add_module("builds", "Builds", 0, ModuleSettings::default())?;
    builds
        .add_view(ViewParams::new("nightly").title("Nightly"))?
        .compile();
    builds.start()?;

    let mut runtime = app.bootstrap(Arc::new(ConsoleLoader))?;

    runtime.navigate("/trends/trends").await?;
    info!(
        state = runtime.current().unwrap_or("none"),
        title = %runtime.root_scope().title(),
        "Page ready"
    );

    // Unknown URLs land on the fallback, which only exists when declared
    if let Err(e) = runtime.navigate("/nowhere").await {
        info!(error = %e, "No fallback page declared");
    }

    let menu = runtime.root_scope().sorted_menu_items();
    println!("{}", serde_json::to_string_pretty(&menu)?);

    Ok(())
}
