// Tests for route activation: resolve ordering, controllers and navigation

use async_trait::async_trait;
use modular_core::{
    Application, BundleLoader, Callback, Controller, CoreSettings, Dependency, Error, LazyModule,
    ModuleSettings, Result, RootScope, StateConfig, ViewParams, ROOT_SCOPE,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

type Log = Arc<Mutex<Vec<String>>>;

/// Records every load request into a shared log
struct RecordingLoader {
    log: Log,
}

#[async_trait]
impl BundleLoader for RecordingLoader {
    async fn load(&self, files: &[String]) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.log.lock().push(format!("load:{}", files.join(",")));
        Ok(())
    }
}

fn settings() -> CoreSettings {
    CoreSettings::default()
        .with_lazy_module(LazyModule::new(
            "ngDialog",
            ["vendor/ngDialog.css", "vendor/ngDialog.js"],
        ))
        .with_lazy_module(LazyModule::new("vendorX", ["vendor/x.js"]))
}

fn recording(log: &Log) -> Arc<dyn BundleLoader> {
    Arc::new(RecordingLoader { log: log.clone() })
}

fn logging_step(log: &Log, label: &'static str, delay_ms: u64) -> Dependency {
    let log = log.clone();
    Dependency::step(move || {
        let log = log.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            log.lock().push(label.to_string());
            Ok(())
        }
    })
}

fn logging_controller(log: &Log) -> Controller {
    let log = log.clone();
    let mut controller = Controller::new();
    controller.add(Callback::new(Vec::<String>::new(), move |_| {
        log.lock().push("controller".to_string());
    }));
    controller
}

#[tokio::test]
async fn test_resolve_runs_in_declared_order_before_controller() {
    let log: Log = Arc::default();
    let app = Application::new(settings());
    app.add_state(
        "sequence",
        StateConfig::default()
            .url("/sequence")
            .controller(logging_controller(&log).injectable())
            .resolve(vec![
                logging_step(&log, "A", 20),
                "vendorX".into(),
                logging_step(&log, "B", 1),
            ]),
    );

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    runtime.activate("app.sequence").await.unwrap();

    assert_eq!(
        *log.lock(),
        vec!["A", "load:vendor/x.js", "B", "controller"]
    );
    assert_eq!(runtime.current(), Some("app.sequence"));
}

#[tokio::test]
async fn test_failing_step_stops_the_chain() {
    let log: Log = Arc::default();
    let app = Application::new(settings());
    app.add_state(
        "broken",
        StateConfig::default()
            .url("/broken")
            .controller(logging_controller(&log).injectable())
            .resolve(vec![
                Dependency::step(|| async { Err(Error::ResolveStep("offline".into())) }),
                "vendorX".into(),
            ]),
    );

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    let err = runtime.activate("app.broken").await.unwrap_err();

    assert!(matches!(err, Error::ResolveStep(_)));
    assert!(log.lock().is_empty());
    assert_eq!(runtime.current(), None);
}

type ScopeCell = Arc<Mutex<Option<Arc<RootScope>>>>;

/// Step that records how many resolutions the root scope sees in flight
fn pending_step(log: &Log, scope: &ScopeCell, fail: bool) -> Dependency {
    let log = log.clone();
    let scope = scope.clone();
    Dependency::step(move || {
        let pending = scope
            .lock()
            .as_ref()
            .map(|scope| scope.pending_requests())
            .unwrap_or_default();
        log.lock().push(format!("pending:{}", pending));
        async move {
            if fail {
                Err(Error::ResolveStep("offline".into()))
            } else {
                Ok(())
            }
        }
    })
}

#[tokio::test]
async fn test_pending_requests_track_resolution() {
    let log: Log = Arc::default();
    let scope: ScopeCell = Arc::default();
    let app = Application::new(settings());
    app.add_state(
        "ok",
        StateConfig::default()
            .url("/ok")
            .resolve(vec![pending_step(&log, &scope, false)]),
    );
    app.add_state(
        "failing",
        StateConfig::default()
            .url("/failing")
            .resolve(vec![pending_step(&log, &scope, true)]),
    );

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    *scope.lock() = Some(runtime.root_scope().clone());
    assert_eq!(runtime.root_scope().pending_requests(), 0);

    runtime.activate("app.ok").await.unwrap();
    assert_eq!(runtime.root_scope().pending_requests(), 0);

    runtime.activate("app.failing").await.unwrap_err();
    assert_eq!(runtime.root_scope().pending_requests(), 0);

    assert_eq!(*log.lock(), vec!["pending:1", "pending:1"]);
}

#[tokio::test]
async fn test_unknown_dependency_fails_only_that_route() {
    let log: Log = Arc::default();
    let mut app = Application::new(settings());
    let trends = app
        .add_module("trends", "Trends", 1, ModuleSettings::default())
        .unwrap();
    trends
        .add_view(ViewParams::new("good").vendor("ngDialog"))
        .unwrap()
        .compile();
    trends
        .add_view(ViewParams::new("bad").vendor("missingVendor"))
        .unwrap()
        .compile();

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    runtime.activate("app.trends.good").await.unwrap();

    let err = runtime.activate("app.trends.bad").await.unwrap_err();
    assert!(matches!(err, Error::DependencyNotFound(name) if name == "missingVendor"));
    assert_eq!(runtime.current(), Some("app.trends.good"));

    runtime.activate("app.trends.good").await.unwrap();
    assert_eq!(
        *log.lock(),
        vec![
            "load:vendor/ngDialog.css,vendor/ngDialog.js",
            "load:vendor/ngDialog.css,vendor/ngDialog.js"
        ]
    );
}

#[tokio::test]
async fn test_view_activation_sets_title_then_runs_callback() {
    let log: Log = Arc::default();
    let mut app = Application::new(settings());
    let trends = app
        .add_module("trends", "Trends", 1, ModuleSettings::default())
        .unwrap();

    let seen = log.clone();
    trends
        .add_view(
            ViewParams::new("trends")
                .title("Trends")
                .vendor("ngDialog")
                .controller(Callback::new([ROOT_SCOPE], move |services| {
                    let scope = services.get::<RootScope>(ROOT_SCOPE);
                    let title = scope.map(|s| s.title()).unwrap_or_default();
                    seen.lock().push(format!("title:{}", title));
                })),
        )
        .unwrap()
        .compile();
    trends.start().unwrap();

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    runtime.activate("app.trends.trends").await.unwrap();

    assert_eq!(runtime.root_scope().title(), "Trends - Trends - ");
    assert_eq!(
        *log.lock(),
        vec![
            "load:vendor/ngDialog.css,vendor/ngDialog.js",
            "title:Trends - Trends - "
        ]
    );
}

#[tokio::test]
async fn test_controller_receives_registered_services() {
    let log: Log = Arc::default();
    let app = Application::new(settings());
    app.services().register("apiBase", "/db".to_string());

    let seen = log.clone();
    let mut controller = Controller::new();
    controller.add(Callback::from_source(
        "function (services) { services.apiBase.length; }",
        move |services| {
            let base = services.get::<String>("apiBase");
            seen.lock().push(format!("base:{}", base.map(|b| b.to_string()).unwrap_or_default()));
        },
    ));
    app.add_state(
        "api",
        StateConfig::default()
            .url("/api")
            .controller(controller.injectable()),
    );

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    runtime.activate("app.api").await.unwrap();
    assert_eq!(*log.lock(), vec!["base:/db"]);
}

#[tokio::test]
async fn test_missing_service_fails_activation() {
    let log: Log = Arc::default();
    let app = Application::new(settings());
    let mut controller = Controller::new();
    controller.add(Callback::new(["$http"], |_| {}));
    app.add_state(
        "http",
        StateConfig::default()
            .url("/http")
            .controller(controller.injectable()),
    );

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    let err = runtime.activate("app.http").await.unwrap_err();
    assert!(matches!(err, Error::ServiceNotFound(name) if name == "$http"));
}

#[tokio::test]
async fn test_named_controller_lookup() {
    let log: Log = Arc::default();
    let mut app = Application::new(settings());
    app.register_controller(
        "ReportsSummaryViewController",
        logging_controller(&log).injectable(),
    );
    let reports = app
        .add_module("reports", "Reports", 2, ModuleSettings::default())
        .unwrap();
    reports
        .add_state(StateConfig::new("reports.summary_view"))
        .add_state(StateConfig::new("reports.detail"));
    reports.start().unwrap();

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    runtime.activate("app.reports.summary_view").await.unwrap();
    assert_eq!(*log.lock(), vec!["controller"]);

    let err = runtime.activate("app.reports.detail").await.unwrap_err();
    assert!(matches!(err, Error::ControllerNotFound(name) if name == "ReportsDetailController"));
    assert_eq!(runtime.current(), Some("app.reports.summary_view"));
}

#[tokio::test]
async fn test_abstract_and_unknown_states_cannot_be_activated() {
    let log: Log = Arc::default();
    let mut app = Application::new(settings());
    app.add_module("trends", "Trends", 1, ModuleSettings::default())
        .unwrap();

    let mut runtime = app.bootstrap(recording(&log)).unwrap();
    assert!(matches!(
        runtime.activate("app.trends").await,
        Err(Error::AbstractState(_))
    ));
    assert!(matches!(
        runtime.activate("app.nowhere").await,
        Err(Error::StateNotFound(_))
    ));
}

#[tokio::test]
async fn test_navigate_by_url_and_fallback() {
    let log: Log = Arc::default();
    let mut app = Application::new(settings());
    app.add_state("home", StateConfig::default().url("/"));
    let trends = app
        .add_module("trends", "Trends", 1, ModuleSettings::default())
        .unwrap();
    trends.add_view(ViewParams::new("trends")).unwrap().compile();

    let mut runtime = app.bootstrap(recording(&log)).unwrap();

    runtime.navigate("/trends/trends/").await.unwrap();
    assert_eq!(runtime.current(), Some("app.trends.trends"));

    runtime.navigate("/does/not/exist").await.unwrap();
    assert_eq!(runtime.current(), Some("app.home"));
}

#[tokio::test]
async fn test_navigate_without_fallback_state() {
    let log: Log = Arc::default();
    let app = Application::new(settings());
    let mut runtime = app.bootstrap(recording(&log)).unwrap();

    assert!(matches!(
        runtime.navigate("/missing").await,
        Err(Error::StateNotFound(url)) if url == "/missing"
    ));
}
