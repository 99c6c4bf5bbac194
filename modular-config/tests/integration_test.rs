//! Integration tests for modular-config

use modular_config::*;
use modular_core::LazyModule;
use std::env;
use std::fs;

#[test]
fn test_settings_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modular.toml");
    fs::write(
        &path,
        r#"
        namespace = "dash"
        fallback_url = "/trends"
        common_dependencies = ["moment"]

        [[lazy_modules]]
        name = "ngDialog"
        files = ["vendor/ngDialog.css", "vendor/ngDialog.js"]
        "#,
    )
    .unwrap();

    let service = ConfigService::builder().add_file_auto(&path).build().unwrap();
    let settings = load_core_settings(&service).unwrap();

    assert_eq!(settings.namespace, "dash");
    assert_eq!(settings.fallback_url, "/trends");
    assert_eq!(settings.common_dependencies, vec!["moment"]);
    assert_eq!(
        settings.lazy_modules,
        vec![LazyModule::new(
            "ngDialog",
            ["vendor/ngDialog.css", "vendor/ngDialog.js"]
        )]
    );
    assert_eq!(settings.view_icon, "fa fa-laptop");
}

#[test]
fn test_later_files_override_earlier_ones() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.json");
    let local = dir.path().join("local.json");
    fs::write(&base, r#"{"namespace": "app", "modules_dir": "src/modules"}"#).unwrap();
    fs::write(&local, r#"{"namespace": "local"}"#).unwrap();

    let service = ConfigService::builder()
        .add_file(&base, FileFormat::Json)
        .add_file(&local, FileFormat::Json)
        .build()
        .unwrap();
    let settings = load_core_settings(&service).unwrap();

    assert_eq!(settings.namespace, "local");
    assert_eq!(settings.modules_dir, "src/modules");
}

#[test]
fn test_invalid_settings_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modular.json");
    fs::write(
        &path,
        r#"{"lazy_modules": [
            {"name": "ngDialog", "files": ["a.js"]},
            {"name": "ngDialog", "files": ["b.js"]}
        ]}"#,
    )
    .unwrap();

    let service = ConfigService::builder()
        .add_file(&path, FileFormat::Json)
        .build()
        .unwrap();
    let err = load_core_settings(&service).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));

    let core: modular_core::Error = err.into();
    assert!(core.is_configuration_error());
}

#[test]
fn test_non_table_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modular.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let result = ConfigService::builder()
        .add_file(&path, FileFormat::Json)
        .build();
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_environment_overrides_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modular.json");
    fs::write(&path, r#"{"namespace": "app", "fallback_url": "/"}"#).unwrap();

    unsafe {
        env::set_var("MODTEST_ENV_NAMESPACE", "envdash");
        env::set_var("MODTEST_ENV_COMMON_DEPENDENCIES", "moment,charts");
    }

    let service = ConfigService::builder()
        .with_prefix("MODTEST_ENV".to_string())
        .add_file(&path, FileFormat::Json)
        .load_env()
        .build()
        .unwrap();
    let settings = load_core_settings(&service).unwrap();

    assert_eq!(settings.namespace, "envdash");
    assert_eq!(settings.common_dependencies, vec!["moment", "charts"]);
    assert_eq!(settings.fallback_url, "/");

    unsafe {
        env::remove_var("MODTEST_ENV_NAMESPACE");
        env::remove_var("MODTEST_ENV_COMMON_DEPENDENCIES");
    }
}

#[test]
fn test_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "MODTEST_DOTENV_VIEW_ICON=\"fa fa-chart\"\n").unwrap();

    let service = ConfigService::builder()
        .with_prefix("MODTEST_DOTENV".to_string())
        .load_dotenv(Some(path.to_string_lossy().into_owned()))
        .build()
        .unwrap();

    assert_eq!(service.get_string("view_icon").unwrap(), "fa fa-chart");
    assert_eq!(load_core_settings(&service).unwrap().view_icon, "fa fa-chart");

    unsafe {
        env::remove_var("MODTEST_DOTENV_VIEW_ICON");
    }
}

#[test]
fn test_env_loader_with_prefix() {
    let loader = EnvLoader::new(Some("MODTEST_LOADER".to_string()));

    unsafe {
        env::set_var("MODTEST_LOADER_NAMESPACE", "loaded");
    }

    assert_eq!(loader.load_var("namespace").unwrap(), "loaded");
    assert_eq!(
        loader.load().unwrap().get("namespace").map(String::as_str),
        Some("loaded")
    );

    unsafe {
        env::remove_var("MODTEST_LOADER_NAMESPACE");
    }
}
