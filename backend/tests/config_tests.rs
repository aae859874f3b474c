mod support;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use class_grid::config::{AppConfig, CONFIG_FILE_NAME};
use class_grid::db::{PreferenceRepository, RepositoryError, RepositoryFactory, RepositoryType};
use support::{with_scoped_env, CLEAN_ENV};

fn env_with<'a>(extra: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, Option<&'a str>)> {
    let mut env: Vec<(&'a str, Option<&'a str>)> = CLEAN_ENV.to_vec();
    env.extend_from_slice(extra);
    env
}

#[test]
fn test_no_env_keeps_file_values() {
    with_scoped_env(&CLEAN_ENV, || {
        let mut config = AppConfig::from_toml_str("[presence]\ntick_seconds = 5\n").unwrap();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.presence.period(), Duration::from_secs(5));
        assert_eq!(config.repository.repository_type().unwrap(), RepositoryType::Local);
    });
}

#[test]
fn test_env_overrides_file() {
    let env = env_with(&[
        ("GRID_DATASET", Some("/srv/horarios.json")),
        ("PREFERENCES_REPOSITORY", Some("file")),
        ("PREFERENCES_PATH", Some("/tmp/colors.json")),
        ("PRESENCE_TICK_SECONDS", Some(" 15 ")),
    ]);

    with_scoped_env(&env, || {
        let mut config = AppConfig::from_toml_str(
            "[dataset]\npath = \"other.json\"\n[repository]\ntype = \"local\"\n",
        )
        .unwrap();
        config.apply_env_overrides().unwrap();

        assert_eq!(config.dataset.path, PathBuf::from("/srv/horarios.json"));
        assert_eq!(config.repository.repository_type().unwrap(), RepositoryType::File);
        assert_eq!(
            config.repository.file_path().unwrap(),
            Some(Path::new("/tmp/colors.json"))
        );
        assert_eq!(config.presence.tick_seconds, 15);
    });
}

#[test]
fn test_preferences_path_alone_selects_file_repository() {
    with_scoped_env(&env_with(&[("PREFERENCES_PATH", Some("prefs.json"))]), || {
        let mut config = AppConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.repository.repository_type().unwrap(), RepositoryType::File);
        assert_eq!(RepositoryType::from_env().unwrap(), RepositoryType::File);
    });
}

#[test]
fn test_explicit_local_wins_over_path() {
    let env = env_with(&[
        ("PREFERENCES_REPOSITORY", Some("local")),
        ("PREFERENCES_PATH", Some("prefs.json")),
    ]);
    with_scoped_env(&env, || {
        let mut config = AppConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.repository.repository_type().unwrap(), RepositoryType::Local);
        assert!(RepositoryFactory::from_repository_config(&config.repository).is_ok());
    });
}

#[test]
fn test_invalid_tick_is_an_error() {
    with_scoped_env(&env_with(&[("PRESENCE_TICK_SECONDS", Some("soon"))]), || {
        let mut config = AppConfig::default();
        let err = config.apply_env_overrides().unwrap_err();
        assert!(err.to_string().contains("PRESENCE_TICK_SECONDS"));
    });
}

#[test]
fn test_file_repository_without_path_is_rejected() {
    let config = AppConfig::from_toml_str("[repository]\ntype = \"file\"\n").unwrap();
    assert!(RepositoryFactory::from_repository_config(&config.repository).is_err());
}

#[test]
fn test_from_file_builds_working_repository() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &config_path,
        format!(
            "[repository]\ntype = \"file\"\npath = {:?}\nkey = \"colors\"\n",
            prefs.to_str().unwrap()
        ),
    )
    .unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    assert_eq!(config.repository.key, "colors");

    let repo = RepositoryFactory::from_repository_config(&config.repository).unwrap();
    repo.set("colors", "{}").unwrap();
    assert!(prefs.exists());
}

#[test]
fn test_misspelled_repository_type_is_rejected() {
    let env = env_with(&[
        ("PREFERENCES_REPOSITORY", Some("fiel")),
        ("PREFERENCES_PATH", Some("prefs.json")),
    ]);
    with_scoped_env(&env, || {
        let err = RepositoryType::from_env().unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
        assert!(err.to_string().contains("fiel"));
        assert!(RepositoryFactory::from_env().is_err());
    });
}
