//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lms_config::{ConfigError, LmsConfig};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[session]
token = "tok-from-toml"

[quiz]
tick_millis = 250
urgent_threshold_secs = 120

[fixtures]
dir = "quizzes"
submissions_dir = "out"
"#,
        )?;

        let config: LmsConfig = Figment::from(Serialized::defaults(LmsConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.session.token, "tok-from-toml");
        assert_eq!(config.quiz.tick_millis, 250);
        assert_eq!(config.quiz.urgent_threshold_secs, 120);
        assert_eq!(config.fixtures.dir, PathBuf::from("quizzes"));
        assert_eq!(config.fixtures.submissions_dir, Some(PathBuf::from("out")));
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lms")?;
        jail.create_file(".lms/config.toml", "[quiz]\nurgent_threshold_secs = 60\n")?;

        let config = LmsConfig::load().expect("config loads");
        assert_eq!(config.quiz.urgent_threshold_secs, 60);
        assert_eq!(config.quiz.tick_millis, 1000);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lms")?;
        jail.create_file(".lms/config.toml", "[session]\ntoken = \"from-file\"\n")?;
        jail.set_env("LMS_SESSION__TOKEN", "from-env");

        let config = LmsConfig::load().expect("config loads");
        assert_eq!(config.require_token().expect("token set"), "from-env");
        Ok(())
    });
}

#[test]
fn env_nested_keys_split_on_double_underscore() {
    Jail::expect_with(|jail| {
        jail.set_env("LMS_QUIZ__TICK_MILLIS", "10");

        let config: LmsConfig = Figment::from(Serialized::defaults(LmsConfig::default()))
            .merge(Env::prefixed("LMS_").split("__"))
            .extract()?;
        assert_eq!(config.quiz.tick_millis, 10);
        Ok(())
    });
}

#[test]
fn invalid_tick_fails_load() {
    Jail::expect_with(|jail| {
        jail.set_env("LMS_QUIZ__TICK_MILLIS", "0");

        let result = LmsConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
