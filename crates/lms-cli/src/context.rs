use std::sync::Arc;

use anyhow::Context;
use lms_client::FixtureBackend;
use lms_config::LmsConfig;
use lms_core::ids::SessionToken;
use lms_quiz::SessionOptions;

use crate::cli::GlobalFlags;

/// Everything a command needs to talk to the backend.
pub struct AppContext {
    pub backend: Arc<FixtureBackend>,
    pub token: SessionToken,
    pub options: SessionOptions,
}

impl AppContext {
    pub async fn init(config: LmsConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let token = resolve_token(&config, flags)?;

        let dir = flags
            .fixtures
            .clone()
            .unwrap_or_else(|| config.fixtures.dir.clone());
        let submissions_dir = config
            .fixtures
            .submissions_dir
            .clone()
            .unwrap_or_else(|| dir.join("submissions"));

        let backend = FixtureBackend::from_dir(&dir)
            .await
            .with_context(|| format!("failed to load quizzes from {}", dir.display()))?
            .with_submissions_dir(&submissions_dir)
            .with_context(|| {
                format!(
                    "failed to read submissions from {}",
                    submissions_dir.display()
                )
            })?;
        tracing::debug!(
            quizzes = backend.quiz_ids().len(),
            submissions = backend.submissions().len(),
            "fixture backend ready"
        );

        Ok(Self {
            backend: Arc::new(backend),
            token,
            options: SessionOptions {
                tick_period: config.quiz.tick_period(),
                urgent_threshold_secs: config.quiz.urgent_threshold_secs,
            },
        })
    }
}

fn resolve_token(config: &LmsConfig, flags: &GlobalFlags) -> anyhow::Result<SessionToken> {
    if let Some(token) = flags.token.as_deref().map(str::trim) {
        if !token.is_empty() {
            return Ok(SessionToken::new(token));
        }
    }
    let token = config
        .require_token()
        .context("no session token: pass --token or set LMS_SESSION__TOKEN")?;
    Ok(SessionToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(token: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            token: token.map(str::to_string),
            fixtures: None,
        }
    }

    #[test]
    fn flag_token_overrides_config() {
        let mut config = LmsConfig::default();
        config.session.token = "from-config".into();

        let token = resolve_token(&config, &flags(Some("from-flag"))).unwrap();
        assert_eq!(token.expose(), "from-flag");

        let token = resolve_token(&config, &flags(Some("  "))).unwrap();
        assert_eq!(token.expose(), "from-config");
    }

    #[test]
    fn missing_token_is_an_error() {
        let error = resolve_token(&LmsConfig::default(), &flags(None)).unwrap_err();
        assert!(format!("{error:#}").contains("--token"));
    }

    #[tokio::test]
    async fn init_loads_fixture_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LmsConfig::default();
        config.fixtures.dir = dir.path().to_path_buf();

        let ctx = AppContext::init(config, &flags(Some("t"))).await.unwrap();
        assert!(ctx.backend.quiz_ids().is_empty());
        assert_eq!(ctx.options.urgent_threshold_secs, 300);
    }
}
