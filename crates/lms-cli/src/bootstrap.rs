use lms_config::LmsConfig;

/// Load layered configuration, picking up a `.env` file in the working
/// directory first.
pub fn load_config() -> anyhow::Result<LmsConfig> {
    let config = LmsConfig::load_with_dotenv()?;
    tracing::debug!(
        fixtures = %config.fixtures.dir.display(),
        tick_millis = config.quiz.tick_millis,
        token_configured = config.session.is_configured(),
        "configuration loaded"
    );
    Ok(config)
}
