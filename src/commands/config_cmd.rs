//! Config command - show and validate the provider configuration

use gwsync::config::ProviderConfig;
use gwsync::output::{ConfigResult, OutputMode};

/// Print the resolved configuration with secrets masked
///
/// With `check`, exits with status 1 if the configuration cannot be used.
pub fn config(check: bool, mode: OutputMode) -> anyhow::Result<()> {
    let config = ProviderConfig::load()?;
    let validation = check.then(|| config.validate());

    let result = ConfigResult {
        path: ProviderConfig::config_path().display().to_string(),
        config: config.redacted(),
        valid: validation.as_ref().map(Result::is_ok),
        problem: validation.as_ref().and_then(|v| v.as_ref().err()).map(ToString::to_string),
    };
    result.render(mode);

    if result.valid == Some(false) {
        std::process::exit(1);
    }
    Ok(())
}
