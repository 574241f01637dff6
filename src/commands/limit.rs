//! Limit command - parse and canonicalize rate-limit expressions

use gwsync::core::models::RateLimit;
use gwsync::output::{LimitInfo, LimitResult, OutputMode};

/// Parse each expression and print its canonical form
///
/// Exits with status 1 if any expression is rejected.
pub fn limit(expressions: &[String], mode: OutputMode) -> anyhow::Result<()> {
    let limits = expressions
        .iter()
        .map(|input| match RateLimit::parse(input) {
            Ok(limit) => LimitInfo {
                input: input.clone(),
                canonical: Some(limit.canonicalize()),
                error: None,
            },
            Err(e) => LimitInfo {
                input: input.clone(),
                canonical: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    let result = LimitResult { limits };
    result.render(mode);

    if !result.all_valid() {
        std::process::exit(1);
    }
    Ok(())
}
