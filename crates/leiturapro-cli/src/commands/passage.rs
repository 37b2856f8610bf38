//! The `leiturapro passage` command.

use std::path::PathBuf;

use anyhow::Result;

use leiturapro_core::advisor::PedagogyAdvisor;
use leiturapro_core::classroom::{Classroom, PASSAGE_RETRY_MESSAGE};
use leiturapro_core::error::AdvisorError;
use leiturapro_providers::config::load_config_from;
use leiturapro_providers::create_model;

use super::analyze::print_sources;

pub async fn execute(grade: String, topic: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let model = create_model(&config.gemini)?;
    let advisor = PedagogyAdvisor::new(model);

    let mut classroom = Classroom::new();
    let passage = classroom
        .request_passage(&advisor, &grade, &topic)
        .await
        .map_err(passage_failure)?;

    println!("{}", passage.to_plain_text());
    print_sources(&passage.sources);

    Ok(())
}

/// Wrap a passage failure in the retry message, plus a hint when the
/// provider says what to do next.
fn passage_failure(error: AdvisorError) -> anyhow::Error {
    let hint = failure_hint(&error);
    let mut err = anyhow::Error::new(error);
    if let Some(hint) = hint {
        err = err.context(hint);
    }
    err.context(PASSAGE_RETRY_MESSAGE)
}

fn failure_hint(error: &AdvisorError) -> Option<String> {
    let provider = error.provider_error()?;
    if provider.is_permanent() {
        return Some("check the API key and model in leiturapro.toml".to_string());
    }
    provider
        .retry_after_ms()
        .map(|ms| format!("rate limited, try again in {}s", ms.div_ceil(1000)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leiturapro_core::error::ProviderError;

    #[test]
    fn permanent_failures_point_at_config() {
        let err = AdvisorError::Provider(ProviderError::AuthenticationFailed("bad".into()).into());
        assert_eq!(
            failure_hint(&err).as_deref(),
            Some("check the API key and model in leiturapro.toml")
        );
    }

    #[test]
    fn rate_limit_reports_wait() {
        let err = AdvisorError::Provider(
            ProviderError::RateLimited {
                retry_after_ms: 7000,
            }
            .into(),
        );
        assert_eq!(
            failure_hint(&err).as_deref(),
            Some("rate limited, try again in 7s")
        );
    }

    #[test]
    fn transient_and_parse_failures_have_no_hint() {
        let timeout = AdvisorError::Provider(ProviderError::Timeout(60).into());
        assert!(failure_hint(&timeout).is_none());
        assert!(failure_hint(&AdvisorError::EmptyResponse).is_none());
    }

    #[test]
    fn failure_message_leads_with_retry_text() {
        let err = passage_failure(AdvisorError::Provider(
            ProviderError::ModelNotFound("gemini-x".into()).into(),
        ));
        let rendered = format!("{err:#}");
        assert!(rendered.starts_with(PASSAGE_RETRY_MESSAGE));
        assert!(rendered.contains("check the API key"));
        assert!(rendered.contains("model not found: gemini-x"));
    }
}
