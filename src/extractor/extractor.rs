use crate::browser::driver::PageDriver;
use crate::error::EngineError;
use crate::preset::preset_model::Configuration;
use crate::report::report_model::Artifact;

/// Read the shareable URL out of the post-save page state.
///
/// The result may render asynchronously after the save action returns, so
/// the page gets a bounded settle first. Preference order: the confirmation
/// link's text (when the profile names one), then the current page URL —
/// but only if it actually moved off the pre-save URL; an unchanged URL
/// means the save produced nothing navigable.
pub fn extract(
    driver: &mut dyn PageDriver,
    config: &Configuration,
    link_selector: Option<&str>,
    baseline_url: &str,
    settle_ms: u64,
) -> Result<Option<Artifact>, EngineError> {
    driver.settle(settle_ms)?;

    if let Some(selector) = link_selector {
        if let Some(text) = driver.query_text(selector)? {
            let url = text.trim();
            if !url.is_empty() {
                return Ok(Some(artifact(url, config)));
            }
        }
    }

    let url = driver.current_url()?;
    let url = url.trim();
    if url.is_empty() || url == baseline_url {
        return Ok(None);
    }

    Ok(Some(artifact(url, config)))
}

fn artifact(url: &str, config: &Configuration) -> Artifact {
    Artifact {
        url: url.to_string(),
        config_name: config.name.clone(),
        config_description: config.description.clone(),
    }
}
