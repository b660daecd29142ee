use crate::browser::driver::PageDriver;
use crate::catalog::catalog_model::{Catalog, ControlKind, ElementDescriptor};
use crate::preset::fingerprint::config_fingerprint;
use crate::preset::preset_model::{Configuration, SettingValue};
use crate::profile::profile_model::ServiceProfile;
use crate::report::report_model::{FieldOutcome, Report};
use crate::resolver::resolver::resolve;

/// Apply a configuration to the current page, field by field.
///
/// Policy: no-abort. A field that cannot be resolved or whose action fails
/// is recorded and skipped; a UI surface missing 1 of 40 fields must not
/// void the other 39. The catalog is re-discovered after every mutating
/// action because the calculator re-renders freely; descriptors are never
/// reused across a mutation.
///
/// Two fields aliasing to the same control apply in configuration order and
/// the last write wins. That is the author's contract: disambiguate with
/// ordinals when it matters.
pub fn apply(
    driver: &mut dyn PageDriver,
    catalog: Catalog,
    config: &Configuration,
    profile: &ServiceProfile,
    settle_ms: u64,
) -> Report {
    let fingerprint = config_fingerprint(config);
    let mut outcomes = Vec::with_capacity(config.settings.len());
    let mut catalog = catalog;
    let mut stale = false;

    for setting in &config.settings {
        if stale {
            match Catalog::discover(driver) {
                Ok(fresh) => {
                    catalog = fresh;
                    stale = false;
                }
                Err(e) => {
                    outcomes.push(FieldOutcome::apply_error(
                        &setting.field,
                        format!("re-discovery failed: {}", e),
                    ));
                    continue;
                }
            }
        }

        let spec = profile.spec_for(&setting.field, &setting.value);

        let Some(descriptor) = resolve(&catalog, &spec) else {
            // No mutation happened, the catalog is still fresh
            outcomes.push(FieldOutcome::not_found(&setting.field));
            continue;
        };
        let descriptor = descriptor.clone();

        match perform(driver, &descriptor, &setting.value) {
            Ok(mutated) => {
                if mutated {
                    // Give the page a bounded slice to re-render; a failed
                    // settle surfaces on the next re-discovery
                    let _ = driver.settle(settle_ms);
                    stale = true;
                }
                outcomes.push(FieldOutcome::applied(&setting.field));
            }
            Err(detail) => {
                outcomes.push(FieldOutcome::apply_error(&setting.field, detail));
                // The action may have half-happened; treat the page as dirty
                stale = true;
            }
        }
    }

    Report::from_outcomes(&fingerprint, outcomes)
}

/// Perform the kind-appropriate action. Returns whether the page was
/// mutated (a skipped button click is applied but mutates nothing).
fn perform(
    driver: &mut dyn PageDriver,
    descriptor: &ElementDescriptor,
    value: &SettingValue,
) -> Result<bool, String> {
    match descriptor.kind {
        ControlKind::TextInput => {
            driver
                .fill(&descriptor.hint, &value.as_field_text())
                .map_err(|e| e.to_string())?;
            Ok(true)
        }

        ControlKind::Checkbox => {
            let SettingValue::Flag(target) = value else {
                return Err("checkbox field requires a boolean value".to_string());
            };
            driver
                .set_checked(&descriptor.hint, *target)
                .map_err(|e| e.to_string())?;
            Ok(true)
        }

        ControlKind::Select => {
            let option_label = value.as_field_text();
            if !descriptor.options.is_empty() && !descriptor.options.contains(&option_label) {
                return Err(format!(
                    "option '{}' not among [{}]",
                    option_label,
                    descriptor.options.join(", ")
                ));
            }
            driver
                .select_option(&descriptor.hint, &option_label)
                .map_err(|e| e.to_string())?;
            Ok(true)
        }

        ControlKind::Button => {
            if let SettingValue::Flag(false) = value {
                // "don't press" is a valid, applied instruction
                return Ok(false);
            }
            driver.click(&descriptor.hint).map_err(|e| e.to_string())?;
            Ok(true)
        }
    }
}
