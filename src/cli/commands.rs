use std::error::Error;
use std::path::Path;

use crate::browser::session::BrowserSession;
use crate::cli::config::{build_navigator_config, AppConfig};
use crate::error::FailureKind;
use crate::navigator::navigator::{Navigator, NavigatorConfig};
use crate::preset::fingerprint::config_fingerprint;
use crate::preset::loader::{find_preset, load_preset, load_presets};
use crate::preset::preset_model::Configuration;
use crate::profile::loader::load_profile;
use crate::profile::profile_model::ServiceProfile;
use crate::report::console::{format_batch, format_run_summary};
use crate::report::report_model::{Report, RunFailure, RunSummary};
use crate::trace::logger::TraceLogger;

// ============================================================================
// run subcommand
// ============================================================================

/// Run one preset. Returns whether the run succeeded.
pub fn cmd_run(
    preset: &str,
    presets_dir: Option<&str>,
    profile_path: Option<&str>,
    headed: bool,
    output: Option<&str>,
    format: &str,
    verify_url: bool,
    config: &AppConfig,
    verbose: u8,
) -> Result<bool, Box<dyn Error>> {
    let configuration = resolve_preset(preset, presets_dir, config)?;
    let profile = resolve_profile(profile_path, config)?;
    let nav_config = build_navigator_config(config);
    let tracer = TraceLogger::new(&config.trace_file);

    if verbose > 0 {
        eprintln!(
            "Running preset '{}' against {} ({} settings)...",
            configuration.name,
            profile.service,
            configuration.settings.len()
        );
    }

    let summary = run_one(&configuration, &profile, &nav_config, &tracer, !headed, verbose);

    let mut succeeded = summary.succeeded;

    if verify_url && succeeded {
        if let Some(ref artifact) = summary.artifact {
            if let Err(e) = verify_artifact_url(&artifact.url) {
                eprintln!("Artifact URL did not verify: {}", e);
                succeeded = false;
            } else if verbose > 0 {
                eprintln!("Artifact URL verified: {}", artifact.url);
            }
        }
    }

    // Persist the artifact URL when asked to
    if let (Some(path), Some(artifact)) = (output, summary.artifact.as_ref()) {
        std::fs::write(path, format!("{}\n", artifact.url))?;
    }

    let content = match format {
        "json" => serde_json::to_string_pretty(&summary)?,
        _ => format_run_summary(&summary),
    };
    print!("{}", content);

    Ok(succeeded)
}

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list(presets_dir: Option<&str>, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let dir = presets_dir.unwrap_or(&config.presets_dir);
    let presets = load_presets(Path::new(dir))?;

    if presets.is_empty() {
        println!("No presets found in {}/", dir);
        return Ok(());
    }

    for preset in &presets {
        let cost = preset.estimated_cost.as_deref().unwrap_or("-");
        println!(
            "{:<30} {:<10} {}",
            preset.name, cost, preset.description
        );
    }
    println!("\n{} presets in {}/", presets.len(), dir);

    Ok(())
}

// ============================================================================
// run-all subcommand
// ============================================================================

/// Run every preset in the directory. Returns whether all runs succeeded.
pub fn cmd_run_all(
    presets_dir: Option<&str>,
    profile_path: Option<&str>,
    headed: bool,
    parallel: bool,
    format: &str,
    output: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<bool, Box<dyn Error>> {
    let dir = presets_dir.unwrap_or(&config.presets_dir);
    let presets = load_presets(Path::new(dir))?;

    if presets.is_empty() {
        eprintln!("No presets found in {}/", dir);
        return Ok(true);
    }

    let profile = resolve_profile(profile_path, config)?;
    let nav_config = build_navigator_config(config);
    let tracer = TraceLogger::new(&config.trace_file);
    let headless = !headed;

    if verbose > 0 {
        eprintln!("Running {} presets against {}...", presets.len(), profile.service);
    }

    let summaries: Vec<RunSummary> = if parallel {
        // Independent sessions, mutually unaware; results joined in preset
        // order
        std::thread::scope(|scope| {
            let handles: Vec<_> = presets
                .iter()
                .map(|preset| {
                    let profile = &profile;
                    let nav_config = &nav_config;
                    let tracer = &tracer;
                    scope.spawn(move || {
                        run_one(preset, profile, nav_config, tracer, headless, 0)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().map_err(|_| "run worker panicked"))
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        presets
            .iter()
            .map(|preset| run_one(preset, &profile, &nav_config, &tracer, headless, verbose))
            .collect()
    };

    let all_succeeded = summaries.iter().all(|s| s.succeeded);

    let content = match format {
        "json" => serde_json::to_string_pretty(&summaries)?,
        _ => format_batch(&summaries),
    };

    match output {
        Some(path) => std::fs::write(path, &content)?,
        None => print!("{}", content),
    }

    Ok(all_succeeded)
}

// ============================================================================
// Helpers
// ============================================================================

/// Run one configuration in its own browser session. A session that fails
/// to launch becomes a session-level run failure rather than an error, so
/// batch runs keep going.
fn run_one(
    configuration: &Configuration,
    profile: &ServiceProfile,
    nav_config: &NavigatorConfig,
    tracer: &TraceLogger,
    headless: bool,
    verbose: u8,
) -> RunSummary {
    if verbose > 0 {
        eprintln!("  Running: {}", configuration.name);
    }

    let result = match BrowserSession::launch(headless) {
        Ok(mut session) => {
            let navigator = Navigator::new(profile, nav_config.clone(), tracer);
            let result = navigator.run(&mut session, configuration);
            let _ = session.quit();
            result
        }
        Err(e) => Err(RunFailure {
            kind: FailureKind::Session(e),
            partial_report: Report::empty(&config_fingerprint(configuration)),
        }),
    };

    RunSummary::from_result(&configuration.name, &profile.service, &result)
}

/// Preset argument: a path to a JSON file, or a name looked up in the
/// presets directory.
fn resolve_preset(
    preset: &str,
    presets_dir: Option<&str>,
    config: &AppConfig,
) -> Result<Configuration, Box<dyn Error>> {
    let as_path = Path::new(preset);
    if as_path.extension().map_or(false, |e| e == "json") && as_path.is_file() {
        return load_preset(as_path);
    }
    let dir = presets_dir.unwrap_or(&config.presets_dir);
    find_preset(Path::new(dir), preset)
}

fn resolve_profile(
    profile_path: Option<&str>,
    config: &AppConfig,
) -> Result<ServiceProfile, Box<dyn Error>> {
    let path = profile_path
        .or(config.profile.as_deref())
        .ok_or("No service profile given (use --profile or set 'profile' in calc-autofill.yaml)")?;
    load_profile(Path::new(path))
}

/// GET the artifact URL and require a 2xx answer.
fn verify_artifact_url(url: &str) -> Result<(), String> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .get(url)
        .send()
        .map_err(|e| format!("request failed: {}", e))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("server answered {}", response.status()))
    }
}
