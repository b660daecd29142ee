use crate::applier::applier::apply;
use crate::browser::driver::{wait_until_visible, PageDriver};
use crate::catalog::catalog_model::{Catalog, ControlKind};
use crate::error::{EngineError, FailureKind};
use crate::extractor::extractor::extract;
use crate::navigator::stage::Stage;
use crate::preset::fingerprint::config_fingerprint;
use crate::preset::preset_model::Configuration;
use crate::profile::profile_model::ServiceProfile;
use crate::report::report_model::{Report, RunFailure, RunResult, RunSuccess};
use crate::resolver::field_spec::FieldSpec;
use crate::resolver::resolver::resolve;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Wait bounds and pacing for one run. All waits are deadline-bounded
/// polls; a lapsed wait is a stage-local failure, never a silent success.
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Catalog surface the run starts from.
    pub calculator_url: String,
    /// Deadline for the configuration form to appear after selecting the
    /// service.
    pub config_page_timeout_ms: u64,
    /// Deadline for the save confirmation to appear.
    pub save_timeout_ms: u64,
    /// Poll interval inside bounded waits.
    pub poll_interval_ms: u64,
    /// Settle slice after each mutating action.
    pub settle_ms: u64,
    /// Settle slice before reading the post-save result.
    pub result_settle_ms: u64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        NavigatorConfig {
            calculator_url: "https://calculator.aws/#/addService".to_string(),
            config_page_timeout_ms: 15_000,
            save_timeout_ms: 10_000,
            poll_interval_ms: 250,
            settle_ms: 300,
            result_settle_ms: 500,
        }
    }
}

/// Drives one configuration run through its stages:
/// Init → ServiceSearch → ServiceSelected → ConfigPageReady →
/// FieldsApplied → Saved → Exported, with Failed reachable from every
/// stage.
///
/// One navigator owns one session for the duration of a run; nothing here
/// is ever applied concurrently, because the calculator's rendering is not
/// safe for concurrent mutation.
pub struct Navigator<'a> {
    profile: &'a ServiceProfile,
    config: NavigatorConfig,
    tracer: &'a TraceLogger,
}

impl<'a> Navigator<'a> {
    pub fn new(profile: &'a ServiceProfile, config: NavigatorConfig, tracer: &'a TraceLogger) -> Self {
        Navigator {
            profile,
            config,
            tracer,
        }
    }

    /// Run the full state machine for one configuration.
    pub fn run(&self, driver: &mut dyn PageDriver, configuration: &Configuration) -> RunResult {
        let run = configuration.name.as_str();
        let fingerprint = config_fingerprint(configuration);

        self.trace(run, Stage::Init);

        // Init → ServiceSearch: open the catalog surface
        if let Err(e) = driver.navigate(&self.config.calculator_url) {
            return self.fail(run, FailureKind::Session(e), Report::empty(&fingerprint));
        }
        self.trace(run, Stage::ServiceSearch);

        // ServiceSearch → ServiceSelected: candidate names, in order
        match self.select_service(driver) {
            Ok(true) => self.trace(run, Stage::ServiceSelected),
            Ok(false) => {
                return self.fail(
                    run,
                    FailureKind::ServiceNotFound {
                        service: self.profile.service.clone(),
                    },
                    Report::empty(&fingerprint),
                );
            }
            Err(e) => return self.fail(run, FailureKind::Session(e), Report::empty(&fingerprint)),
        }

        // ServiceSelected → ConfigPageReady: bounded wait for the form
        match wait_until_visible(
            driver,
            &self.profile.config_ready_selector,
            self.config.config_page_timeout_ms,
            self.config.poll_interval_ms,
        ) {
            Ok(true) => self.trace(run, Stage::ConfigPageReady),
            Ok(false) => {
                return self.fail(
                    run,
                    FailureKind::NavigationTimeout {
                        waited_ms: self.config.config_page_timeout_ms,
                    },
                    Report::empty(&fingerprint),
                );
            }
            Err(e) => return self.fail(run, FailureKind::Session(e), Report::empty(&fingerprint)),
        }

        // ConfigPageReady → FieldsApplied: always moves forward, whatever
        // the per-field outcomes were
        let catalog = match Catalog::discover(driver) {
            Ok(c) => c,
            Err(e) => return self.fail(run, FailureKind::Session(e), Report::empty(&fingerprint)),
        };
        let report = apply(driver, catalog, configuration, self.profile, self.config.settle_ms);
        for outcome in &report.outcomes {
            self.tracer
                .log(&TraceEvent::stage(run, Stage::FieldsApplied).with_outcome(outcome));
        }
        self.trace(run, Stage::FieldsApplied);

        // FieldsApplied → Saved: commit and wait for confirmation
        let baseline_url = match driver.current_url() {
            Ok(url) => url,
            Err(e) => return self.fail(run, FailureKind::Session(e), report),
        };
        match self.save(driver) {
            Ok(true) => self.trace(run, Stage::Saved),
            Ok(false) => {
                return self.fail(
                    run,
                    FailureKind::SaveNotConfirmed {
                        waited_ms: self.config.save_timeout_ms,
                    },
                    report,
                );
            }
            Err(e) => return self.fail(run, FailureKind::Session(e), report),
        }

        // Saved → Exported: read the artifact back
        let artifact = match extract(
            driver,
            configuration,
            self.profile.result_link_selector.as_deref(),
            &baseline_url,
            self.config.result_settle_ms,
        ) {
            Ok(Some(artifact)) => artifact,
            Ok(None) => return self.fail(run, FailureKind::NoArtifact, report),
            Err(e) => return self.fail(run, FailureKind::Session(e), report),
        };
        self.tracer
            .log(&TraceEvent::stage(run, Stage::Exported).with_detail(&artifact.url));

        Ok(RunSuccess { artifact, report })
    }

    /// Locate and open the target service. Tries each candidate name in
    /// order: type it into the search box (when one exists), then look for
    /// a control matching the candidate. Returns Ok(false) when no
    /// candidate matched anything.
    fn select_service(&self, driver: &mut dyn PageDriver) -> Result<bool, EngineError> {
        let search_spec = self.profile.search_box_spec();

        for candidate in &self.profile.search_candidates {
            let catalog = Catalog::discover(driver)?;
            if let Some(search_box) = resolve(&catalog, &search_spec) {
                let hint = search_box.hint.clone();
                driver.fill(&hint, candidate)?;
                driver.settle(self.config.settle_ms)?;
            }

            // Search results re-render the surface; discover again before
            // looking for the service control
            let catalog = Catalog::discover(driver)?;
            let candidate_spec = FieldSpec::new("service", ControlKind::Button, candidate);
            if let Some(service) = resolve(&catalog, &candidate_spec) {
                let hint = service.hint.clone();
                driver.click(&hint)?;
                driver.settle(self.config.settle_ms)?;
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Click the save/commit control and wait for its confirmation
    /// affordance. Ok(false) covers both a missing save button and a
    /// confirmation that never appeared.
    fn save(&self, driver: &mut dyn PageDriver) -> Result<bool, EngineError> {
        let catalog = Catalog::discover(driver)?;
        let save_spec = self.profile.save_button_spec();

        let Some(save_button) = resolve(&catalog, &save_spec) else {
            return Ok(false);
        };
        let hint = save_button.hint.clone();
        driver.click(&hint)?;

        wait_until_visible(
            driver,
            &self.profile.confirmation_selector,
            self.config.save_timeout_ms,
            self.config.poll_interval_ms,
        )
    }

    fn trace(&self, run: &str, stage: Stage) {
        self.tracer.log(&TraceEvent::stage(run, stage));
    }

    fn fail(&self, run: &str, kind: FailureKind, partial_report: Report) -> RunResult {
        self.tracer
            .log(&TraceEvent::stage(run, Stage::Failed).with_detail(&kind));
        Err(RunFailure {
            kind,
            partial_report,
        })
    }
}
