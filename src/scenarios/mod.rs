//! Functional checks against a live artifact repository.
//!
//! Each scenario goes through three phases:
//!
//! 1. **setup** - resolve configuration, render templates, write files into
//!    a [`Scaffold`]
//! 2. **execute** - call the repository (or a build tool) and verify the
//!    result
//! 3. **teardown** - the scaffold is dropped, removing everything setup
//!    created, whatever the outcome of the first two phases
//!
//! Scenarios are single-attempt: nothing is retried.

pub mod generic;
pub mod maven;
pub mod npm;

pub use generic::GenericUpload;
pub use maven::MavenDeploy;
pub use npm::NpmPublish;

use crate::error::Result;
use crate::fixture::{Scaffold, Session};
use std::time::{Duration, Instant};

/// A check against the repository.
pub trait Scenario {
    /// Everything setup prepares for execution.
    type Fixture;

    /// Short name; also the scaffold directory under the work dir.
    fn name(&self) -> &'static str;

    /// Resolve configuration and materialize files.
    fn setup(&self, session: &Session, scaffold: &mut Scaffold) -> Result<Self::Fixture>;

    /// Run the check.
    fn execute(&self, session: &Session, fixture: &Self::Fixture) -> Result<ScenarioOutcome>;
}

/// What a passing scenario verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// URL whose status proved success.
    pub verified_url: String,
    /// Status code returned by that URL.
    pub status: u16,
}

/// Result of one scenario run.
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub result: Result<ScenarioOutcome>,
    pub duration: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run a scenario through setup, execute and teardown.
///
/// The scaffold lives at `<work_dir>/<scenario name>` and is removed before
/// this returns.
pub fn run_scenario<S: Scenario>(scenario: &S, session: &Session) -> ScenarioReport {
    let start = Instant::now();
    let name = scenario.name();
    tracing::info!("Scenario {}: setup", name);

    let result = Scaffold::create(session.options().work_dir.join(name)).and_then(|mut scaffold| {
        let fixture = scenario.setup(session, &mut scaffold)?;
        tracing::info!("Scenario {}: execute", name);
        let outcome = scenario.execute(session, &fixture);
        tracing::info!("Scenario {}: teardown", name);
        scaffold.teardown();
        outcome
    });

    let duration = start.elapsed();
    match &result {
        Ok(outcome) => tracing::info!(
            "Scenario {} passed in {:?} (HTTP {} from {})",
            name,
            duration,
            outcome.status,
            outcome.verified_url
        ),
        Err(e) => tracing::info!("Scenario {} failed in {:?}: {}", name, duration, e),
    }

    ScenarioReport {
        name,
        result,
        duration,
    }
}

/// Scenarios selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    Generic,
    Maven,
    Npm,
    All,
}

impl ScenarioKind {
    /// Run the selected scenario(s) in order.
    pub fn run(self, session: &Session) -> Vec<ScenarioReport> {
        match self {
            ScenarioKind::Generic => vec![run_scenario(&GenericUpload::default(), session)],
            ScenarioKind::Maven => vec![run_scenario(&MavenDeploy::default(), session)],
            ScenarioKind::Npm => vec![run_scenario(&NpmPublish::default(), session)],
            ScenarioKind::All => vec![
                run_scenario(&GenericUpload::default(), session),
                run_scenario(&MavenDeploy::default(), session),
                run_scenario(&NpmPublish::default(), session),
            ],
        }
    }
}
