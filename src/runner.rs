//! Parallel scenario execution.
//!
//! Scenarios run as tokio tasks behind a semaphore sized by the configured
//! thread count; each scenario's steps stay sequential inside its own task.
//! Failures never abort siblings — every scenario is attempted and recorded.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::sync::Semaphore;
use verso_client::Transport;
use verso_kernel::scenario::{filter_by_group, Group};
use verso_kernel::{Scenario, ScenarioError, ScenarioRecord, Settings};

use crate::ctx::ScenarioCtx;
use crate::report::RunReport;
use crate::suites;

/// Knobs the CLI exposes on top of the loaded settings.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub group: Option<Group>,
    pub threads: Option<usize>,
    pub seed: Option<u64>,
    pub base_url: Option<String>,
}

/// Run the registered suites and produce the report. Builds its own runtime
/// so binaries keep a plain synchronous `main`.
pub fn run(mut settings: Settings, options: RunOptions) -> anyhow::Result<RunReport> {
    if let Some(base_url) = options.base_url {
        settings.api.base_url = base_url;
    }
    let threads = options.threads.unwrap_or(settings.runner.threads).max(1);
    let base_seed = options
        .seed
        .or(settings.runner.seed)
        .unwrap_or_else(entropy_seed);

    let transport = Transport::init(&settings.api)
        .with_context(|| "failed to initialize the HTTP transport")?;

    let scenarios = filter_by_group(suites::all(), options.group);
    tracing::info!(
        target: "verso_runner",
        scenarios = scenarios.len(),
        threads,
        seed = base_seed,
        group = options.group.map(|g| g.as_str()).unwrap_or("all"),
        base_url = %transport.base_url(),
        "starting run"
    );

    let ctx = Arc::new(ScenarioCtx::new(settings, transport, base_seed));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_context(|| "failed to build the tokio runtime")?;

    let started = Instant::now();
    let records = runtime.block_on(execute(scenarios, ctx, threads));
    let duration = started.elapsed();

    Ok(RunReport::new(options.group, records, duration))
}

/// Execute scenarios with at most `threads` in flight. Generic over the
/// context so the accounting is testable with synthetic scenarios.
pub async fn execute<C>(
    scenarios: Vec<Scenario<C>>,
    ctx: Arc<C>,
    threads: usize,
) -> Vec<ScenarioRecord>
where
    C: Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(threads.max(1)));

    let mut handles = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let ctx = Arc::clone(&ctx);
        let semaphore = Arc::clone(&semaphore);
        let name = scenario.name();
        let groups = scenario.groups();

        let handle = tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("runner semaphore is never closed");

            tracing::info!(target: "verso_runner", scenario = name, "starting scenario");
            let started = Instant::now();
            let result = scenario.run(&ctx).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => {
                    tracing::info!(target: "verso_runner", scenario = name, elapsed_ms, "passed")
                }
                Err(err) => tracing::warn!(
                    target: "verso_runner",
                    scenario = name,
                    elapsed_ms,
                    error = %err,
                    "failed"
                ),
            }

            ScenarioRecord::from_result(name, groups, &result, elapsed_ms)
        });
        handles.push((name, groups, handle));
    }

    let mut records = Vec::with_capacity(handles.len());
    for (name, groups, handle) in handles {
        match handle.await {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::error!(target: "verso_runner", scenario = name, error = %err, "scenario task panicked");
                let panicked: Result<(), ScenarioError> =
                    Err(ScenarioError::assertion(format!("scenario panicked: {err}")));
                records.push(ScenarioRecord::from_result(name, groups, &panicked, 0));
            }
        }
    }
    records
}

/// Seed for runs where neither the CLI nor the settings pin one.
fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use verso_kernel::scenario::ScenarioFuture;
    use verso_kernel::ScenarioStatus;

    struct Probe {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }

        async fn enter(&self) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn passing(ctx: &Probe) -> ScenarioFuture<'_> {
        Box::pin(async move {
            ctx.enter().await;
            Ok(())
        })
    }

    fn failing(_ctx: &Probe) -> ScenarioFuture<'_> {
        Box::pin(async { Err(ScenarioError::assertion("expected 200 but got 500")) })
    }

    fn infra(_ctx: &Probe) -> ScenarioFuture<'_> {
        Box::pin(async { Err(ScenarioError::transport("connection refused")) })
    }

    #[tokio::test]
    async fn records_every_attempted_scenario() {
        let scenarios = vec![
            Scenario::new("t/pass", &[Group::Regression], passing),
            Scenario::new("t/fail", &[Group::Regression], failing),
            Scenario::new("t/infra", &[Group::Regression], infra),
        ];
        let records = execute(scenarios, Arc::new(Probe::new()), 2).await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].status, ScenarioStatus::Passed);
        assert_eq!(records[1].status, ScenarioStatus::Failed);
        assert_eq!(records[2].status, ScenarioStatus::Infra);
        // Spawn order is preserved in the record list.
        assert_eq!(records[0].name, "t/pass");
    }

    #[tokio::test]
    async fn failures_do_not_abort_siblings() {
        let scenarios = vec![
            Scenario::new("t/fail", &[Group::Regression], failing),
            Scenario::new("t/pass1", &[Group::Regression], passing),
            Scenario::new("t/pass2", &[Group::Regression], passing),
        ];
        let records = execute(scenarios, Arc::new(Probe::new()), 1).await;
        let passed = records
            .iter()
            .filter(|r| r.status == ScenarioStatus::Passed)
            .count();
        assert_eq!(passed, 2);
    }

    #[tokio::test]
    async fn concurrency_stays_within_the_thread_limit() {
        let scenarios: Vec<Scenario<Probe>> = (0..8)
            .map(|_| Scenario::new("t/pass", &[Group::Regression], passing))
            .collect();
        let probe = Arc::new(Probe::new());
        execute(scenarios, Arc::clone(&probe), 2).await;
        assert!(probe.peak.load(Ordering::SeqCst) <= 2);
    }
}
