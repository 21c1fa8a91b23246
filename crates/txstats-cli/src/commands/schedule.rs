use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use txstats_client::{TransifexClient, collect_snapshot};
use txstats_core::{AggregateOptions, DailySchedule};

/// Run the stats collection every day at `[schedule].at` until a shutdown
/// signal arrives.
pub async fn schedule(config_dir: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = super::load_config(config_dir)?;

    let output_dir = output
        .or_else(|| config.output.dir.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no output directory — pass --output or set OUTPUT_DATA")
        })?;
    if !output_dir.is_dir() {
        anyhow::bail!("output directory '{}' does not exist", output_dir.display());
    }

    let at = config.schedule.daily_time()?;
    let job = DailyStats {
        client: super::build_client(&config)?,
        options: AggregateOptions::from(&config.output),
        output_dir,
        pretty: config.output.pretty,
    };

    let shutdown = shutdown_signal()?;
    tokio::pin!(shutdown);

    tracing::info!(
        %at,
        output = %job.output_dir.display(),
        run_on_start = config.schedule.run_on_start,
        "starting daily stats schedule"
    );

    let mut daily = DailySchedule::new(at, local_now(), config.schedule.run_on_start);
    if let Some(next_run) = daily.next_run() {
        tracing::info!(%next_run, "waiting for next run");
    }

    loop {
        let wait = daily.sleep_for(local_now(), CLOCK_CHECK_INTERVAL);

        tokio::select! {
            signal = &mut shutdown => {
                signal?;
                tracing::info!("shutdown signal received, stopping schedule");
                return Ok(());
            }
            () = async {
                tokio::time::sleep(wait).await;
                if daily.is_due(local_now()) {
                    job.run().await;
                    let next_run = daily.advance(local_now());
                    tracing::info!(%next_run, "waiting for next run");
                }
            } => {}
        }
    }
}

/// Upper bound on a single sleep, so wall-clock jumps are noticed.
const CLOCK_CHECK_INTERVAL: Duration = Duration::from_secs(60);

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

struct DailyStats {
    client: TransifexClient,
    options: AggregateOptions,
    output_dir: PathBuf,
    pretty: bool,
}

impl DailyStats {
    /// One collection run. Failures are logged; the schedule keeps going.
    async fn run(&self) {
        tracing::info!("running daily stats");
        let result = collect_snapshot(
            &self.client,
            &self.options,
            &self.output_dir,
            super::today(),
            self.pretty,
        )
        .await;

        match result {
            Ok(path) => tracing::info!(path = %path.display(), "daily stats saved"),
            Err(e) => {
                let error = anyhow::Error::new(e);
                tracing::error!(error = %format!("{error:#}"), "daily stats run failed");
            }
        }
    }
}

/// Installs the signal handlers right away. The returned future resolves on
/// Ctrl-C, or on SIGTERM where available (container stop).
fn shutdown_signal() -> std::io::Result<impl Future<Output = std::io::Result<()>>> {
    #[cfg(unix)]
    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    Ok(async move {
        #[cfg(unix)]
        {
            tokio::select! {
                ctrl_c = tokio::signal::ctrl_c() => ctrl_c,
                _ = terminate.recv() => Ok(()),
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await
        }
    })
}
