//! Lifecycle of the `txstats schedule` daemon: failed runs, idle waiting and
//! shutdown on SIGTERM.
#![cfg(unix)]

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use tempfile::TempDir;

/// Nothing listens on port 1, so every request is refused.
const UNREACHABLE_API: &str = "http://127.0.0.1:1/api/2/";

const LOG_TIMEOUT: Duration = Duration::from_secs(30);

struct Daemon {
    child: Child,
    stderr: Receiver<String>,
    seen: Vec<String>,
}

impl Daemon {
    fn spawn(cwd: &Path, output: &Path) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_txstats"))
            .current_dir(cwd)
            .env("TRANSIFEX_API_TOKEN", "test-token")
            .env("TRANSIFEX_API_URL", UNREACHABLE_API)
            .env("TRANSIFEX_PROJECT", "demo")
            .env("OUTPUT_DATA", output)
            .env("RUST_LOG", "info")
            .env("NO_COLOR", "1")
            .env_remove("TRANSIFEX_LANGUAGE")
            .arg("schedule")
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let pipe = child.stderr.take().unwrap();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(pipe).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            child,
            stderr: rx,
            seen: Vec::new(),
        }
    }

    /// Next stderr line containing `needle`.
    fn wait_for_log(&mut self, needle: &str) -> String {
        let deadline = Instant::now() + LOG_TIMEOUT;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.stderr.recv_timeout(left) {
                Ok(line) => {
                    self.seen.push(line.clone());
                    if line.contains(needle) {
                        return line;
                    }
                }
                Err(_) => panic!("no {needle:?} on stderr, got:\n{}", self.seen.join("\n")),
            }
        }
    }

    fn is_running(&mut self) -> bool {
        self.child.try_wait().unwrap().is_none()
    }

    fn terminate(&mut self) -> ExitStatus {
        kill(Pid::from_raw(self.child.id() as i32), Signal::SIGTERM).unwrap();
        self.child.wait().unwrap()
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            self.child.kill().ok();
            self.child.wait().ok();
        }
    }
}

#[test]
fn failed_run_keeps_daemon_waiting_until_sigterm() {
    let tmp = TempDir::new().unwrap();
    let mut daemon = Daemon::spawn(tmp.path(), tmp.path());

    let failure = daemon.wait_for_log("daily stats run failed");
    assert!(failure.contains("ERROR"), "not logged at error level: {failure}");
    daemon.wait_for_log("waiting for next run");

    assert!(daemon.is_running());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);

    let status = daemon.terminate();
    assert!(status.success(), "exit status {status:?}");
    assert!(
        daemon
            .stderr
            .iter()
            .any(|line| line.contains("shutdown signal received"))
    );
}

#[test]
fn without_run_on_start_daemon_idles_until_daily_time() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("data");
    std::fs::create_dir(&output).unwrap();

    let at = (chrono::Local::now() + chrono::TimeDelta::hours(12))
        .format("%H:%M")
        .to_string();
    std::fs::write(
        tmp.path().join("txstats.toml"),
        format!("[schedule]\nat = \"{at}\"\nrun_on_start = false\n"),
    )
    .unwrap();

    let mut daemon = Daemon::spawn(tmp.path(), &output);
    let waiting = daemon.wait_for_log("waiting for next run");
    assert!(waiting.contains(&format!("{at}:00")), "unexpected next run: {waiting}");

    std::thread::sleep(Duration::from_millis(500));
    assert!(daemon.is_running());

    let status = daemon.terminate();
    assert!(status.success(), "exit status {status:?}");
    let rest: Vec<String> = daemon.stderr.iter().collect();
    assert!(
        !daemon
            .seen
            .iter()
            .chain(&rest)
            .any(|line| line.contains("running daily stats")),
        "a run started before the daily time"
    );
    assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);
}
