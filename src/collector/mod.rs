pub mod netstat;
pub mod ss;

use anyhow::Context;
use log::{debug, info, warn};
use tokio::process::Command;

use crate::config::Config;
use crate::record::ConnectionRecord;

/// A host utility able to list sockets, paired with its output parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facility {
    Netstat,
    Ss,
}

impl Facility {
    pub fn program<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Facility::Netstat => &config.netstat_bin,
            Facility::Ss => &config.ss_bin,
        }
    }

    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Facility::Netstat => netstat::ARGS,
            Facility::Ss => ss::ARGS,
        }
    }

    pub fn parse(&self, output: &str) -> Vec<ConnectionRecord> {
        match self {
            Facility::Netstat => netstat::parse(output),
            Facility::Ss => ss::parse(output),
        }
    }
}

/// Runs the connection listing once, preferring netstat and falling back to ss.
pub async fn collect(config: &Config) -> anyhow::Result<Vec<ConnectionRecord>> {
    let records = match run(Facility::Netstat, config).await {
        Ok(records) => records,
        Err(e) => {
            warn!("{e:#}; falling back to {}", config.ss_bin);
            run(Facility::Ss, config)
                .await
                .context("no connection-listing utility succeeded")?
        }
    };

    info!("collected {} connections", records.len());
    if process_details_hidden(&records) {
        warn!("process details unavailable; run with elevated privileges to see owning processes");
    }
    Ok(records)
}

/// True when sockets were listed but none carries an owning process.
fn process_details_hidden(records: &[ConnectionRecord]) -> bool {
    !records.is_empty() && records.iter().all(|r| r.pid.is_none())
}

async fn run(facility: Facility, config: &Config) -> anyhow::Result<Vec<ConnectionRecord>> {
    let program = facility.program(config);
    let output = Command::new(program)
        .args(facility.args())
        .output()
        .await
        .with_context(|| format!("failed to run {program}"))?;

    if !output.status.success() {
        anyhow::bail!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if config.debug {
        debug!("{program}: read {} lines", stdout.lines().count());
        for (i, ln) in stdout.lines().enumerate().take(5) {
            debug!("  [{i}] {ln}");
        }
    }

    let records = facility.parse(&stdout);
    for record in &records {
        debug!("collected {record:?}");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    const NETSTAT_OUTPUT: &str = "\
Active Internet connections (servers and established)
Proto Recv-Q Send-Q Local Address           Foreign Address         State       PID/Program name
tcp        0      0 127.0.0.1:22            0.0.0.0:*               LISTEN      -
udp6       0      0 ::1:323                 :::*                                -
";

    // Serializes tests that spawn processes, so no fork inherits a fixture
    // script's write handle while another test executes it.
    static SPAWN_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    /// Writes an executable shell script that prints `output` and exits 0.
    fn fake_utility(dir: &tempfile::TempDir, name: &str, output: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\ncat <<'EOF'\n{output}EOF\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn config(netstat_bin: &str, ss_bin: &str) -> Config {
        Config {
            netstat_bin: netstat_bin.into(),
            ss_bin: ss_bin.into(),
            debug: true,
        }
    }

    #[test]
    fn facility_selects_configured_program() {
        let cfg = config("/opt/netstat", "/opt/ss");
        assert_eq!(Facility::Netstat.program(&cfg), "/opt/netstat");
        assert_eq!(Facility::Ss.program(&cfg), "/opt/ss");
        assert_eq!(Facility::Netstat.args(), &["-apntu"]);
        assert_eq!(Facility::Ss.args(), &["-tunapH"]);
    }

    #[tokio::test]
    async fn uses_netstat_output_without_touching_ss() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = tempfile::tempdir().unwrap();
        let netstat = fake_utility(&dir, "netstat", NETSTAT_OUTPUT);
        let cfg = config(netstat.to_str().unwrap(), "/nonexistent/ss");

        let records = collect(&cfg).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].proto, "tcp");
        assert_eq!(records[0].state.as_deref(), Some("LISTEN"));
        assert_eq!(records[0].local.port, Some(22));
        assert_eq!(records[1].proto, "udp6");
        assert_eq!(records[1].state, None);
        assert!(process_details_hidden(&records));
    }

    #[tokio::test]
    async fn parses_ss_output_after_fallback() {
        let _guard = SPAWN_LOCK.lock().await;
        let dir = tempfile::tempdir().unwrap();
        let ss = fake_utility(
            &dir,
            "ss",
            "tcp LISTEN 0 128 0.0.0.0:22 0.0.0.0:* users:((\"sshd\",pid=812,fd=3))\n",
        );
        let cfg = config("/nonexistent/netstat", ss.to_str().unwrap());

        let records = collect(&cfg).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pid, Some(812));
        assert!(!process_details_hidden(&records));
    }

    #[test]
    fn hidden_process_details_need_records() {
        assert!(!process_details_hidden(&[]));
    }

    #[tokio::test]
    async fn falls_back_when_primary_fails() {
        let _guard = SPAWN_LOCK.lock().await;
        // `false` exits non-zero, `true` succeeds with no output.
        let records = collect(&config("false", "true")).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn falls_back_when_primary_missing() {
        let _guard = SPAWN_LOCK.lock().await;
        let records = collect(&config("/nonexistent/netstat", "true")).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn errors_when_no_utility_works() {
        let _guard = SPAWN_LOCK.lock().await;
        let err = collect(&config("/nonexistent/netstat", "/nonexistent/ss"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no connection-listing utility"));
    }
}
