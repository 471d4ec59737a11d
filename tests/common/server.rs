//! Test server management.
//!
//! Spawns and manages spectryd instances for integration testing.

use std::io::Write;
use std::process::{Child, Command};
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::sleep;

/// A test server instance.
///
/// Each test uses its own fixed port so suites can run in parallel. The
/// child process is killed on drop.
pub struct TestServer {
    child: Child,
    port: u16,
    _data_dir: TempDir,
}

impl TestServer {
    /// Spawn a new test server listening on `127.0.0.1:port`.
    ///
    /// Metrics are disabled (port 0 convention) so tests never collide on
    /// the scrape port.
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        let data_dir = tempfile::tempdir()?;
        let config_path = data_dir.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path)?;
        write!(
            file,
            r#"
[server]
name = "spectryd-test"
listen = "127.0.0.1:{port}"
metrics_port = 0

[history]
capacity = 64
"#
        )?;

        let child = Command::new(env!("CARGO_BIN_EXE_spectryd"))
            .arg(&config_path)
            .spawn()?;

        let server = Self {
            child,
            port,
            _data_dir: data_dir,
        };
        server.wait_ready().await?;
        Ok(server)
    }

    /// Full URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Poll until the API answers, or give up after ~5 seconds.
    async fn wait_ready(&self) -> anyhow::Result<()> {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(self.url("/bestChannels")).send().await.is_ok() {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on port {}", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
