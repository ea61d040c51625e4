use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Resolved runtime configuration.
#[derive(Clone, Debug)]
pub struct Context {
    pub data_dir: PathBuf,
    pub reset: bool,
    pub ephemeral: bool,
    pub latency: Duration,
    pub log_file: Option<PathBuf>,
    pub api_listen: SocketAddr,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            data_dir: PathBuf::from(&cli.data_dir),
            reset: cli.reset,
            ephemeral: cli.ephemeral,
            latency: Duration::from_millis(cli.latency_ms),
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            api_listen: cli.api_listen,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("revisit.sqlite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn from_cli_applies_defaults() {
        let cli = crate::cli::Cli::try_parse_from(["revisit"]).unwrap();
        let ctx = Context::from_cli(&cli);
        assert_eq!(ctx.data_dir, PathBuf::from(".revisit/"));
        assert_eq!(ctx.latency, Duration::from_millis(1000));
        assert!(!ctx.ephemeral);
        assert_eq!(ctx.db_path(), PathBuf::from(".revisit/revisit.sqlite"));
    }

    #[test]
    fn from_cli_reads_flags() {
        let cli = crate::cli::Cli::try_parse_from([
            "revisit",
            "--data-dir",
            "/tmp/shop",
            "--latency-ms",
            "0",
            "--ephemeral",
            "--api-listen",
            "0.0.0.0:9000",
        ])
        .unwrap();
        let ctx = Context::from_cli(&cli);
        assert_eq!(ctx.data_dir, PathBuf::from("/tmp/shop"));
        assert!(ctx.latency.is_zero());
        assert!(ctx.ephemeral);
        assert_eq!(ctx.api_listen, "0.0.0.0:9000".parse().unwrap());
    }
}
