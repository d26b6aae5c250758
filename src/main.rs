//! Certificate chain inspector HTTP service
//!
//! Serves the chain inspection and expiry endpoints.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use cert_chain_inspector::common::{init_logger, Result};
use cert_chain_inspector::config::{ConfigValues, ServerConfig};
use cert_chain_inspector::{api, Inspector, APP_NAME, VERSION};

/// Inspect the TLS certificate chain served by a host
#[derive(Parser, Debug)]
#[clap(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Host or IP to listen on
    #[clap(long, env = "CERT_INSPECTOR_LISTEN_HOST")]
    listen_host: Option<String>,

    /// Port to listen on
    #[clap(short, long, env = "PORT")]
    port: Option<u16>,

    /// Bound on TCP connect plus TLS handshake, in seconds
    #[clap(long, env = "CERT_INSPECTOR_DIAL_TIMEOUT")]
    dial_timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[clap(long, env = "CERT_INSPECTOR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Do not trust the host's root certificates
    #[clap(long, env = "CERT_INSPECTOR_NO_SYSTEM_ROOTS")]
    no_system_roots: bool,

    /// Additional PEM bundle of trusted roots (repeatable)
    #[clap(long = "ca-file", env = "CERT_INSPECTOR_CA_FILES", value_delimiter = ',')]
    ca_files: Vec<PathBuf>,

    /// Load configuration from a JSON file
    #[clap(long, env = "CERT_INSPECTOR_CONFIG_FILE")]
    config_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigValues {
        ConfigValues {
            listen_host: self.listen_host.clone(),
            port: self.port,
            dial_timeout_secs: self.dial_timeout,
            log_level: self.log_level.clone(),
            use_system_roots: self.no_system_roots.then_some(false),
            extra_ca_files: (!self.ca_files.is_empty()).then(|| self.ca_files.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match ServerConfig::load(args.config_file.as_deref(), args.overrides()) {
        Ok(config) => config,
        Err(e) => {
            init_logger("info");
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logger(&config.log_level);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<()> {
    info!("Starting {} v{}", APP_NAME, VERSION);
    info!("Dial timeout: {:?}", config.dial_timeout());
    info!(
        "Trust anchors: system roots {}, {} extra CA file(s)",
        if config.use_system_roots { "enabled" } else { "disabled" },
        config.extra_ca_files.len()
    );

    let inspector = Arc::new(Inspector::from_config(&config)?);
    api::start_server(&config, inspector).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "cert-chain-inspector",
            "--port",
            "9090",
            "--dial-timeout",
            "3",
            "--no-system-roots",
            "--ca-file",
            "a.pem",
            "--ca-file",
            "b.pem",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.port, Some(9090));
        assert_eq!(overrides.dial_timeout_secs, Some(3));
        assert_eq!(overrides.use_system_roots, Some(false));
        assert_eq!(
            overrides.extra_ca_files,
            Some(vec![PathBuf::from("a.pem"), PathBuf::from("b.pem")])
        );
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Args::try_parse_from(["cert-chain-inspector", "--port", "http"]).is_err());
    }
}
