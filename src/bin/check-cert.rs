//! One-shot certificate chain check from the command line

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use cert_chain_inspector::common::{init_logger, strip_brackets, Result, DEFAULT_TLS_PORT};
use cert_chain_inspector::config::defaults::DIAL_TIMEOUT_SECS;
use cert_chain_inspector::{ChainResult, Inspector, Target, TrustAnchors, VERSION};

/// Inspect the certificate chain served at an address
#[derive(Parser, Debug)]
#[clap(name = "check-cert", version = VERSION, about, long_about = None)]
struct Args {
    /// Host or IP to dial
    address: String,

    /// Name to validate against and send as SNI (defaults to the address)
    #[clap(long)]
    name: Option<String>,

    /// Port to dial
    #[clap(short, long, default_value_t = DEFAULT_TLS_PORT)]
    port: u16,

    /// Bound on connect plus handshake, in seconds
    #[clap(long, default_value_t = DIAL_TIMEOUT_SECS)]
    timeout: u64,

    /// Additional PEM bundle of trusted roots (repeatable)
    #[clap(long = "ca-file")]
    ca_files: Vec<PathBuf>,

    /// Do not trust the host's root certificates
    #[clap(long)]
    no_system_roots: bool,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger("warn");
    let args = Args::parse();

    match check(&args).await {
        Ok(result) => {
            if args.json {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::from(2);
                    }
                }
            } else {
                print_report(&result);
            }

            if result.validation.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn check(args: &Args) -> Result<ChainResult> {
    let name = args.name.as_deref().unwrap_or_else(|| strip_brackets(&args.address));
    let target = Target::new(&args.address, args.port, name)?;

    let trust = TrustAnchors::from_pem_files(!args.no_system_roots, &args.ca_files)?;
    let inspector = Inspector::new(trust, Duration::from_secs(args.timeout))?;

    inspector.inspect(&target).await
}

fn print_report(result: &ChainResult) {
    println!("=== {} ===\n", result.target_url);

    for (index, cert) in result.certificates.iter().enumerate() {
        println!("[{}] {}", index, cert.subject);
        println!("    Issuer:     {}", cert.issuer);
        println!("    Not before: {}", cert.not_before.to_rfc3339());
        println!("    Not after:  {}", cert.not_after.to_rfc3339());
        println!("    CA:         {}", if cert.is_ca { "yes" } else { "no" });
        println!("    Signature:  {}", cert.signature_algorithm);
        if !cert.dns_names.is_empty() {
            println!("    DNS names:  {}", cert.dns_names.join(", "));
        }
    }

    println!("\n{}", result.validation);
}
