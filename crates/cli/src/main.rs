//! Connectivity doctor for cluster client configurations.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use doctor_bootstrap::ConfigSource;
use doctor_diagnose::{DiagnoseOptions, Doctor};
use doctor_dns::DnsResolver;
use doctor_probe::ServiceCheck;
use doctor_reporter::{ConsoleReporter, Reporter, ReporterExt};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
#[command(name = "sdk-doctor", version, about, long_about = None)]
struct Args {
    /// Log internal debugging output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Diagnose checks for problems with your configuration
    ///
    /// Runs various tests against your network and cluster to identify flaws
    /// in your configuration that would cause failures in development or
    /// production environments.
    Diagnose(DiagnoseArgs),
}

#[derive(Clone, Debug, clap::Args)]
struct DiagnoseArgs {
    /// Connection string of the cluster, e.g. `couchbase://10.0.0.1/default`
    connection_string: String,

    /// Bucket password
    #[arg(
        short = 'p',
        long,
        env = "SDK_DOCTOR_BUCKET_PASSWORD",
        hide_env_values = true
    )]
    bucket_password: Option<String>,

    /// Timeout for each bucket configuration fetch, in milliseconds
    #[arg(long, default_value_t = 2000, env = "SDK_DOCTOR_FETCH_TIMEOUT_MS")]
    fetch_timeout_ms: u64,

    /// Timeout for each service probe, in milliseconds
    #[arg(long, env = "SDK_DOCTOR_PROBE_TIMEOUT_MS")]
    probe_timeout_ms: Option<u64>,
}

impl DiagnoseArgs {
    fn options(&self) -> DiagnoseOptions {
        DiagnoseOptions {
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            probe_timeout: self.probe_timeout_ms.map(Duration::from_millis),
        }
    }
}

const BANNER: &str = r"|====================================================================|
|          ___ ___  _  __   ___   ___   ___ _____ ___  ___           |
|         / __|   \| |/ /__|   \ / _ \ / __|_   _/ _ \| _ \          |
|         \__ \ |) | ' <___| |) | (_) | (__  | || (_) |   /          |
|         |___/___/|_|\_\  |___/ \___/ \___| |_| \___/|_|_\          |
|                                                                    |
|====================================================================|
";

const STABILITY_NOTE: &str = "Note: Diagnostics can only provide accurate results when your cluster
 is in a stable state.  Active rebalancing and other cluster configuration
 changes can cause the output of the doctor to be inconsistent or in the
 worst cases, completely incorrect.
";

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Diagnose(args) => diagnose(args).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn diagnose(args: DiagnoseArgs) {
    println!("{BANNER}");
    println!("{STABILITY_NOTE}");

    let reporter = Arc::new(ConsoleReporter::new());
    let doctor = Doctor::live(&args.options(), reporter.clone());

    run(doctor, &args, &*reporter).await;

    reporter.new_line();
    reporter.print_summary();
}

/// Run the doctor if it could be built. Always ends with the completion
/// event, so the summary that follows covers setup failures too.
async fn run<D, C, S>(
    doctor: doctor_diagnose::Result<Doctor<D, C, S>>,
    args: &DiagnoseArgs,
    reporter: &dyn Reporter,
) where
    D: DnsResolver,
    C: ConfigSource,
    S: ServiceCheck,
{
    match doctor {
        Ok(doctor) => {
            if let Err(e) = doctor
                .diagnose(&args.connection_string, args.bucket_password.as_deref())
                .await
            {
                debug!("diagnostics stopped early: {}", e);
            }
        }
        Err(e) => reporter.error(format!(
            "Failed to set up diagnostics, no checks were run (error: {e})"
        )),
    }

    reporter.info("Diagnostics completed");
}
