//! rsyslog `mmexternal` plugin that masks email addresses.
//!
//! Usage: `anon-email [LOCAL_PREFIX] [LOCAL_SUFFIX] [DOMAIN_PREFIX] [DOMAIN_SUFFIX]`
//!
//! Standard output is the reply channel to rsyslog; all logging goes to
//! standard error.

use anon_email::{RawSettings, serve_stdio};
use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind};
use tracing::{info, warn};

const LOG_ENV_VAR: &str = "ANON_EMAIL_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Email anonymizer command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "anon-email",
    version,
    about = "rsyslog message modifier that masks email addresses",
    allow_negative_numbers = true
)]
struct Args {
    /// Leading characters of the local part left visible (default 1).
    #[arg(env = "ANON_EMAIL_LOCAL_PREFIX", allow_hyphen_values = true)]
    local_prefix: Option<String>,

    /// Trailing characters of the local part left visible (default 1).
    #[arg(env = "ANON_EMAIL_LOCAL_SUFFIX", allow_hyphen_values = true)]
    local_suffix: Option<String>,

    /// Leading characters of the domain left visible (default 1).
    #[arg(env = "ANON_EMAIL_DOMAIN_PREFIX", allow_hyphen_values = true)]
    domain_prefix: Option<String>,

    /// Trailing characters of the domain left visible (default 4).
    #[arg(env = "ANON_EMAIL_DOMAIN_SUFFIX", allow_hyphen_values = true)]
    domain_suffix: Option<String>,

    /// Character used in place of hidden characters.
    #[arg(short, long, env = "ANON_EMAIL_MASK_CHAR")]
    mask_char: Option<String>,

    /// Log level (trace, debug, info, warn, error). Logs go to stderr.
    #[arg(short, long, env = LOG_ENV_VAR, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl Args {
    fn into_settings(self) -> RawSettings {
        RawSettings {
            reveal: [
                self.local_prefix,
                self.local_suffix,
                self.domain_prefix,
                self.domain_suffix,
            ],
            mask_char: self.mask_char,
        }
    }
}

fn main() -> Result<()> {
    // A command line clap rejects must not keep the host from starting, so
    // fall back to reading the raw positionals.
    let (settings, log_level, rejected) = match Args::try_parse() {
        Ok(args) => {
            let log_level = args.log_level.clone();
            (args.into_settings(), log_level, None)
        }
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let positionals = std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned());
            let log_level =
                std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
            (
                RawSettings::from_positionals(positionals).or_env(),
                log_level,
                Some(err.kind()),
            )
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .init();

    if let Some(kind) = rejected {
        warn!(error = %kind, "command line rejected, reading raw positional values");
    }

    let policy = settings.resolve();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        local_prefix = policy.local().visible_prefix(),
        local_suffix = policy.local().visible_suffix(),
        domain_prefix = policy.domain().visible_prefix(),
        domain_suffix = policy.domain().visible_suffix(),
        mask_char = %policy.mask_char(),
        "starting email anonymizer"
    );

    serve_stdio(policy).context("lost the connection to the host")?;
    Ok(())
}
