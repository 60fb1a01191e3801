//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use lnurlp::AmountSats;

use crate::config::{CliConfig, DEFAULT_CONFIG_PATH};

/// Resolve a Lightning Address into a payable `lightning:` invoice URI.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Lightning Address, e.g. `alice@pay.example`
    pub address: String,

    /// Amount in satoshis
    pub amount_sats: AmountSats,

    /// Payer comment, sent when the service accepts comments
    #[arg(short, long)]
    pub comment: Option<String>,

    /// Path to the TOML configuration file
    #[arg(long, env = "LNURLP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, env = "LNURLP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Use `http://` for discovery (local development only)
    #[arg(long)]
    pub insecure_http: bool,

    /// Reject addresses containing more than one `@`
    #[arg(long)]
    pub strict: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut CliConfig) {
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if self.insecure_http {
            config.resolver.allow_insecure_http = true;
        }
        if self.strict {
            config.resolver.strict_addresses = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text_from_doc_comments() {
        let command = Cli::command();
        let help = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_help())
                .map(ToString::to_string)
        };
        assert_eq!(
            help("comment").as_deref(),
            Some("Payer comment, sent when the service accepts comments")
        );
        assert_eq!(help("json").as_deref(), Some("Print the result as JSON"));
        assert!(command.get_about().is_some());
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "lnurlp",
            "alice@pay.example",
            "100",
            "--comment",
            "thanks",
            "--timeout-secs",
            "3",
            "--insecure-http",
        ])
        .unwrap();
        assert_eq!(cli.address, "alice@pay.example");
        assert_eq!(cli.amount_sats.get(), 100);
        assert_eq!(cli.comment.as_deref(), Some("thanks"));

        let mut config = CliConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.timeout_secs, 3);
        assert!(config.resolver.allow_insecure_http);
        assert!(!config.resolver.strict_addresses);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert!(Cli::try_parse_from(["lnurlp", "alice@pay.example", "0"]).is_err());
        assert!(Cli::try_parse_from(["lnurlp", "alice@pay.example", "-5"]).is_err());
        assert!(Cli::try_parse_from(["lnurlp", "alice@pay.example", "ten"]).is_err());
    }

    #[test]
    fn test_flags_leave_file_values_when_absent() {
        let cli = Cli::try_parse_from(["lnurlp", "a@b", "1"]).unwrap();
        let mut config = CliConfig {
            timeout_secs: 30,
            ..CliConfig::default()
        };
        config.resolver.strict_addresses = true;
        cli.apply(&mut config);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.resolver.strict_addresses);
    }
}
