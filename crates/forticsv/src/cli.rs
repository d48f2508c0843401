//! Clap derive structure for the `forticsv` CLI.

use std::path::PathBuf;

use clap::Parser;

/// forticsv -- export FortiGate configuration objects to CSV
#[derive(Debug, Parser)]
#[command(
    name = "forticsv",
    version,
    about = "Export FortiGate firewall configuration objects to CSV files",
    long_about = "Logs in to a FortiGate's administrative web portal, pulls the\n\
        requested configuration collections (interfaces, policies, addresses,\n\
        NAT mappings, services, pools, address groups), and writes each one\n\
        as a flat CSV file.\n\n\
        The admin password is always prompted for interactively -- it is never\n\
        read from a flag or the environment."
)]
pub struct Cli {
    /// Firewall hostname or IP address
    #[arg(long, short = 'f', env = "FORTICSV_FIREWALL")]
    pub firewall: String,

    /// Admin HTTPS port
    #[arg(long, short = 'p', env = "FORTICSV_PORT", default_value_t = 8443)]
    pub port: u16,

    /// Administrator username
    #[arg(long, short = 'u', env = "FORTICSV_USER")]
    pub user: String,

    /// Virtual domain to query
    #[arg(long, short = 'v', env = "FORTICSV_VDOM", default_value = "root")]
    pub vdom: String,

    /// Collection to export, or "all" for every one
    #[arg(long, short = 'i', default_value = "all")]
    pub item: String,

    /// Resolve object references to their IP values
    #[arg(long, short = 't')]
    pub translate: bool,

    /// Output file for a single item, or filename prefix with "all"
    /// (defaults to the firewall host string)
    #[arg(long, short = 'o')]
    pub outfile: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FORTICSV_INSECURE")]
    pub insecure: bool,

    /// Validate TLS against a custom CA certificate (PEM file)
    #[arg(long, env = "FORTICSV_CA_CERT", conflicts_with = "insecure")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "FORTICSV_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Increase verbosity (--verbose, --verbose --verbose)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
