//! The export run: one linear pass.
//!
//! Resolve the item selection, prompt for the password, establish the
//! session, build the lookup table when translation is requested, then
//! fetch -> flatten -> write per item type. Finishes with a best-effort
//! logout that never affects the exit status.

use std::fs;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use tracing::{debug, info, warn};
use url::Url;

use forticsv_api::{FortiSession, TlsMode, TransportConfig};
use forticsv_core::{ItemSelection, ItemType, Lookup, build_csv, from_results};

use crate::cli::Cli;
use crate::error::CliError;

pub async fn run(cli: Cli) -> Result<(), CliError> {
    // Validate the selection before anything touches the terminal or the
    // network -- a typo should not cost the user a password prompt.
    let selection = ItemSelection::from_str(&cli.item).map_err(|_| CliError::InvalidItem {
        value: cli.item.clone(),
        valid: ItemSelection::valid_values(),
    })?;

    let password = SecretString::from(rpassword::prompt_password("Password: ")?);

    info!(
        "connecting to {}:{} ({}) as {}",
        cli.firewall, cli.port, cli.vdom, cli.user
    );

    let transport = TransportConfig {
        tls: tls_mode(&cli),
        timeout: Duration::from_secs(cli.timeout),
        cookie_jar: None,
    };

    let session = FortiSession::establish(
        firewall_url(&cli)?,
        cli.vdom.clone(),
        &cli.user,
        &password,
        &transport,
    )
    .await
    .map_err(|source| CliError::AuthFailed {
        host: cli.firewall.clone(),
        source,
    })?;
    info!("logged in as {}", cli.user);

    let lookup = if cli.translate {
        info!("building lookup tables");
        Some(build_lookup(&session).await)
    } else {
        None
    };

    let base_name = cli.outfile.clone().unwrap_or_else(|| cli.firewall.clone());

    info!("fetching data");
    match selection {
        ItemSelection::One(item) => {
            export_item(&session, item, lookup.as_ref(), &base_name).await?;
        }
        ItemSelection::All => {
            for item in ItemType::all() {
                let path = format!("{base_name}-{item}.csv");
                export_item(&session, *item, lookup.as_ref(), &path).await?;
            }
        }
    }

    // Logout keeps the admin session table clean, but a failure here
    // cannot un-write the files already on disk.
    if let Err(err) = session.logout().await {
        warn!("logout failed: {err}");
    }

    info!("done");
    Ok(())
}

/// Fetch one collection, flatten it, and write the CSV file.
async fn export_item(
    session: &FortiSession,
    item: ItemType,
    lookup: Option<&Lookup>,
    path: &str,
) -> Result<(), CliError> {
    let spec = item.spec();
    let results = session.fetch_results(spec.endpoint).await?;
    let csv = build_csv(spec.columns, &results, lookup);

    fs::write(path, csv).map_err(|source| CliError::WriteFailed {
        path: path.to_owned(),
        source,
    })?;
    info!("saved {} {} record(s) to {}", results.len(), item, path);
    Ok(())
}

/// Build the reference lookup table from address objects, IP pools, and
/// virtual IPs, in that precedence order. A failed or malformed source
/// fetch loses entries, never the run.
async fn build_lookup(session: &FortiSession) -> Lookup {
    let mut table = Lookup::default();

    match session
        .fetch_results(ItemType::Address.spec().endpoint)
        .await
    {
        Ok(results) => table.add_addresses(&from_results(&results)),
        Err(err) => warn!("address objects unavailable for translation: {err}"),
    }

    match session.fetch_results(ItemType::Pool.spec().endpoint).await {
        Ok(results) => table.add_pools(&from_results(&results)),
        Err(err) => warn!("IP pools unavailable for translation: {err}"),
    }

    match session.fetch_results(ItemType::Dnat.spec().endpoint).await {
        Ok(results) => table.add_vips(&from_results(&results)),
        Err(err) => warn!("virtual IPs unavailable for translation: {err}"),
    }

    debug!("lookup table holds {} entries", table.len());
    table
}

/// The firewall admin portal base URL.
fn firewall_url(cli: &Cli) -> Result<Url, CliError> {
    Url::parse(&format!("https://{}:{}/", cli.firewall, cli.port)).map_err(|err| {
        CliError::Validation {
            field: "firewall".into(),
            reason: err.to_string(),
        }
    })
}

fn tls_mode(cli: &Cli) -> TlsMode {
    if cli.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref path) = cli.ca_cert {
        TlsMode::CustomCa(path.clone())
    } else {
        TlsMode::System
    }
}
