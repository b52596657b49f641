use crate::{cli::actions::Action, tls::TlsConfig};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::net::IpAddr;

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the DSN is invalid or required parameters are missing
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    // Extract MySQL DSN
    let dsn_str = matches
        .get_one::<String>("mysql-dsn")
        .context("MySQL DSN is required")?;
    let mysql_dsn = dsn::parse(dsn_str).context("Failed to parse MySQL DSN")?;

    // Extract TLS configuration from DSN query parameters
    let tls = TlsConfig::from_dsn(&mysql_dsn);

    let mongodb_uri = matches
        .get_one::<String>("mongodb-uri")
        .context("MongoDB URI is required")?
        .clone();

    let mongodb_database = matches.get_one::<String>("mongodb-database").cloned();

    let collection = matches
        .get_one::<String>("collection")
        .cloned()
        .unwrap_or_else(|| crate::probe::DEFAULT_COLLECTION.to_string());

    // Extract and validate listen address
    let listen = matches
        .get_one::<String>("listen")
        .map(|addr| {
            addr.parse::<IpAddr>()
                .with_context(|| format!("Invalid IP address: {addr}"))
        })
        .transpose()?;

    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    Ok(Action::Serve {
        mysql_dsn,
        tls,
        mongodb_uri,
        mongodb_database,
        collection,
        listen,
        port,
    })
}

/// Map `-v` occurrences to a tracing filter directive
#[must_use]
pub const fn verbosity(count: u8) -> &'static str {
    match count {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
