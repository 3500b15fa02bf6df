//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the appropriate
//! action, such as starting the API server with its full configuration state.

use crate::cli::actions::Action;
use crate::cli::commands::{ARG_DSN, ARG_PORT, auth};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    // Reject secrets too short to key HS256
    crate::cli::commands::validate(matches).map_err(|e| anyhow::anyhow!(e))?;

    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    let token_secret = matches
        .get_one::<String>(auth::ARG_TOKEN_SECRET)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --token-secret")?;

    let token_ttl_hours = matches
        .get_one::<i64>(auth::ARG_TOKEN_TTL_HOURS)
        .copied()
        .unwrap_or(8);

    let frontend_base_url = matches
        .get_one::<String>(auth::ARG_FRONTEND_BASE_URL)
        .cloned()
        .unwrap_or_else(|| "https://fundika.dev".to_string());

    Ok(Action::Server {
        port,
        dsn,
        token_secret,
        token_ttl_hours,
        frontend_base_url,
    })
}
