//! # Fundika (Authentication & Access Control)
//!
//! `fundika` is the authentication and access-control service for the Fundika
//! services marketplace. It serves three distinct principal types, each with
//! its own credential lifecycle and authorization rules:
//!
//! - **Admins**: platform staff with a hierarchical role
//!   (`SUPER_ADMIN > ADMIN > MODERATOR > SUPPORT`).
//! - **Fundis**: service providers whose feature access is gated by a
//!   subscription plan and a time-boxed trial.
//! - **Clients**: employers whose only authorization axis beyond
//!   authentication is an active account.
//!
//! ## Bearer Tokens
//!
//! Logins mint a signed, self-contained HS256 bearer token carrying the
//! principal id, principal type, and expiry. Tokens are stateless: every
//! authenticated request re-loads the principal from the database, so a token
//! is only accepted while its principal still exists and is `ACTIVE`. There is
//! no server-side revocation list; a logout cannot invalidate tokens already
//! held by other devices before their natural expiry.
//!
//! ## Subscription Gating
//!
//! Fundi accounts carry a `FREE`/`PREMIUM` plan and a `TRIAL`/`ACTIVE`/`EXPIRED`
//! status. A due trial is lazily expired on the next authenticated request,
//! before any handler runs; no background sweeper exists. Transitions are
//! monotonic: once out of `TRIAL`, an account can never re-enter it.
//!
//! ## Client-Side Session Store
//!
//! The [`client`] module provides the injectable session store used by the
//! frontend shells: the token lives in a secure, same-site cookie slot and the
//! profile snapshot in a persisted record. The snapshot is advisory only;
//! authorization always derives from the server.

pub mod api;
pub mod cli;
pub mod client;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
