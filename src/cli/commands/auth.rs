use clap::{Arg, Command};

pub const ARG_TOKEN_SECRET: &str = "token-secret";
pub const ARG_TOKEN_TTL_HOURS: &str = "token-ttl-hours";
pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";

/// HS256 keys shorter than this are trivially brute-forced.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_TOKEN_SECRET)
                .long(ARG_TOKEN_SECRET)
                .help("Secret used to sign and verify bearer tokens (HS256)")
                .env("FUNDIKA_TOKEN_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL_HOURS)
                .long(ARG_TOKEN_TTL_HOURS)
                .help("Bearer token lifetime in hours")
                .env("FUNDIKA_TOKEN_TTL_HOURS")
                .default_value("8")
                .value_parser(clap::value_parser!(i64).range(1..=168)),
        )
        .arg(
            Arg::new(ARG_FRONTEND_BASE_URL)
                .long(ARG_FRONTEND_BASE_URL)
                .help("Frontend origin allowed by CORS")
                .env("FUNDIKA_FRONTEND_BASE_URL")
                .default_value("https://fundika.dev"),
        )
}
