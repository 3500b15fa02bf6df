pub mod server;

use secrecy::SecretString;

/// Available commands
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        token_secret: SecretString,
        token_ttl_hours: i64,
        frontend_base_url: String,
    },
}
