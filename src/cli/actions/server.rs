use crate::api::{self, AuthConfig};
use crate::cli::actions::Action;
use anyhow::Result;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            token_secret,
            token_ttl_hours,
            frontend_base_url,
        } => {
            // Reject malformed DSNs before the pool ever sees them
            let dsn = Url::parse(&dsn)?;

            let config = AuthConfig::new(token_secret, frontend_base_url)
                .with_token_ttl_seconds(token_ttl_hours * 3600);

            api::new(port, dsn.to_string(), config).await?;
        }
    }

    Ok(())
}
