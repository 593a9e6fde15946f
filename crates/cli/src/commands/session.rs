//! Connecting to the backend and optional login.

use secrecy::SecretString;
use tracing::info;

use tienda_admin::AdminClient;
use tienda_storefront::{ApiClient, ClientConfig, Storefront};

use super::CliError;

/// Environment variable holding the password for `--username`.
pub const PASSWORD_VAR: &str = "TIENDA_PASSWORD";

/// Customer and admin bindings sharing one cookie jar.
#[derive(Debug)]
pub struct Session {
    pub storefront: Storefront,
    pub admin: AdminClient,
}

/// Build a client from the environment and log in when a username is given.
pub async fn connect(username: Option<&str>) -> Result<Session, CliError> {
    let config = ClientConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let session = Session {
        storefront: Storefront::new(client.clone()),
        admin: AdminClient::new(client),
    };

    if let Some(username) = username {
        let password = std::env::var(PASSWORD_VAR)
            .map(SecretString::from)
            .map_err(|_| CliError::MissingPassword(PASSWORD_VAR))?;
        session.storefront.login(username, &password).await?;
        info!(username, "Logged in");
    }

    Ok(session)
}
