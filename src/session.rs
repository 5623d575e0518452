// Session lifecycle: login stores the server-issued token, logout removes it
// and revokes it server-side.

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use crate::models::LoginRequest;
use crate::prompt::Prompter;

/// Prompt for credentials, open a session and persist its token.
///
/// Refuses to run while a token is stored, before prompting or contacting
/// the server.
pub fn login(api: &ApiClient, prompter: &mut dyn Prompter) -> Result<String> {
    if api.tokens().exists() {
        return Err(CliError::AlreadyLoggedIn);
    }

    let credentials = prompter.credentials()?;
    let req = LoginRequest {
        email: credentials.email,
        password: credentials.password,
    };
    let resp = api.create_session(&req)?;
    api.tokens().write(&resp.token)?;
    tracing::info!(email = %req.email, "logged in");
    Ok(resp.token)
}

/// Read the token, clear it locally, then revoke it on the server.
///
/// The local token is gone once this returns, whether or not it could be
/// read or the revoke call succeeded; those failures are still returned to
/// the caller.
pub fn logout(api: &ApiClient) -> Result<()> {
    let token = api.tokens().read();
    api.tokens().clear()?;
    let token = token?;
    tracing::info!("local session cleared");
    api.revoke_session(&token)
}
