//! Authentication CLI commands
//!
//! `login`, `logout`, `status` and `whoami`.

use crate::api::MoneyLoverClient;
use crate::crypto::SecureString;
use crate::display::{format_session_status, format_user_info, to_json, SessionStatus};
use crate::error::{MoneyLoverError, MoneyLoverResult};

use super::CliContext;

/// Log in, verify the session works, and store its credentials
pub fn handle_login(
    ctx: &CliContext,
    email: &str,
    password: Option<String>,
) -> MoneyLoverResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(MoneyLoverError::Validation("Email cannot be empty".into()));
    }

    let password = match password {
        Some(password) => SecureString::new(password),
        None => prompt_password(&format!("Password for {}: ", email))?,
    };
    if password.is_empty() {
        return Err(MoneyLoverError::Validation("Password cannot be empty".into()));
    }

    let mut client =
        MoneyLoverClient::login(ctx.transport()?, ctx.settings.endpoints(), email, &password)?;

    // Confirm the new session works before storing it
    client.refresh()?;
    let wallets = client.get_wallets()?;

    let store = ctx.credential_store();
    store.save(&client.export())?;

    if ctx.json {
        let summary = serde_json::json!({
            "email": email,
            "client_id": client.session().client_id(),
            "wallets": wallets.len(),
        });
        print!("{}", to_json(&summary)?);
    } else {
        println!(
            "Logged in as {} ({} wallet{})",
            email,
            wallets.len(),
            if wallets.len() == 1 { "" } else { "s" }
        );
        println!("Credentials saved to {}", store.path().display());
    }

    Ok(())
}

/// Forget the stored credentials
pub fn handle_logout(ctx: &CliContext) -> MoneyLoverResult<()> {
    if ctx.credential_store().clear()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Show whether credentials are stored; with `check`, prove they still work
pub fn handle_status(ctx: &CliContext, check: bool) -> MoneyLoverResult<()> {
    let store = ctx.credential_store();
    let credentials = store.load()?;

    let mut status = SessionStatus {
        client_id: credentials.as_ref().map(|c| c.client_id.clone()),
        credentials_path: store.path().display().to_string(),
        expires_at: None,
    };

    if check && credentials.is_some() {
        let client = ctx.open_client()?;
        status.expires_at = client.session().access_token_expiry();
    }

    if ctx.json {
        let summary = serde_json::json!({
            "logged_in": status.client_id.is_some(),
            "client_id": status.client_id,
            "credentials": status.credentials_path,
            "expires_at": status.expires_at,
        });
        print!("{}", to_json(&summary)?);
    } else {
        print!("{}", format_session_status(&status));
    }

    Ok(())
}

/// Show the logged-in user
pub fn handle_whoami(ctx: &CliContext) -> MoneyLoverResult<()> {
    let user = ctx.with_client(|client| client.get_user_info())?;

    if ctx.json {
        print!("{}", to_json(&user)?);
    } else {
        print!("{}", format_user_info(&user));
    }

    Ok(())
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> MoneyLoverResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::new)
        .map_err(|e| MoneyLoverError::Io(format!("Failed to read password: {}", e)))
}
