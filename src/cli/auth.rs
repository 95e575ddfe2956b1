//! Login, logout and status commands

use zeroize::Zeroizing;

use super::{prompt_string, run_blocking};
use crate::api::Backend;
use crate::config::Settings;
use crate::error::{SpendlinkError, SpendlinkResult};
use crate::services::AuthService;
use crate::store::StoreHandle;

/// Environment variable read instead of prompting for a password
pub const PASSWORD_ENV: &str = "SPENDLINK_PASSWORD";

/// Handle `spendlink login`
pub async fn handle_login(
    backend: &dyn Backend,
    store: &StoreHandle,
    settings: &Settings,
    email: Option<String>,
) -> SpendlinkResult<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_string("Email: ").await?,
    };

    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) => Zeroizing::new(password),
        Err(_) => Zeroizing::new(
            run_blocking(|| {
                rpassword::prompt_password("Password: ")
                    .map_err(|e| SpendlinkError::Io(format!("Failed to read password: {}", e)))
            })
            .await?,
        ),
    };

    let state = AuthService::new(backend, store)
        .login(&email, &password)
        .await?;

    let name = state
        .auth
        .user
        .as_ref()
        .map(|u| u.display_name())
        .unwrap_or_default();
    println!("Logged in as {}", name);

    if !state.auth.is_active {
        println!("Your subscription is not active yet.");
    }
    if !settings.setup_completed {
        println!("Run 'spendlink setup' to link your bank.");
    }
    Ok(())
}

/// Handle `spendlink logout`
pub async fn handle_logout(backend: &dyn Backend, store: &StoreHandle) -> SpendlinkResult<()> {
    if !store.snapshot().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    AuthService::new(backend, store).logout().await?;
    println!("Logged out.");
    Ok(())
}

/// Handle `spendlink status`
pub async fn handle_status(
    backend: &dyn Backend,
    store: &StoreHandle,
    settings: &Settings,
) -> SpendlinkResult<()> {
    let service = AuthService::new(backend, store);
    let Ok(state) = service.require_authenticated() else {
        println!("Not logged in.");
        println!("Server: {}", settings.api_base_url);
        return Ok(());
    };

    if let Some(user) = &state.auth.user {
        println!("Logged in as {} (account {})", user.display_name(), user.account_id);
    }
    println!("Server: {}", settings.api_base_url);

    let active = service.refresh_subscription().await?;
    println!(
        "Subscription: {}",
        if active { "active" } else { "inactive" }
    );
    println!(
        "Bank setup: {}",
        if settings.setup_completed {
            "complete"
        } else {
            "not done (run 'spendlink setup')"
        }
    );
    Ok(())
}
