use notes_core::state::AuthState;
use notes_core::AppContainer;

use crate::cli::AuthCommands;
use crate::commands::common::open_container;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, api_url: Option<String>) -> Result<(), CliError> {
    let container = open_container(api_url)?;
    run_auth_with(command, &container).await
}

pub async fn run_auth_with(command: AuthCommands, container: &AppContainer) -> Result<(), CliError> {
    let mut auth = container.auth_state();
    match command {
        AuthCommands::Signup { email, password } => {
            require_credentials(&email, &password)?;
            auth.signup(&email, &password).await;
            ensure_signed_in(&auth)?;
            println!("Account created; signed in as {email}");
            Ok(())
        }
        AuthCommands::Login { email, password } => {
            require_credentials(&email, &password)?;
            auth.login(&email, &password).await;
            ensure_signed_in(&auth)?;
            println!("Signed in as {email}");
            Ok(())
        }
        AuthCommands::Logout => {
            auth.logout();
            println!("Signed out");
            Ok(())
        }
        AuthCommands::Me => {
            if !auth.is_authenticated() {
                return Err(CliError::NotSignedIn);
            }
            let user = container.auth_repository.me().await.map_err(|error| {
                if error.is_unauthorized() {
                    CliError::SessionExpired
                } else {
                    CliError::Core(error)
                }
            })?;
            println!(
                "{} (id {}, since {})",
                user.email,
                user.id,
                user.created_at.format("%Y-%m-%d")
            );
            Ok(())
        }
        AuthCommands::Status => {
            if !auth.is_authenticated() {
                println!("Not signed in");
                return Ok(());
            }
            match auth.refresh_me().await {
                Some(user) => println!("Signed in as {}", user.email),
                None => println!("Token stored but not accepted by {}", container.api.base_url()),
            }
            Ok(())
        }
    }
}

fn require_credentials(email: &str, password: &str) -> Result<(), CliError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(CliError::MissingCredentials);
    }
    Ok(())
}

fn ensure_signed_in(auth: &AuthState) -> Result<(), CliError> {
    if let Some(message) = auth.error() {
        return Err(CliError::Auth(message.to_string()));
    }
    if !auth.is_authenticated() {
        return Err(CliError::Auth("no token was issued".to_string()));
    }
    Ok(())
}
