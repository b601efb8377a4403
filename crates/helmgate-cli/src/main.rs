//! Helmgate CLI - terminal login client for the Helmgate admin console.
//!
//! This binary is the rendering collaborator for the login flow in
//! `helmgate-core`: it prompts for field values, forwards submit, renders
//! the flow's snapshot, and executes outbound effects by reporting them.
//! It contains no authentication decisions of its own.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use helmgate_core::{ApiClient, Config, Effect, FieldError, FormEvent, LoginFlow, SessionVault};

// ============================================================================
// Constants
// ============================================================================

/// Environment variables for scripted use; prompts fall back to these
const ENV_EMAIL: &str = "HELMGATE_EMAIL";
const ENV_PASSWORD: &str = "HELMGATE_PASSWORD";

/// Delay between outcome pumps while a submission is in flight
const PUMP_INTERVAL_MS: u64 = 50;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    println!("Usage: helmgate [--console-url <url>] [--redirect <query>] [--logout]");
    println!();
    println!("  --console-url <url>   Override the console API base URL");
    println!("  --redirect <query>    URL-encoded navigational context, e.g. 'redirectTo=%2Fsettings'");
    println!("  --logout              Clear any persisted session and exit");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("Helmgate CLI starting");

    let mut redirect_query: Option<String> = None;
    let mut console_url: Option<String> = None;
    let mut logout = false;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--redirect" => {
                i += 1;
                redirect_query = args.get(i).cloned();
            }
            "--console-url" => {
                i += 1;
                console_url = args.get(i).cloned();
            }
            "--logout" => logout = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let vault = SessionVault::new(Config::session_dir()?);

    if logout {
        vault.clear()?;
        println!("Signed out.");
        return Ok(());
    }

    // Resume a persisted session instead of prompting again
    if let Ok(Some(session)) = vault.load() {
        println!(
            "Already signed in as {} (since {}).",
            session.user.display_name(),
            session.created_at.format("%b %d, %Y")
        );
        println!("Run with --logout to sign out first.");
        return Ok(());
    }

    let api = match console_url.or_else(|| config.api_base_url.clone()) {
        Some(url) => ApiClient::with_base_url(&url)?,
        None => ApiClient::new()?,
    };

    let mut flow = LoginFlow::new(api, vault, redirect_query);

    println!("\n=== Helmgate Login ===\n");

    let mut default_email = std::env::var(ENV_EMAIL)
        .ok()
        .or_else(|| config.last_email.clone());
    let mut env_password = std::env::var(ENV_PASSWORD).ok();

    loop {
        let email = prompt_email(default_email.as_deref())?;
        default_email = Some(email.clone());

        let password = match env_password.take() {
            Some(password) => password,
            None => rpassword::prompt_password("Password: ")?,
        };
        let remember_me = prompt_remember()?;

        flow.apply(FormEvent::EmailChanged(email.clone()));
        flow.apply(FormEvent::PasswordChanged(password));
        flow.apply(FormEvent::RememberMeToggled(remember_me));

        flow.submit();

        {
            let snapshot = flow.snapshot();
            if !snapshot.field_errors.is_empty() {
                if let Some(error) = snapshot.field_errors.email {
                    println!("  email: {}", field_error_text(error));
                }
                if let Some(error) = snapshot.field_errors.password {
                    println!("  password: {}", field_error_text(error));
                }
                println!();
                continue;
            }
        }

        println!("\nAuthenticating...");
        let effects = wait_for_outcome(&mut flow).await;

        if let Some(error) = flow.snapshot().error {
            println!("\n[!] {error}\n");
            continue;
        }

        for effect in effects {
            match effect {
                Effect::ChangeLocale(language) => println!("Locale switched to {language}."),
                Effect::Navigate(path) => println!("Continue at {path}"),
            }
        }

        if let Ok(Some(session)) = flow.vault().load() {
            println!("Signed in as {}.", session.user.display_name());
            config.last_email = Some(email);
            if let Err(e) = config.save() {
                warn!(error = %e, "Failed to save config");
            }
        }

        return Ok(());
    }
}

/// Pump the flow until the in-flight submission settles.
/// Submissions are never cancelled; this waits as long as the flow does.
async fn wait_for_outcome(flow: &mut LoginFlow) -> Vec<Effect> {
    let mut effects = Vec::new();
    loop {
        effects.extend(flow.process_outcomes());
        if !flow.is_submitting() {
            return effects;
        }
        tokio::time::sleep(Duration::from_millis(PUMP_INTERVAL_MS)).await;
    }
}

fn prompt_email(default: Option<&str>) -> Result<String> {
    match default {
        Some(default) => print!("Email [{default}]: "),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        if let Some(default) = default {
            return Ok(default.to_string());
        }
    }
    Ok(input.to_string())
}

fn prompt_remember() -> Result<bool> {
    print!("Stay signed in? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// English rendering of the core's translatable field-error keys
fn field_error_text(error: FieldError) -> &'static str {
    match error {
        FieldError::Required => "This field is required",
        FieldError::InvalidEmail => "Enter a valid email address",
    }
}
