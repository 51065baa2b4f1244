//! Login, logout and whoami.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use postdesk_core::auth::{self, LoginError};
use postdesk_core::config::Config;
use postdesk_core::models::Credentials;
use postdesk_core::session::mask_token;

pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        anyhow::bail!("Email is required");
    }

    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }

    let api = super::client(config)?;
    let credentials = Credentials {
        email: email.to_string(),
        password,
    };

    match auth::log_in(&api, &credentials).await {
        Ok(name) => {
            println!("Logged in as {name}");
            Ok(())
        }
        Err(LoginError::InvalidCredentials) => anyhow::bail!("Invalid email or password"),
        Err(e) => Err(anyhow::Error::new(e).context("log in")),
    }
}

/// Reads one line from stdin, prompting only when attached to a terminal.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush().ok();
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn logout() -> Result<()> {
    let session = super::open_session()?;
    if !session.is_logged_in() && session.token().is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    session.logout().context("clear session")?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(verbose: bool) -> Result<()> {
    let session = super::open_session()?;
    if session.is_logged_in() {
        println!("{}", session.display_name());
        if verbose {
            let token = session.token().map_or_else(|| "(none)".to_string(), |t| mask_token(&t));
            println!("Token: {token}");
        }
    } else {
        println!("Not logged in.");
    }
    Ok(())
}
