use anyhow::{Context, Result, bail};
use std::io::{BufRead, IsTerminal, Write};

/// Environment variable checked before falling back to stdin.
pub const PASSWORD_ENV: &str = "CINEDEX_PASSWORD";

/// Reads a password without it ever appearing on the command line.
pub fn read_password() -> Result<String> {
    let env = std::env::var(PASSWORD_ENV).ok();
    let stdin = std::io::stdin();
    if env.as_deref().is_none_or(str::is_empty) && stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush().ok();
    }
    password_from(env, stdin.lock())
}

/// A non-empty `env` value wins; otherwise the first line of `input` is used.
pub fn password_from(env: Option<String>, mut input: impl BufRead) -> Result<String> {
    if let Some(password) = env.filter(|value| !value.is_empty()) {
        return Ok(password);
    }

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read the password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("No password given: set {} or pass it on stdin", PASSWORD_ENV);
    }
    Ok(password.to_string())
}
