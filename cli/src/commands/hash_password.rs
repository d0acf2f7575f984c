use anyhow::{bail, Context, Result};
use colored::*;
use std::io::{self, BufRead, IsTerminal};

/// Print an argon2 PHC hash suitable for `AUTH_PASSWORD`
pub fn execute(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    if password.is_empty() {
        bail!("Password cannot be empty");
    }

    let hash = user::hash_password(&password).context("Failed to hash password")?;
    println!("{}", hash);

    if io::stdout().is_terminal() {
        eprintln!(
            "{}",
            "Set this value as AUTH_PASSWORD in the server environment".dimmed()
        );
    }

    Ok(())
}

fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
