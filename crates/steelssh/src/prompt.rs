//! Terminal prompts.
//!
//! Every prompt blocks on stdin, so async callers go through
//! [`blocking`] to keep the runtime free to notice Ctrl+C.

use dialoguer::Input;

use crate::error::{CliError, prompt_err};

/// Run a blocking prompt on the blocking pool.
pub async fn blocking<T, F>(f: F) -> Result<T, CliError>
where
    F: FnOnce() -> Result<T, CliError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CliError::Internal(format!("prompt task failed: {e}")))?
}

/// Ask for a 1-based menu number. Anything that is not a number in
/// `1..=len` returns `None`.
pub async fn choose(hint: &'static str, len: usize) -> Result<Option<usize>, CliError> {
    let raw = blocking(move || {
        eprintln!("{hint}");
        Input::<String>::new()
            .with_prompt("Selection")
            .allow_empty(true)
            .interact_text()
            .map_err(|dialoguer::Error::IO(e)| prompt_err(e))
    })
    .await?;
    Ok(parse_choice(&raw, len))
}

fn parse_choice(raw: &str, len: usize) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
}

/// Ask for a required free-text value.
pub fn text(prompt: &str, default: Option<&str>) -> Result<String, CliError> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_owned());
    }
    let value = input.interact_text().map_err(|dialoguer::Error::IO(e)| prompt_err(e))?;
    let value = value.trim().to_owned();
    if value.is_empty() {
        return Err(CliError::Validation {
            field: prompt.to_lowercase(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(value)
}

/// Ask for a password without echo.
pub fn password(prompt: &str) -> Result<String, CliError> {
    let value = rpassword::prompt_password(format!("{prompt}: ")).map_err(prompt_err)?;
    if value.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(value)
}
