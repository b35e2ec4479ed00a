//! User input utilities for interactive command-line prompts.
//!
//! Prompts are written to stderr so that stdout only carries results.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Read one answer from `input` after printing `prompt` to `output`.
///
/// Returns the trimmed line. End of input reads as an empty answer.
pub fn prompt_string_from(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<String> {
    write!(output, "{prompt}: ").context("Failed to write prompt")?;
    output.flush().context("Failed to write prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read user input")?;
    Ok(line.trim().to_string())
}

/// Yes/no confirmation against arbitrary streams.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive). Empty input and end of
/// input are treated as 'no'.
pub fn prompt_confirmation_from(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<bool> {
    loop {
        let answer = prompt_string_from(&format!("{prompt} (y/N)"), input, output)?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => {
                writeln!(output, "Please enter 'y' for yes or 'n' for no.")
                    .context("Failed to write prompt")?;
            }
        }
    }
}

/// Prompts the user on the terminal for a yes/no confirmation.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    prompt_confirmation_from(prompt, &mut io::stdin().lock(), &mut io::stderr())
}
