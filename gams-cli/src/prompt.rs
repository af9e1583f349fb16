//! Line-based prompts for the interactive menu and confirmations.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Print `prompt` and read one trimmed line. `None` at end of input.
pub(crate) fn read_line(prompt: &str) -> Result<Option<String>, CliError> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// True only if the user types `yes`.
pub(crate) fn confirm(prompt: &str) -> Result<bool, CliError> {
    let answer = read_line(&format!("{prompt} Type 'yes' to confirm: "))?;
    Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("yes")))
}

/// True for `y`/`yes`; `default` for an empty answer.
pub(crate) fn yes_no(prompt: &str, default: bool) -> Result<bool, CliError> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let answer = read_line(&format!("{prompt} {hint} "))?.unwrap_or_default();
    Ok(match answer.to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

/// Show a numbered list and let the user pick one entry.
///
/// Returns the chosen index, or `None` if the user entered nothing.
/// Invalid numbers are asked again.
pub(crate) fn choose<T: AsRef<str>>(title: &str, items: &[T]) -> Result<Option<usize>, CliError> {
    if items.is_empty() {
        return Ok(None);
    }
    println!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    for (i, item) in items.iter().enumerate() {
        println!(
            "  {} {}",
            format!("{:>3}.", i + 1).if_supports_color(Stdout, |t| t.dimmed()),
            item.as_ref()
        );
    }
    loop {
        let Some(answer) = read_line("Number (empty to cancel): ")? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => println!(
                "  {}",
                format!("Enter a number from 1 to {}.", items.len())
                    .if_supports_color(Stdout, |t| t.yellow())
            ),
        }
    }
}
