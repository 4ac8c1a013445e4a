//! Line-oriented input helpers. Every prompt shows its default and falls
//! back to it on empty or unparseable input.

use std::io::{self, BufRead, Write};

pub fn prompt_line(prompt: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return String::new();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

pub fn prompt_f64(prompt: &str, default: f64) -> f64 {
    let input = prompt_line(&format!("{} [{}]: ", prompt, default));
    input.parse().unwrap_or(default)
}

pub fn prompt_u32(prompt: &str, default: u32) -> u32 {
    let input = prompt_line(&format!("{} [{}]: ", prompt, default));
    input.parse().unwrap_or(default)
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> bool {
    let hint = if default { "Y/n" } else { "y/N" };
    let input = prompt_line(&format!("{} [{}]: ", prompt, hint)).to_lowercase();
    match input.as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Prompt until one of `options` (case-insensitive) or empty is entered.
pub fn prompt_choice(prompt: &str, options: &[&str], default: &str) -> String {
    loop {
        let input = prompt_line(&format!("{} [{}]: ", prompt, default)).to_lowercase();
        if input.is_empty() {
            return default.to_string();
        }
        if let Some(choice) = options.iter().find(|o| o.to_lowercase() == input) {
            return choice.to_string();
        }
        println!("Please enter one of: {}", options.join(", "));
    }
}
