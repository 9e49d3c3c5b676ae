// Colored terminal output for the word list and censorship results.

use colored::Colorize;

use crate::tokenize::RefreshOutcome;

/// Display the banned word list with line numbers.
pub fn display_list(words: &[String], path: &str) {
    if words.is_empty() {
        println!("Word list at {} is empty.", path);
        println!("  Add words with `wordfilter add <word>`");
        return;
    }

    println!(
        "\n{}",
        format!("=== Banned words ({} entries) ===", words.len()).bold()
    );
    println!("  {}", path.dimmed());
    println!();

    for (i, word) in words.iter().enumerate() {
        println!("  {:>4}. {}", i + 1, preview(word, 60));
    }
    println!();
}

/// Display a censorship result, highlighting whether anything changed.
pub fn display_censored(input: &str, output: &str) {
    if input == output {
        println!("{} {}", "clean".green(), output);
    } else {
        println!("{} {}", "censored".red().bold(), output);
        println!("  {} {}", "was:".dimmed(), preview(input, 120).dimmed());
    }
}

/// Display the outcome of a token cache refresh.
pub fn display_refresh(model: &str, outcome: &RefreshOutcome, cache_path: &str) {
    match outcome {
        RefreshOutcome::Fresh => {
            println!("Token cache for {} is up to date ({})", model.bold(), cache_path);
        }
        RefreshOutcome::Rebuilt { token_count } => {
            println!(
                "Token cache for {} rebuilt: {} tokens written to {}",
                model.bold(),
                token_count.to_string().yellow(),
                cache_path
            );
        }
    }
}

/// Cut long list entries and inputs down to `max_chars` characters for
/// display, marking the cut with "...".
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_untouched() {
        assert_eq!(preview("chat", 4), "chat");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(preview("censuré (chat)", 7), "censuré...");
        assert_eq!(preview("éééé", 2), "éé...");
    }
}
