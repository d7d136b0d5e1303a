//! Command-Line Lexer
//!
//! Splits an input line into words using POSIX shell quoting rules:
//! single quotes are literal, double quotes allow `\"` and `\\`, a
//! backslash outside quotes escapes the next character, and `#` starts a
//! comment at a word boundary. There is no expansion of any kind.

use thiserror::Error;

/// Tokenization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("no closing quotation")]
    UnterminatedQuote,
}

/// Split a command line into words.
pub fn split_line(input: &str) -> Result<Vec<String>, SplitError> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut has_word = false;
    let mut i = 0;

    while i < len {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                if has_word {
                    words.push(std::mem::take(&mut word));
                    has_word = false;
                }
                i += 1;
            }
            '#' if !has_word => break,
            '\'' => {
                has_word = true;
                i += 1;
                loop {
                    if i >= len {
                        return Err(SplitError::UnterminatedQuote);
                    }
                    let ch = chars[i];
                    i += 1;
                    if ch == '\'' {
                        break;
                    }
                    word.push(ch);
                }
            }
            '"' => {
                has_word = true;
                i += 1;
                loop {
                    if i >= len {
                        return Err(SplitError::UnterminatedQuote);
                    }
                    let ch = chars[i];
                    i += 1;
                    if ch == '"' {
                        break;
                    }
                    if ch == '\\' && i < len && matches!(chars[i], '"' | '\\') {
                        word.push(chars[i]);
                        i += 1;
                    } else {
                        word.push(ch);
                    }
                }
            }
            '\\' => {
                // Escape the next character; a dangling backslash is dropped
                i += 1;
                if i < len {
                    word.push(chars[i]);
                    has_word = true;
                    i += 1;
                }
            }
            _ => {
                word.push(c);
                has_word = true;
                i += 1;
            }
        }
    }

    if has_word {
        words.push(word);
    }
    Ok(words)
}
