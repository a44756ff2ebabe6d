//! Splitting and quoting of extra ffmpeg arguments

use crate::domain::error::ArgumentSplitError;

/// Split a user-supplied argument string into words.
///
/// Follows POSIX shell rules closely enough for ffmpeg options: whitespace
/// separates words, single quotes are literal, double quotes allow `\"`
/// and `\\`, and a backslash outside quotes escapes the next character.
pub fn split_args(input: &str) -> Result<Vec<String>, ArgumentSplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => {
                            return Err(ArgumentSplitError::UnterminatedQuote {
                                quote: '\'',
                                input: input.to_string(),
                            })
                        }
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => {
                                return Err(ArgumentSplitError::UnterminatedQuote {
                                    quote: '"',
                                    input: input.to_string(),
                                })
                            }
                        },
                        Some(c) => current.push(c),
                        None => {
                            return Err(ArgumentSplitError::UnterminatedQuote {
                                quote: '"',
                                input: input.to_string(),
                            })
                        }
                    }
                }
            }
            '\\' => match chars.next() {
                Some(c) => {
                    in_word = true;
                    current.push(c);
                }
                None => {
                    return Err(ArgumentSplitError::TrailingEscape {
                        input: input.to_string(),
                    })
                }
            },
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

/// Quote an argument so the rendered command can be pasted into a shell
pub fn quote_arg(arg: &str) -> String {
    const SPECIAL: &[char] = &[
        '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}', '<', '>', '|', '&',
        ';', '#', '~',
    ];

    if arg.is_empty() {
        return "''".to_string();
    }

    if arg.chars().any(|c| c.is_whitespace() || SPECIAL.contains(&c)) {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            split_args("-c:v libx264  -crf 0\t-preset ultrafast").unwrap(),
            vec!["-c:v", "libx264", "-crf", "0", "-preset", "ultrafast"]
        );
    }

    #[test]
    fn empty_and_blank_give_no_words() {
        assert!(split_args("").unwrap().is_empty());
        assert!(split_args("   ").unwrap().is_empty());
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            split_args(r#"-metadata title="My talk" -vf 'scale=1280:-2'"#).unwrap(),
            vec!["-metadata", "title=My talk", "-vf", "scale=1280:-2"]
        );
    }

    #[test]
    fn empty_quotes_make_an_empty_word() {
        assert_eq!(split_args("-i ''").unwrap(), vec!["-i", ""]);
    }

    #[test]
    fn backslash_escapes() {
        assert_eq!(split_args(r"a\ b").unwrap(), vec!["a b"]);
        assert_eq!(split_args(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(matches!(
            split_args("-vf 'scale=1:1"),
            Err(ArgumentSplitError::UnterminatedQuote { quote: '\'', .. })
        ));
        assert!(matches!(
            split_args("\"abc"),
            Err(ArgumentSplitError::UnterminatedQuote { quote: '"', .. })
        ));
    }

    #[test]
    fn trailing_backslash_is_an_error() {
        assert!(matches!(
            split_args("abc\\"),
            Err(ArgumentSplitError::TrailingEscape { .. })
        ));
    }

    #[test]
    fn quote_leaves_plain_args_alone() {
        assert_eq!(quote_arg("-c:v"), "-c:v");
        assert_eq!(quote_arg(":0.0+0,0"), ":0.0+0,0");
        assert_eq!(quote_arg("hw:1,0"), "hw:1,0");
    }

    #[test]
    fn quote_wraps_special_args() {
        assert_eq!(quote_arg("Screencast 2024.mkv"), "'Screencast 2024.mkv'");
        assert_eq!(quote_arg("[out]"), "'[out]'");
        assert_eq!(quote_arg("it's"), r"'it'\''s'");
        assert_eq!(quote_arg(""), "''");
    }
}
