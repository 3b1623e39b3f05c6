/// Comment markers recognized in FRC files when no others are configured.
///
/// `!` starts ordinary comments and `>` starts the free-text description
/// lines that follow section headers.
pub const DEFAULT_COMMENT_CHARS: &str = "!>";

const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x0c'];
const QUOTES: [char; 2] = ['\'', '"'];
const ESCAPE: char = '\\';

/// Splits one line of text into whitespace-separated tokens.
///
/// Quoted substrings (single or double quotes) are never split and keep
/// their quote characters; use [`remove_outer_quotes`] to strip them. A
/// backslash protects the following character and is itself dropped, with
/// `\n`, `\t`, `\r` and `\f` translated into the matching control
/// character. An unquoted, unescaped comment character ends the line.
///
/// When `max_tokens` is non-zero, once `max_tokens - 1` tokens have been
/// produced the remainder of the line becomes the final token verbatim.
///
/// # Arguments
///
/// * `line` - The raw line to tokenize.
/// * `max_tokens` - Upper bound on the number of tokens, `0` for no limit.
/// * `comment_chars` - Characters that start a comment.
///
/// # Returns
///
/// The tokens in order of appearance.
///
/// # Examples
///
/// ```
/// use frc_forge::frc::lexer::split;
///
/// let tokens = split(r#"2.1 1 c "sp3 carbon" ! generic"#, 0, "!");
/// assert_eq!(tokens, ["2.1", "1", "c", "\"sp3 carbon\""]);
///
/// let tokens = split("2.1 1 c  sp3 carbon", 4, "!");
/// assert_eq!(tokens, ["2.1", "1", "c", "sp3 carbon"]);
/// ```
pub fn split(line: &str, max_tokens: usize, comment_chars: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut reading = false;
    let mut escaped = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        if escaped {
            token.push(unescape(c));
            reading = true;
            escaped = false;
            continue;
        }

        if c == ESCAPE {
            escaped = true;
            continue;
        }

        if quote.is_none() {
            if comment_chars.contains(c) {
                break;
            }

            if DELIMITERS.contains(&c) {
                if reading {
                    if max_tokens == 0 || tokens.len() + 1 < max_tokens {
                        tokens.push(std::mem::take(&mut token));
                        reading = false;
                    } else {
                        token.push(c);
                    }
                }
                continue;
            }
        }

        if QUOTES.contains(&c) {
            match quote {
                None => quote = Some(c),
                Some(open) if open == c => quote = None,
                Some(_) => {}
            }
        }

        token.push(c);
        reading = true;
    }

    if reading {
        tokens.push(token);
    }

    tokens
}

/// Strips one matching pair of outer quotes, if present.
///
/// ```
/// use frc_forge::frc::lexer::remove_outer_quotes;
///
/// assert_eq!(remove_outer_quotes("'sp2 carbon'"), "sp2 carbon");
/// assert_eq!(remove_outer_quotes("\"mixed'"), "\"mixed'");
/// assert_eq!(remove_outer_quotes("plain"), "plain");
/// ```
pub fn remove_outer_quotes(text: &str) -> &str {
    QUOTES
        .iter()
        .find_map(|&q| {
            text.strip_prefix(q)
                .and_then(|rest| rest.strip_suffix(q))
        })
        .unwrap_or(text)
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'f' => '\x0c',
        other => other,
    }
}
