use crate::errors::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Str,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
    pub len: usize,
}

/// Splits a command line into whitespace-separated words and quoted strings,
/// keeping byte spans for diagnostics.
pub fn lex(line: &str) -> Result<Vec<Token>, CommandError> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '"' || ch == '\'' {
            chars.next();
            let quote = ch;
            let mut text = String::new();
            let mut escaped = false;
            let mut closed = false;
            let mut end = start + ch.len_utf8();
            for (idx, c) in chars.by_ref() {
                end = idx + c.len_utf8();
                if escaped {
                    text.push(c);
                    escaped = false;
                    continue;
                }
                if c == '\\' {
                    escaped = true;
                    continue;
                }
                if c == quote {
                    closed = true;
                    break;
                }
                text.push(c);
            }
            if !closed {
                return Err(CommandError::new(
                    "unterminated string",
                    start,
                    line.len() - start,
                ));
            }
            tokens.push(Token {
                kind: TokenKind::Str,
                text,
                offset: start,
                len: end - start,
            });
            continue;
        }

        let mut text = String::new();
        let mut end = start;
        while let Some(&(idx, c)) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            text.push(c);
            end = idx + c.len_utf8();
            chars.next();
        }
        tokens.push(Token {
            kind: TokenKind::Word,
            text,
            offset: start,
            len: end - start,
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_words_and_strings() {
        let tokens = lex("def o.x \"hello world\" +w").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].text, "def");
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].text, "hello world");
        assert_eq!(tokens[3].text, "+w");
    }

    #[test]
    fn string_spans_cover_the_quotes() {
        let tokens = lex("set o.x 'hi'").unwrap();
        let token = &tokens[2];
        assert_eq!(token.offset, 8);
        assert_eq!(token.len, 4);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = lex("set o.x \"oops").unwrap_err();
        assert_eq!(err.span.offset(), 8);
    }

    #[test]
    fn escapes_inside_strings() {
        let tokens = lex(r#"set o.x "a \"b\" c""#).unwrap();
        assert_eq!(tokens[2].text, "a \"b\" c");
    }
}
