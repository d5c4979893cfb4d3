use super::lexer::{self, Token, TokenKind};
use super::{Command, Flags, Literal};
use crate::errors::CommandError;
use crate::ops::WriteMode;

/// Parses one command line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let tokens = lexer::lex(line)?;
    let mut parser = Parser {
        line,
        tokens,
        pos: 0,
    };
    let command = parser.command()?;
    parser.finish()?;
    Ok(command)
}

struct Parser<'a> {
    line: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn command(&mut self) -> Result<Command, CommandError> {
        let head = self.word("expected a command")?;
        match head.text.as_str() {
            "new" => {
                let name = self.ident("expected a record name")?;
                let parent = if self.peek().is_some() {
                    Some(self.ident("expected a parent record name")?)
                } else {
                    None
                };
                Ok(Command::New { name, parent })
            }
            "def" => {
                let (record, slot) = self.path()?;
                let value = self.literal()?;
                let flags = self.flags()?;
                Ok(Command::Define {
                    record,
                    slot,
                    value,
                    flags,
                })
            }
            "accessor" => {
                let (record, slot) = self.path()?;
                let backing = self.ident("expected a backing slot name")?;
                Ok(Command::Accessor {
                    record,
                    slot,
                    backing,
                })
            }
            "serial" => {
                let (record, slot) = self.path()?;
                let backing = self.ident("expected a backing slot name")?;
                Ok(Command::Serial {
                    record,
                    slot,
                    backing,
                })
            }
            "get" => {
                let (record, slot) = self.path()?;
                Ok(Command::Get { record, slot })
            }
            "set" => {
                let (record, slot) = self.path()?;
                let value = self.literal()?;
                Ok(Command::Set {
                    record,
                    slot,
                    value,
                })
            }
            "del" => {
                let (record, slot) = self.path()?;
                Ok(Command::Delete { record, slot })
            }
            "desc" => {
                let (record, slot) = self.path()?;
                Ok(Command::Describe { record, slot })
            }
            "keys" => {
                let record = self.ident("expected a record name")?;
                let all = self.opt_all()?;
                Ok(Command::Keys { record, all })
            }
            "copy" => {
                let source = self.ident("expected a source record name")?;
                let target = self.ident("expected a target record name")?;
                let all = self.opt_all()?;
                Ok(Command::Copy {
                    source,
                    target,
                    all,
                })
            }
            "show" => {
                let record = self.ident("expected a record name")?;
                Ok(Command::Show { record })
            }
            "mode" => {
                let mode = match self.next() {
                    None => None,
                    Some(token) => match token.text.as_str() {
                        "strict" => Some(WriteMode::Strict),
                        "lenient" => Some(WriteMode::Lenient),
                        _ => {
                            return Err(self.error_at(&token, "expected 'strict' or 'lenient'"));
                        }
                    },
                };
                Ok(Command::Mode { mode })
            }
            other => Err(self.error_at(&head, format!("unknown command '{other}'"))),
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn word(&mut self, what: &str) -> Result<Token, CommandError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::Word => Ok(token),
            Some(token) => Err(self.error_at(&token, what)),
            None => Err(self.eol_error(what)),
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, CommandError> {
        let token = self.word(what)?;
        if token.text.chars().all(is_ident_char) && !token.text.is_empty() {
            Ok(token.text)
        } else {
            Err(self.error_at(&token, what))
        }
    }

    /// A dotted `record.slot` path.
    fn path(&mut self) -> Result<(String, String), CommandError> {
        let token = self.word("expected record.slot")?;
        let Some((record, slot)) = token.text.split_once('.') else {
            return Err(self.error_at(&token, "expected record.slot"));
        };
        if record.is_empty()
            || slot.is_empty()
            || !record.chars().all(is_ident_char)
            || !slot.chars().all(is_ident_char)
        {
            return Err(self.error_at(&token, "expected record.slot"));
        }
        Ok((record.to_string(), slot.to_string()))
    }

    fn literal(&mut self) -> Result<Literal, CommandError> {
        match self.next() {
            None => Err(self.eol_error("expected a value")),
            Some(token) if token.kind == TokenKind::Str => Ok(Literal::Str(token.text)),
            Some(token) => {
                if let Ok(number) = token.text.parse::<f64>() {
                    return Ok(Literal::Number(number));
                }
                match token.text.as_str() {
                    "true" => Ok(Literal::Boolean(true)),
                    "false" => Ok(Literal::Boolean(false)),
                    "null" => Ok(Literal::Null),
                    "undefined" => Ok(Literal::Undefined),
                    other if other.chars().all(is_ident_char) && !other.is_empty() => {
                        Ok(Literal::Ref(other.to_string()))
                    }
                    _ => Err(self.error_at(&token, "expected a value")),
                }
            }
        }
    }

    fn flags(&mut self) -> Result<Flags, CommandError> {
        let mut flags = Flags::default();
        while let Some(token) = self.next() {
            let enabled = match token.text.chars().next() {
                Some('+') => true,
                Some('-') => false,
                _ => return Err(self.error_at(&token, "expected a flag like +w or -e")),
            };
            match &token.text[1..] {
                "w" => flags.writable = Some(enabled),
                "e" => flags.enumerable = Some(enabled),
                "c" => flags.configurable = Some(enabled),
                _ => return Err(self.error_at(&token, "expected a flag like +w or -e")),
            }
        }
        Ok(flags)
    }

    fn opt_all(&mut self) -> Result<bool, CommandError> {
        match self.next() {
            None => Ok(false),
            Some(token) if token.text == "--all" => Ok(true),
            Some(token) => Err(self.error_at(&token, "expected --all")),
        }
    }

    fn finish(&mut self) -> Result<(), CommandError> {
        match self.next() {
            None => Ok(()),
            Some(token) => Err(self.error_at(&token, "unexpected trailing input")),
        }
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> CommandError {
        CommandError::new(message, token.offset, token.len)
    }

    fn eol_error(&self, message: impl Into<String>) -> CommandError {
        CommandError::new(message, self.line.len(), 0)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_new_with_parent() {
        assert_eq!(
            parse("new child parent").unwrap(),
            Command::New {
                name: "child".into(),
                parent: Some("parent".into()),
            }
        );
    }

    #[test]
    fn parses_define_with_flags() {
        let command = parse("def o.x 1 +w -e -c").unwrap();
        assert_eq!(
            command,
            Command::Define {
                record: "o".into(),
                slot: "x".into(),
                value: Literal::Number(1.0),
                flags: Flags {
                    writable: Some(true),
                    enumerable: Some(false),
                    configurable: Some(false),
                },
            }
        );
    }

    #[test]
    fn parses_negative_number_before_flags() {
        let command = parse("def o.x -5 -w").unwrap();
        assert_eq!(
            command,
            Command::Define {
                record: "o".into(),
                slot: "x".into(),
                value: Literal::Number(-5.0),
                flags: Flags {
                    writable: Some(false),
                    ..Flags::default()
                },
            }
        );
    }

    #[test]
    fn parses_dollar_slot_names() {
        assert_eq!(
            parse("get o.$n").unwrap(),
            Command::Get {
                record: "o".into(),
                slot: "$n".into(),
            }
        );
    }

    #[test]
    fn parses_set_with_record_reference() {
        assert_eq!(
            parse("set o.child other").unwrap(),
            Command::Set {
                record: "o".into(),
                slot: "child".into(),
                value: Literal::Ref("other".into()),
            }
        );
    }

    #[test]
    fn parses_copy_and_keys_variants() {
        assert_eq!(
            parse("copy src dst --all").unwrap(),
            Command::Copy {
                source: "src".into(),
                target: "dst".into(),
                all: true,
            }
        );
        assert_eq!(
            parse("keys o").unwrap(),
            Command::Keys {
                record: "o".into(),
                all: false,
            }
        );
    }

    #[test]
    fn parses_mode_forms() {
        assert_eq!(parse("mode").unwrap(), Command::Mode { mode: None });
        assert_eq!(
            parse("mode lenient").unwrap(),
            Command::Mode {
                mode: Some(WriteMode::Lenient),
            }
        );
    }

    #[test]
    fn unknown_command_error_points_at_the_word() {
        let err = parse("frobnicate o").unwrap_err();
        assert_eq!(err.span.offset(), 0);
        assert_eq!(err.span.len(), "frobnicate".len());
    }

    #[test]
    fn missing_value_error_points_at_end_of_line() {
        let err = parse("set o.x").unwrap_err();
        assert_eq!(err.span.offset(), "set o.x".len());
    }

    #[test]
    fn bad_path_is_rejected() {
        assert!(parse("get o").is_err());
        assert!(parse("get .x").is_err());
        assert!(parse("get o.").is_err());
    }
}
