use std::borrow::Cow;

use owo_colors::OwoColorize;

const COMMANDS: [&str; 13] = [
    "new", "def", "accessor", "serial", "get", "set", "del", "desc", "keys", "copy", "show",
    "mode", "help",
];

const LITERALS: [&str; 4] = ["true", "false", "null", "undefined"];

pub fn highlight_line(line: &str) -> Cow<'_, str> {
    let mut out = String::new();
    for (index, word) in line.split(' ').enumerate() {
        if index > 0 {
            out.push(' ');
        }
        if index == 0 && COMMANDS.contains(&word) {
            out.push_str(&word.blue().bold().to_string());
        } else if LITERALS.contains(&word) {
            out.push_str(&word.cyan().to_string());
        } else {
            out.push_str(word);
        }
    }
    Cow::Owned(out)
}

pub fn highlight_prompt(prompt: &str) -> Cow<'_, str> {
    if prompt == "> " {
        return Cow::Owned(format!("{} ", ">".bright_green().bold()));
    }
    Cow::Borrowed(prompt)
}

pub fn highlight_hint(hint: &str) -> Cow<'_, str> {
    Cow::Owned(hint.bright_black().to_string())
}
