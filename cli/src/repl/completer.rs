use rustyline::completion::Pair;

pub fn complete_line(line: &str, pos: usize) -> (usize, Vec<Pair>) {
    let safe_pos = pos.min(line.len());
    let prefix = &line[..safe_pos];

    let start = word_start(prefix);
    let needle = &prefix[start..];

    let candidates = if start == 0 {
        commands()
    } else {
        trailing_words()
    };
    let words = candidates
        .iter()
        .copied()
        .filter(|word| word.starts_with(needle) && !needle.is_empty())
        .collect::<Vec<_>>();

    (start, pairs(&words))
}

fn pairs(values: &[&str]) -> Vec<Pair> {
    values
        .iter()
        .map(|v| Pair {
            display: (*v).to_string(),
            replacement: (*v).to_string(),
        })
        .collect()
}

fn word_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(idx, ch)| idx + ch.len_utf8())
}

fn commands() -> &'static [&'static str] {
    &[
        "new", "def", "accessor", "serial", "get", "set", "del", "desc", "keys", "copy", "show",
        "mode", "help",
    ]
}

fn trailing_words() -> &'static [&'static str] {
    &[
        "--all",
        "strict",
        "lenient",
        "true",
        "false",
        "null",
        "undefined",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_command_words_at_line_start() {
        let (start, pairs) = complete_line("de", 2);
        assert_eq!(start, 0);
        let words: Vec<_> = pairs.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(words, ["def", "del", "desc"]);
    }

    #[test]
    fn completes_trailing_words_after_a_command() {
        let (start, pairs) = complete_line("keys o --a", 10);
        assert_eq!(start, 7);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "--all");
    }
}
