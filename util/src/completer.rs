use rustyline::{Context, Helper, Highlighter, Hinter, Result, Validator, completion::Completer};
use std::collections::BTreeSet;

/// A rustyline completer for the REPL.
///
/// Words complete against the language keywords and the names bound so far. A `:` at the
/// start of the line completes against the commands.
#[derive(Helper, Highlighter, Hinter, Validator)]
pub struct KeywordsCompleter {
    keywords: BTreeSet<String>,
    commands: BTreeSet<String>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

impl KeywordsCompleter {
    pub fn new(
        keywords: impl IntoIterator<Item = impl Into<String>>,
        commands: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add_keyword(&mut self, keyword: impl Into<String>) {
        self.keywords.insert(keyword.into());
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let start = line[..pos]
            .char_indices()
            .rev()
            .find(|&(_, c)| !is_word_char(c))
            .map_or(0, |(i, c)| i + c.len_utf8());
        let prefix = &line[start..pos];

        let in_command = line[..start].trim_start() == ":";
        let words = if in_command {
            &self.commands
        } else {
            &self.keywords
        };

        let completions = words
            .iter()
            .filter(|w| w.starts_with(prefix))
            .cloned()
            .collect();

        (start, completions)
    }
}

impl Completer for KeywordsCompleter {
    type Candidate = String;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context) -> Result<(usize, Vec<String>)> {
        Ok(self.candidates(line, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn completer() -> KeywordsCompleter {
        let mut completer = KeywordsCompleter::new(["lambda"], ["eval", "eval1", "bind"]);
        completer.add_keyword("id");
        completer
    }

    #[test]
    fn completes_commands_after_colon() {
        assert_eq!(
            completer().candidates(":ev", 3),
            (1, vec!["eval".to_string(), "eval1".to_string()])
        );
    }

    #[test]
    fn completes_bound_names() {
        assert_eq!(
            completer().candidates("(\\x. x) i", 9),
            (8, vec!["id".to_string()])
        );
        assert_eq!(completer().candidates("la", 2), (0, vec!["lambda".to_string()]));
    }
}
