use crate::error::{Result, SelectorError};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Source of human decisions during a probe
///
/// Keeps the finders headless: a terminal, a GUI or a test script can answer.
pub trait Chooser {
    /// Pick one or more of `items`, returning zero-based indices
    fn choose(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;

    /// Ask for free text
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn choose(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        (**self).choose(prompt, items)
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        (**self).ask(prompt)
    }
}

/// Parse a selection such as `"1 3 5-7"` over `count` items
///
/// Numbers are 1-based. Ranges include their end: `2-4` picks items 2, 3 and 4, not the
/// end-exclusive 2 and 3 of a half-open range. Every index must name an existing item;
/// the result is zero-based, in input order.
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>> {
    let invalid = || SelectorError::InvalidSelection {
        input: input.trim().to_string(),
        count,
    };
    let number = |part: &str| part.trim().parse::<usize>().map_err(|_| invalid());

    let mut indices = Vec::new();
    for token in input.split_whitespace() {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (number(start)?, number(end)?),
            None => {
                let n = number(token)?;
                (n, n)
            }
        };
        if start == 0 || start > end || end > count {
            return Err(invalid());
        }
        indices.extend((start - 1)..end);
    }

    if indices.is_empty() {
        return Err(SelectorError::EmptySelection);
    }
    Ok(indices)
}

/// Chooser replaying canned answers, for tests and non-interactive runs
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    answers: VecDeque<String>,
    /// Items presented by each `choose` call, in order
    pub presented: Vec<Vec<String>>,
}

impl ScriptedChooser {
    /// Create a chooser answering with `answers` in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            presented: Vec::new(),
        }
    }

    /// Number of answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self) -> Result<String> {
        self.answers.pop_front().ok_or(SelectorError::EmptySelection)
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, _prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        self.presented.push(items.to_vec());
        let answer = self.next_answer()?;
        parse_selection(&answer, items.len())
    }

    fn ask(&mut self, _prompt: &str) -> Result<String> {
        self.next_answer()
    }
}

/// Line-oriented chooser over any reader and writer, usually stdin and stdout
///
/// Lists items numbered from 1 and re-prompts until the selection parses.
pub struct ConsoleChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SelectorError::EmptySelection);
        }
        Ok(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
    }
}

impl<R: BufRead, W: Write> Chooser for ConsoleChooser<R, W> {
    fn choose(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        for (index, item) in items.iter().enumerate() {
            writeln!(self.output, "{}.\t{}", index + 1, item)?;
        }
        loop {
            let line = self.read_line(prompt)?;
            match parse_selection(&line, items.len()) {
                Ok(indices) => return Ok(indices),
                Err(err) => writeln!(self.output, "{err}, please try again.")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("2", 3).unwrap(), vec![1]);
        assert_eq!(parse_selection(" 1 3 ", 3).unwrap(), vec![0, 2]);
        assert_eq!(parse_selection("2-4 1", 5).unwrap(), vec![1, 2, 3, 0]);
        assert!(parse_selection("3 - 3", 3).is_err());
        assert_eq!(parse_selection("3-3", 3).unwrap(), vec![2]);
    }

    #[test]
    fn test_parse_selection_range_includes_end() {
        assert_eq!(parse_selection("2-4", 4).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_selection("1-2", 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_parse_selection_strict_bounds() {
        // One past the end is rejected
        assert!(matches!(
            parse_selection("4", 3),
            Err(SelectorError::InvalidSelection { count: 3, .. })
        ));
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("2-4", 3).is_err());
        assert!(parse_selection("3-2", 3).is_err());
        assert!(parse_selection("x", 3).is_err());
        assert!(parse_selection("-1", 3).is_err());
        assert!(matches!(parse_selection("   ", 3), Err(SelectorError::EmptySelection)));
    }

    #[test]
    fn test_scripted_chooser() {
        let mut chooser = ScriptedChooser::new(["2", "hello"]);
        let items = vec!["a".to_string(), "b".to_string()];

        assert_eq!(chooser.choose("pick", &items).unwrap(), vec![1]);
        assert_eq!(chooser.ask("say").unwrap(), "hello");
        assert_eq!(chooser.presented, vec![items]);
        assert_eq!(chooser.remaining(), 0);
        assert!(matches!(chooser.ask("more"), Err(SelectorError::EmptySelection)));
    }

    #[test]
    fn test_console_chooser_retries() {
        let input = Cursor::new("9\n1-2\n");
        let mut output = Vec::new();
        let items = vec!["first".to_string(), "second".to_string()];

        let indices = {
            let mut chooser = ConsoleChooser::new(input, &mut output);
            chooser.choose("Please choose: ", &items).unwrap()
        };

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(indices, vec![0, 1]);
        assert!(printed.starts_with("1.\tfirst\n2.\tsecond\n"));
        assert!(printed.contains("please try again."));
    }

    #[test]
    fn test_console_chooser_eof() {
        let mut chooser = ConsoleChooser::new(Cursor::new(""), Vec::new());
        assert!(matches!(chooser.ask("Excerpt: "), Err(SelectorError::EmptySelection)));
    }
}
