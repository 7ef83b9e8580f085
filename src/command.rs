use std::io::{self, Write};

use crate::args::Args;

/// What one input line asks the interpreter to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run,
    Background,
    Murder,
    Help,
    Quit,
    Script,
    /// Unrecognized word, or `None` for a line without tokens.
    Invalid(Option<String>),
}

impl Command {
    pub fn from_word(word: Option<&str>) -> Command {
        match word {
            Some("run") => Command::Run,
            Some("background") => Command::Background,
            Some("murder") => Command::Murder,
            Some("help") => Command::Help,
            Some("quit") => Command::Quit,
            Some("script") => Command::Script,
            Some(other) => Command::Invalid(Some(other.to_owned())),
            None => Command::Invalid(None),
        }
    }
}

/// Resolves the command word of `args`. A non-empty unknown word gets a
/// one-line diagnostic on `out`; an empty line is silent.
pub fn classify<W: Write>(args: &Args, out: &mut W) -> io::Result<Command> {
    let cmd = Command::from_word(args.first());
    if let Command::Invalid(Some(_)) = cmd {
        writeln!(out, "Invalid input use help for commands")?;
    }
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::tokenize;

    fn classify_line(line: &str) -> (Command, String) {
        let mut out = Vec::new();
        let cmd = classify(&tokenize(line), &mut out).unwrap();
        (cmd, String::from_utf8(out).unwrap())
    }

    #[test]
    fn known_words() {
        let cases = [
            ("run /bin/ls", Command::Run),
            ("background /bin/sleep 1", Command::Background),
            ("murder 12", Command::Murder),
            ("help", Command::Help),
            ("quit", Command::Quit),
            ("script", Command::Script),
        ];
        for (line, expected) in cases.iter() {
            let (cmd, out) = classify_line(line);
            assert_eq!(&cmd, expected, "line {:?}", line);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn match_is_case_sensitive() {
        let (cmd, out) = classify_line("Run /bin/ls");
        assert_eq!(cmd, Command::Invalid(Some("Run".to_owned())));
        assert_eq!(out, "Invalid input use help for commands\n");

        let (cmd, _) = classify_line("QUIT");
        assert_eq!(cmd, Command::Invalid(Some("QUIT".to_owned())));
    }

    #[test]
    fn empty_line_is_silent() {
        let (cmd, out) = classify_line("   \n");
        assert_eq!(cmd, Command::Invalid(None));
        assert!(out.is_empty());
    }

    #[test]
    fn only_first_word_counts() {
        let (cmd, _) = classify_line("echo run quit");
        assert_eq!(cmd, Command::Invalid(Some("echo".to_owned())));
    }
}
