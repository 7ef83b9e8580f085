use std::io::{self, BufRead};

const DELIMITERS: &[char] = &[' ', '\t', '\n'];

/// Tokens of one input line. Reading past the last token yields `None`,
/// which is the end-of-arguments marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<String>);

impl Args {
    pub fn get(&self, i: usize) -> Option<&str> {
        self.0.get(i).map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    /// Operands after the command word.
    pub fn operands(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

pub fn tokenize(line: &str) -> Args {
    Args(
        line.split(DELIMITERS)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_owned())
            .collect(),
    )
}

/// Reads one line into `line`, newline included. Bytes that are not UTF-8
/// become U+FFFD instead of failing the read. Returns 0 at end of input.
pub fn read_line<R: BufRead>(input: &mut R, line: &mut String) -> io::Result<usize> {
    let mut raw = Vec::new();
    let n = input.read_until(b'\n', &mut raw)?;
    line.push_str(&String::from_utf8_lossy(&raw));
    Ok(n)
}
