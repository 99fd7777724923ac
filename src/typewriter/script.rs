use crate::foundation::error::{DoofioError, DoofioResult};

pub const LINE_SEPARATOR: char = '\n';

/// The fixed, ordered lines revealed by the typewriter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Script {
    lines: Vec<String>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            lines: vec![
                "Hello,".to_owned(),
                "Welcome to".to_owned(),
                "DOOFIO.SITE".to_owned(),
            ],
        }
    }
}

impl Script {
    pub fn new<I, S>(lines: I) -> DoofioResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script = Self {
            lines: lines.into_iter().map(Into::into).collect(),
        };
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> DoofioResult<()> {
        if self.lines.is_empty() {
            return Err(DoofioError::validation("script must have at least one line"));
        }
        if self.lines.iter().any(|l| l.contains(LINE_SEPARATOR)) {
            return Err(DoofioError::validation(
                "script lines must not contain line breaks",
            ));
        }
        Ok(())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Characters (not bytes) of line `i`.
    pub fn line_chars(&self, i: usize) -> usize {
        self.lines.get(i).map_or(0, |l| l.chars().count())
    }

    pub fn char_at(&self, line: usize, ch: usize) -> Option<char> {
        self.lines.get(line)?.chars().nth(ch)
    }

    /// All lines joined with [`LINE_SEPARATOR`]: the text once the reveal completes.
    pub fn full_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether `text` is something the typewriter can have revealed so far.
    pub fn is_revealed_prefix(&self, text: &str) -> bool {
        self.full_text().starts_with(text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typewriter/script.rs"]
mod tests;
