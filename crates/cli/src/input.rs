use std::path::Path;

use {
    anyhow::Context,
    herald_pipeline::Message,
    tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines},
    tracing::warn,
};

type Source = Box<dyn AsyncRead + Unpin + Send>;

/// Reads newline-delimited JSON messages.
pub struct MessageReader {
    lines: Lines<BufReader<Source>>,
    line_no: u64,
    skipped: u64,
}

impl MessageReader {
    /// Read from `path`, or stdin when `None`.
    pub async fn open(path: Option<&Path>) -> anyhow::Result<Self> {
        let source: Source = match path {
            Some(path) => Box::new(
                tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("failed to open input {}", path.display()))?,
            ),
            None => Box::new(tokio::io::stdin()),
        };
        Ok(Self::from_reader(source))
    }

    pub fn from_reader(reader: impl AsyncRead + Unpin + Send + 'static) -> Self {
        let source: Source = Box::new(reader);
        Self {
            lines: BufReader::new(source).lines(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Next well-formed message, or `None` at end of input. Blank lines are
    /// ignored and malformed lines are logged and skipped.
    pub async fn next_message(&mut self) -> anyhow::Result<Option<Message>> {
        while let Some(line) = self.lines.next_line().await.context("failed to read input")? {
            self.line_no += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Message>(line) {
                Ok(message) => return Ok(Some(message)),
                Err(e) => {
                    self.skipped += 1;
                    warn!(line = self.line_no, error = %e, "skipping malformed message");
                },
            }
        }
        Ok(None)
    }

    /// Lines that could not be parsed.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_lines_and_skips_garbage() {
        let input: &'static [u8] = b"{\"payload\": \"one\", \"severity\": 2}\n\
            \n\
            not json\n\
            {\"payload\": \"two\"}\n";
        let mut reader = MessageReader::from_reader(input);

        let first = reader.next_message().await.unwrap().unwrap();
        assert_eq!(first.payload, "one");
        assert_eq!(first.severity, 2);

        let second = reader.next_message().await.unwrap().unwrap();
        assert_eq!(second.payload, "two");
        assert_eq!(second.severity, 7);

        assert!(reader.next_message().await.unwrap().is_none());
        assert_eq!(reader.skipped(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = MessageReader::open(Some(Path::new("/nonexistent/input.jsonl")))
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/input.jsonl"));
    }
}
