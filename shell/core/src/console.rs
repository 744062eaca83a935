//! Line Console
//!
//! Line-oriented console over any async reader/writer pair. The same type
//! serves the local terminal (stdin/stdout) and TCP connections, so the
//! session loop never knows which transport it is talking to.
//!
//! Line editing and history are out of scope; the console only writes the
//! prompt, reads newline-terminated lines, and writes text back.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Completion candidates over the full set of known command tokens
#[derive(Clone, Debug, Default)]
pub struct CommandCompleter {
    tokens: Vec<String>,
}

impl CommandCompleter {
    /// Create a completer from the registry's token set
    #[must_use]
    pub fn new(mut tokens: Vec<String>) -> Self {
        tokens.sort();
        tokens.dedup();
        Self { tokens }
    }

    /// All known tokens, sorted
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens starting with `prefix`
    #[must_use]
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| t.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Longest common prefix of all candidates for `prefix`
    ///
    /// Returns `None` when nothing matches.
    #[must_use]
    pub fn longest_match(&self, prefix: &str) -> Option<String> {
        let candidates = self.complete(prefix);
        let (first, rest) = candidates.split_first()?;
        let mut common: &str = first;
        for candidate in rest {
            let shared = common
                .char_indices()
                .zip(candidate.chars())
                .find(|((_, a), b)| a != b)
                .map_or(common.len().min(candidate.len()), |((i, _), _)| i);
            common = &common[..shared];
        }
        Some(common.to_string())
    }
}

/// Console bound to one input/output pair
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
    prompt: String,
    completer: CommandCompleter,
}

impl<R, W> LineConsole<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a console writing `prompt` before each read
    pub fn new(reader: R, writer: W, prompt: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            prompt: prompt.into(),
            completer: CommandCompleter::default(),
        }
    }

    /// Install the completion token set
    pub fn set_completer(&mut self, completer: CommandCompleter) {
        self.completer = completer;
    }

    /// The installed completer
    pub fn completer(&self) -> &CommandCompleter {
        &self.completer
    }

    /// The prompt written before each read
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Write the prompt and read one line
    ///
    /// Returns `Ok(None)` at end-of-stream. The trailing `\n` / `\r\n` is
    /// stripped. Invalid UTF-8 is decoded lossily.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        if !self.prompt.is_empty() {
            self.writer.write_all(self.prompt.as_bytes()).await?;
            self.writer.flush().await?;
        }

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Write an informational line
    pub async fn write_info(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text).await
    }

    /// Write an error line
    pub async fn write_error(&mut self, text: &str) -> io::Result<()> {
        self.write_line(&format!("[ERROR] {text}")).await
    }

    async fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Consume the console, returning the underlying reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_read_line_strips_terminators() {
        let input: &[u8] = b"first\r\nsecond\nlast";
        let mut console = LineConsole::new(input, Vec::new(), "> ");

        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("last"));
        assert_eq!(console.read_line().await.unwrap(), None);

        let (_, written) = console.into_inner();
        assert_eq!(String::from_utf8(written).unwrap(), "> > > > ");
    }

    #[tokio::test]
    async fn test_read_line_decodes_invalid_utf8_lossily() {
        let input: &[u8] = b"\xff\xfe\r\nok\n";
        let mut console = LineConsole::new(input, Vec::new(), "");

        assert_eq!(
            console.read_line().await.unwrap().as_deref(),
            Some("\u{FFFD}\u{FFFD}")
        );
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_empty_prompt_writes_nothing() {
        let input: &[u8] = b"x\n";
        let mut console = LineConsole::new(input, Vec::new(), "");
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("x"));
        let (_, written) = console.into_inner();
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_write_info_and_error() {
        let input: &[u8] = b"";
        let mut console = LineConsole::new(input, Vec::new(), "> ");
        console.write_info("Waiting for commands").await.unwrap();
        console.write_error("boom").await.unwrap();

        let (_, written) = console.into_inner();
        assert_eq!(
            String::from_utf8(written).unwrap(),
            "Waiting for commands\n[ERROR] boom\n"
        );
    }

    #[test]
    fn test_completer_candidates() {
        let completer = CommandCompleter::new(vec![
            "help".to_string(),
            "exit".to_string(),
            "compile".to_string(),
            "clean".to_string(),
            "help".to_string(),
        ]);

        assert_eq!(completer.tokens().len(), 4);
        assert_eq!(completer.complete("c"), vec!["clean", "compile"]);
        assert_eq!(completer.complete("he"), vec!["help"]);
        assert!(completer.complete("z").is_empty());
    }

    #[test]
    fn test_completer_longest_match() {
        let completer = CommandCompleter::new(vec![
            "install".to_string(),
            "integration-test".to_string(),
            "exit".to_string(),
        ]);

        assert_eq!(completer.longest_match("i").as_deref(), Some("in"));
        assert_eq!(completer.longest_match("ins").as_deref(), Some("install"));
        assert_eq!(completer.longest_match("q"), None);
    }
}
