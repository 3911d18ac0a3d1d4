//! Reader- and writer-backed console adapters.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crate::traits::{LineSource, OutputSink};

/// Reads lines from any buffered reader, stripping `\n` / `\r\n`.
/// Bytes that are not valid UTF-8 are replaced with U+FFFD.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Writes each message followed by a newline and flushes immediately, so
/// prompts appear before the next blocking read.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

/// Console adapters bound to the process's stdin and stdout.
pub fn stdio() -> (ReaderSource<StdinLock<'static>>, WriterSink<Stdout>) {
    (
        ReaderSource::new(io::stdin().lock()),
        WriterSink::new(io::stdout()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_strips_terminators() {
        let mut source = ReaderSource::new("add\r\napple\nlast".as_bytes());
        assert_eq!(source.read_line().unwrap().as_deref(), Some("add"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("apple"));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn reader_keeps_blank_lines() {
        let mut source = ReaderSource::new("\n\n".as_bytes());
        assert_eq!(source.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(source.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn reader_replaces_invalid_utf8() {
        let mut source = ReaderSource::new(&b"\xff\xfe\nexit\n"[..]);
        assert_eq!(
            source.read_line().unwrap().as_deref(),
            Some("\u{fffd}\u{fffd}")
        );
        assert_eq!(source.read_line().unwrap().as_deref(), Some("exit"));
    }

    #[test]
    fn writer_appends_newlines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("Correct!").unwrap();
        sink.write_line("Bye bye!").unwrap();
        assert_eq!(sink.into_inner(), b"Correct!\nBye bye!\n");
    }
}
