//! The console seams a session talks through.
//!
//! Implemented by [`crate::console`] for real readers and writers, and by
//! [`crate::mock`] for scripted tests.

use std::io;

/// A source of user input, one line per call.
pub trait LineSource {
    /// Read the next line without its terminator. `Ok(None)` means the
    /// input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// A sink for user-facing messages, one line per call.
pub trait OutputSink {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}
