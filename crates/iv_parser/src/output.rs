use std::io::{self, Write};

enum Sink {
    Stdout,
    Stderr,
    Capture(String),
    Writer(Box<dyn Write>),
}

/// Destination for values, directive responses and error reports.
pub struct Output {
    sink: Sink,
}

impl Output {
    pub fn stdout() -> Self {
        Self { sink: Sink::Stdout }
    }

    pub fn stderr() -> Self {
        Self { sink: Sink::Stderr }
    }

    /// Collect everything in memory; read it back with [`Output::take`].
    pub fn capture() -> Self {
        Self {
            sink: Sink::Capture(String::new()),
        }
    }

    pub fn writer(w: Box<dyn Write>) -> Self {
        Self {
            sink: Sink::Writer(w),
        }
    }

    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        match &mut self.sink {
            Sink::Stdout => io::stdout().lock().write_all(s.as_bytes()),
            Sink::Stderr => io::stderr().lock().write_all(s.as_bytes()),
            Sink::Capture(buf) => {
                buf.push_str(s);
                Ok(())
            }
            Sink::Writer(w) => w.write_all(s.as_bytes()),
        }
    }

    /// Write `s` followed by a newline.
    pub fn line(&mut self, s: &str) -> io::Result<()> {
        let mut text = String::with_capacity(s.len() + 1);
        text.push_str(s);
        text.push('\n');
        self.write_str(&text)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::Capture(_) => Ok(()),
            Sink::Writer(w) => w.flush(),
        }
    }

    /// Captured text so far, leaving the buffer empty. Always empty for
    /// non-capturing sinks.
    pub fn take(&mut self) -> String {
        match &mut self.sink {
            Sink::Capture(buf) => std::mem::take(buf),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_collects_lines() {
        let mut out = Output::capture();
        out.line("1").unwrap();
        out.write_str("2").unwrap();
        assert_eq!(out.take(), "1\n2");
        assert_eq!(out.take(), "");
    }

    #[test]
    fn writer_errors_surface() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut out = Output::writer(Box::new(Broken));
        let err = out.line("x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
