use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

/// A destination for formatted log lines.
///
/// Sinks are shared between threads and written through `&self`, so
/// implementations serialize access internally. `flush` is optional; the
/// default does nothing.
pub trait LogSink: Send + Sync {
    /// Writes `buf`, returning how many bytes were accepted.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    /// Called after every successful write.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    #[inline]
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }

    #[inline]
    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Process standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write_all(buf).map(|()| buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Process standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write_all(buf).map(|()| buf.len())
    }
}

/// Adapts any [`Write`] (files, sockets, buffers) into a sink.
///
/// Each line is written with `write_all` while holding the inner mutex, so
/// lines from different threads never interleave inside one sink.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.write_all(buf).map(|()| buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}
