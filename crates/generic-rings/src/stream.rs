//! Text output sink for elements, matrices, and ring descriptions.

use core::fmt;

/// An append-only text buffer.
///
/// Writers take `&mut GrStream` and return a [`Status`](crate::Status), so a
/// ring can refuse to print an element it cannot represent without the
/// formatting machinery having to carry ring errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrStream {
    buf: String,
}

impl GrStream {
    /// Creates an empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `s`.
    #[inline]
    pub fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Appends a signed integer in decimal.
    pub fn write_si(&mut self, v: i64) {
        let _ = fmt::Write::write_fmt(self, format_args!("{v}"));
    }

    /// Appends an unsigned integer in decimal.
    pub fn write_ui(&mut self, v: u64) {
        let _ = fmt::Write::write_fmt(self, format_args!("{v}"));
    }

    /// Everything written so far.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the stream, returning its contents.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl fmt::Write for GrStream {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}
