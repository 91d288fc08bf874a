//! Text display surface for streamed firmware output

/// Scrollable text surface that firmware output is streamed into
///
/// The bridge opens the surface, appends bytes as they arrive and polls
/// [`ResponseSurface::is_open`] to learn whether the user dismissed it.
pub trait ResponseSurface {
    /// Reset content and show the surface in streaming mode
    fn open(&mut self, header: &str);

    /// Append received bytes verbatim
    fn append(&mut self, bytes: &[u8]);

    /// Whether the surface is still shown
    ///
    /// Returns `false` once the user pressed back or otherwise dismissed it.
    fn is_open(&mut self) -> bool;
}

impl<S: ResponseSurface + ?Sized> ResponseSurface for &mut S {
    fn open(&mut self, header: &str) {
        (**self).open(header)
    }

    fn append(&mut self, bytes: &[u8]) {
        (**self).append(bytes)
    }

    fn is_open(&mut self) -> bool {
        (**self).is_open()
    }
}
