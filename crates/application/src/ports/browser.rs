//! Browser launcher port

/// Opens a URL in the user's browser.
pub trait BrowserLauncher: Send + Sync {
    /// Tries to open `url`. Failure is reported, never fatal to a login.
    ///
    /// # Errors
    /// Returns the OS error if no browser could be launched.
    fn open(&self, url: &str) -> std::io::Result<()>;
}
