//! Token-presence access checks for protected pages.

use std::io;

use crate::Client;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of a page guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAccess {
    Granted,
    /// No token is stored; the caller should navigate here.
    RedirectTo(&'static str),
}

impl Client {
    /// Presence check only. A stale or revoked token still grants access
    /// here; the server's 401 on the next request is what reports that.
    pub fn guard_page(&self) -> io::Result<PageAccess> {
        let access = if self.tokens().get()?.is_empty() {
            PageAccess::RedirectTo(LOGIN_PATH)
        } else {
            PageAccess::Granted
        };
        Ok(access)
    }
}
