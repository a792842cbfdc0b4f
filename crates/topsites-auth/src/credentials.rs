//! Caller-owned credentials.
//!
//! The signer only borrows key material for the duration of a signing call.
//! The secret lives in a buffer the caller owns; clearing it afterwards is the
//! caller's job (see [`zeroize`]).

use std::fmt;

/// An access key / secret key pair borrowed from the caller.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    access_key: &'a str,
    secret_key: &'a [u8],
}

impl<'a> Credentials<'a> {
    /// Borrow an access key and the raw bytes of a secret key.
    #[must_use]
    pub fn new(access_key: &'a str, secret_key: &'a [u8]) -> Self {
        Self {
            access_key,
            secret_key,
        }
    }

    /// The access key sent in the query string.
    #[must_use]
    pub fn access_key(&self) -> &'a str {
        self.access_key
    }

    pub(crate) fn secret_key(&self) -> &'a [u8] {
        self.secret_key
    }
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Overwrite a secret buffer with zeroes.
pub fn zeroize(buf: &mut [u8]) {
    buf.fill(0);
    let _ = std::hint::black_box(buf);
}
