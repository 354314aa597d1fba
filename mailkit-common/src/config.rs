//! Length budgets for mailto URIs.
//!
//! Mail clients and operating systems truncate or refuse overly long
//! `mailto:` links, so the builder enforces three limits:
//!
//! - **subject**: characters of subject text, checked before encoding
//! - **body**: characters of body text, checked before encoding
//! - **uri**: characters of the fully composed URI
//!
//! All three can be overridden from configuration; omitted fields keep their
//! defaults.

use serde::{Deserialize, Serialize};

/// Default maximum subject length, in characters before encoding.
pub const MAX_SUBJECT_LENGTH: usize = 150;

/// Default maximum body length, in characters before encoding.
pub const MAX_BODY_LENGTH: usize = 1800;

/// Default maximum length of the composed URI.
pub const MAX_MAILTO_LENGTH: usize = 2040;

/// Length limits applied by [`crate::mailto::MailTo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailtoLimits {
    /// Maximum subject length before encoding.
    ///
    /// Default: 150 characters
    #[serde(default = "defaults::subject")]
    pub subject: usize,

    /// Maximum body length before encoding.
    ///
    /// Default: 1800 characters
    #[serde(default = "defaults::body")]
    pub body: usize,

    /// Maximum length of the composed URI.
    ///
    /// Default: 2040 characters
    #[serde(default = "defaults::uri")]
    pub uri: usize,
}

impl Default for MailtoLimits {
    fn default() -> Self {
        Self {
            subject: defaults::subject(),
            body: defaults::body(),
            uri: defaults::uri(),
        }
    }
}

mod defaults {
    pub(super) const fn subject() -> usize {
        super::MAX_SUBJECT_LENGTH
    }

    pub(super) const fn body() -> usize {
        super::MAX_BODY_LENGTH
    }

    pub(super) const fn uri() -> usize {
        super::MAX_MAILTO_LENGTH
    }
}
