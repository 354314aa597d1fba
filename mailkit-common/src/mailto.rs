//! Builder for `mailto:` URIs.
//!
//! Addresses are validated when they are set, subject and body are
//! percent-encoded when they are set, and the URI itself is composed only
//! when [`MailTo::build`] is called:
//!
//! ```text
//! mailto:?to=a@b.com,c@d.com&cc=e@f.com&subject=Hi%20there&body=See%20below
//! ```
//!
//! Parameters always appear in the order `to`, `cc`, `subject`, `body`;
//! unset ones are left out.
//!
//! # Examples
//!
//! ```
//! use mailkit_common::mailto::MailTo;
//!
//! # fn main() -> Result<(), mailkit_common::error::MailtoError> {
//! let uri = MailTo::new("support@example.com", &["sales@example.com"])?
//!     .subject("Licence request")?
//!     .build()?;
//!
//! assert_eq!(
//!     uri.as_str(),
//!     "mailto:?to=support@example.com,sales@example.com&subject=Licence%20request"
//! );
//! # Ok(())
//! # }
//! ```

use std::fmt::{self, Display};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
    address::AddressList,
    builder,
    config::MailtoLimits,
    error::{Field, MailtoError},
};

pub type Result<T> = std::result::Result<T, MailtoError>;

/// Standard URL encoding: everything except `A-Z a-z 0-9 . - * _` is escaped.
/// Spaces come out as `%20`, never `+`.
const QUERY_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_');

/// A composed `mailto:` URI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MailtoUri(String);

impl MailtoUri {
    pub const SCHEME: &'static str = "mailto";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for MailtoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MailtoUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<MailtoUri> for String {
    fn from(value: MailtoUri) -> Self {
        value.0
    }
}

/// Builder for a `mailto:` URI.
///
/// Every setter validates its input first and only then replaces the stored
/// value, so a rejected call leaves the builder as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailTo {
    recipients: AddressList,
    carbon_copies: Option<AddressList>,
    subject: Option<String>,
    body: Option<String>,
    limits: MailtoLimits,
}

impl MailTo {
    /// Creates a builder for `main_address` and any `additional` recipients,
    /// using the default [`MailtoLimits`].
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::InvalidAddress`] naming the first address that
    /// is not a valid email address.
    pub fn new<S: AsRef<str>>(main_address: &str, additional: &[S]) -> Result<Self> {
        Self::with_limits(MailtoLimits::default(), main_address, additional)
    }

    /// Same as [`MailTo::new`], with custom length limits.
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::InvalidAddress`] naming the first address that
    /// is not a valid email address.
    pub fn with_limits<S: AsRef<str>>(
        limits: MailtoLimits,
        main_address: &str,
        additional: &[S],
    ) -> Result<Self> {
        let recipients = AddressList::parse(main_address, additional)?;
        builder!(level = DEBUG, "Recipients set to {}", recipients);

        Ok(Self {
            recipients,
            carbon_copies: None,
            subject: None,
            body: None,
            limits,
        })
    }

    /// Sets the carbon-copy list, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::InvalidAddress`] naming the first invalid
    /// address; the previous cc list is kept.
    pub fn cc<S: AsRef<str>>(&mut self, first_address: &str, additional: &[S]) -> Result<&mut Self> {
        let carbon_copies = AddressList::parse(first_address, additional)?;
        builder!(level = DEBUG, "Carbon copies set to {}", carbon_copies);
        self.carbon_copies = Some(carbon_copies);
        Ok(self)
    }

    /// Sets the subject. The text is encoded right away.
    ///
    /// The limit counts Unicode scalar values (`char`s), not bytes or UTF-16
    /// code units.
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::FieldTooLong`] if `subject` has more characters
    /// than the subject limit; the previous subject is kept.
    pub fn subject(&mut self, subject: &str) -> Result<&mut Self> {
        check_length(Field::Subject, subject, self.limits.subject)?;
        self.subject = Some(encode_text(subject));
        Ok(self)
    }

    /// Sets the body. The text is encoded right away.
    ///
    /// The limit counts Unicode scalar values (`char`s), not bytes or UTF-16
    /// code units.
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::FieldTooLong`] if `body` has more characters
    /// than the body limit; the previous body is kept.
    pub fn body(&mut self, body: &str) -> Result<&mut Self> {
        check_length(Field::Body, body, self.limits.body)?;
        self.body = Some(encode_text(body));
        Ok(self)
    }

    /// Composes the URI.
    ///
    /// Nothing is cached: each call composes from the current fields and
    /// checks the total length again.
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::UriTooLong`] if the composed URI is longer than
    /// the URI limit, even when every field passed its own limit.
    pub fn build(&self) -> Result<MailtoUri> {
        let mut uri = format!("{}:?to={}", MailtoUri::SCHEME, self.recipients);
        if let Some(carbon_copies) = &self.carbon_copies {
            uri.push_str("&cc=");
            uri.push_str(&carbon_copies.to_string());
        }
        if let Some(subject) = &self.subject {
            uri.push_str("&subject=");
            uri.push_str(subject);
        }
        if let Some(body) = &self.body {
            uri.push_str("&body=");
            uri.push_str(body);
        }

        // Only ASCII remains after encoding, so bytes == characters.
        if uri.len() > self.limits.uri {
            builder!(
                level = WARN,
                "Composed mailto URI is {} characters, limit is {}",
                uri.len(),
                self.limits.uri
            );
            return Err(MailtoError::UriTooLong {
                limit: self.limits.uri,
                length: uri.len(),
            });
        }

        Ok(MailtoUri(uri))
    }

    pub fn recipients(&self) -> &AddressList {
        &self.recipients
    }

    pub const fn carbon_copies(&self) -> Option<&AddressList> {
        self.carbon_copies.as_ref()
    }

    /// The encoded subject, if one was set.
    pub fn encoded_subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The encoded body, if one was set.
    pub fn encoded_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub const fn limits(&self) -> &MailtoLimits {
        &self.limits
    }
}

fn check_length(field: Field, text: &str, limit: usize) -> Result<()> {
    let length = text.chars().count();
    if length > limit {
        builder!(
            level = WARN,
            "Rejected {} of {} characters, limit is {}",
            field,
            length,
            limit
        );
        return Err(MailtoError::FieldTooLong {
            field,
            limit,
            length,
        });
    }
    Ok(())
}

fn encode_text(text: &str) -> String {
    utf8_percent_encode(text, QUERY_TEXT).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::{MAX_BODY_LENGTH, MAX_SUBJECT_LENGTH};

    const NONE: &[&str] = &[];

    fn long_text(length: usize) -> String {
        "a".repeat(length)
    }

    #[test]
    fn single_recipient() {
        let uri = MailTo::new("test@email.com", NONE).unwrap().build().unwrap();
        assert_eq!(uri.as_str(), "mailto:?to=test@email.com");
        assert!(uri.as_str().starts_with(MailtoUri::SCHEME));
    }

    #[test]
    fn multiple_recipients_keep_order() {
        let uri = MailTo::new("test@email.com", &["another@yahoo.com"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            uri.as_str(),
            "mailto:?to=test@email.com,another@yahoo.com"
        );
    }

    #[test]
    fn invalid_recipients() {
        assert_eq!(
            MailTo::new("illegal@@email.com", NONE).unwrap_err(),
            MailtoError::InvalidAddress("illegal@@email.com".to_string())
        );
        assert_eq!(
            MailTo::new("test@email.com", &["illegal@@email.com"]).unwrap_err(),
            MailtoError::InvalidAddress("illegal@@email.com".to_string())
        );
    }

    #[test]
    fn cc() {
        let uri = MailTo::new("tEst@mail.org", NONE)
            .unwrap()
            .cc("copyTo@other.one", NONE)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(uri.as_str(), "mailto:?to=tEst@mail.org&cc=copyTo@other.one");
    }

    #[test]
    fn cc_replaces_previous_list() {
        let mut mail_to = MailTo::new("valid@email.com", NONE).unwrap();
        mail_to.cc("first@copy.org", &["second@copy.org"]).unwrap();
        mail_to.cc("third@copy.org", NONE).unwrap();
        assert_eq!(
            mail_to.build().unwrap().as_str(),
            "mailto:?to=valid@email.com&cc=third@copy.org"
        );
    }

    #[test]
    fn invalid_cc_keeps_previous_list() {
        let mut mail_to = MailTo::new("valid@email.com", NONE).unwrap();
        mail_to.cc("kept@copy.org", NONE).unwrap();

        assert_eq!(
            mail_to.cc("illegal@@email.com", NONE).unwrap_err(),
            MailtoError::InvalidAddress("illegal@@email.com".to_string())
        );
        assert_eq!(
            mail_to
                .cc("another@mail.org", &["illegal@@email.com"])
                .unwrap_err(),
            MailtoError::InvalidAddress("illegal@@email.com".to_string())
        );
        assert_eq!(mail_to.carbon_copies().unwrap().to_string(), "kept@copy.org");
    }

    #[test]
    fn subject_spaces_are_percent_encoded() {
        let uri = MailTo::new("test@mail.org", NONE)
            .unwrap()
            .subject("Test subject")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(uri.as_str(), "mailto:?to=test@mail.org&subject=Test%20subject");
    }

    #[test]
    fn reserved_and_non_ascii_text_is_encoded() {
        let mut mail_to = MailTo::new("test@mail.org", NONE).unwrap();
        mail_to.subject("1+1=2 & more?").unwrap();
        mail_to.body("Grüße\nfile_name-v1.*").unwrap();
        assert_eq!(mail_to.encoded_subject(), Some("1%2B1%3D2%20%26%20more%3F"));
        assert_eq!(
            mail_to.encoded_body(),
            Some("Gr%C3%BC%C3%9Fe%0Afile_name-v1.*")
        );
    }

    #[test]
    fn subject_limit() {
        let mut mail_to = MailTo::new("test@mail.org", NONE).unwrap();
        assert!(mail_to.subject(&long_text(MAX_SUBJECT_LENGTH)).is_ok());
        assert_eq!(
            mail_to.subject(&long_text(MAX_SUBJECT_LENGTH + 1)).unwrap_err(),
            MailtoError::FieldTooLong {
                field: Field::Subject,
                limit: MAX_SUBJECT_LENGTH,
                length: MAX_SUBJECT_LENGTH + 1,
            }
        );
        assert_eq!(
            mail_to.encoded_subject(),
            Some(long_text(MAX_SUBJECT_LENGTH).as_str())
        );
    }

    #[test]
    fn subject_limit_counts_characters() {
        let mut mail_to = MailTo::new("test@mail.org", NONE).unwrap();
        assert!(mail_to.subject(&"ä".repeat(MAX_SUBJECT_LENGTH)).is_ok());
    }

    #[test]
    fn body() {
        let uri = MailTo::new("test@mail.org", NONE)
            .unwrap()
            .body("Test body")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(uri.as_str(), "mailto:?to=test@mail.org&body=Test%20body");
    }

    #[test]
    fn body_limit() {
        let mut mail_to = MailTo::new("test@mail.org", NONE).unwrap();
        mail_to.body("kept").unwrap();
        assert_eq!(
            mail_to.body(&long_text(MAX_BODY_LENGTH + 1)).unwrap_err(),
            MailtoError::FieldTooLong {
                field: Field::Body,
                limit: MAX_BODY_LENGTH,
                length: MAX_BODY_LENGTH + 1,
            }
        );
        assert_eq!(mail_to.encoded_body(), Some("kept"));
        assert!(mail_to.body(&long_text(MAX_BODY_LENGTH)).is_ok());
    }

    #[test]
    fn fields_are_ordered_regardless_of_call_order() {
        let uri = MailTo::new("test@mail.org", &["one@mail.de", "two@mail.com"])
            .unwrap()
            .body("Test body")
            .unwrap()
            .subject("Test subject")
            .unwrap()
            .cc("copy@mail.org", NONE)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            uri.as_str(),
            "mailto:?to=test@mail.org,one@mail.de,two@mail.com&cc=copy@mail.org&subject=Test%20subject&body=Test%20body"
        );
    }

    #[test]
    fn combination_can_exceed_uri_limit() {
        let mut mail_to = MailTo::new(
            "test@mail.org",
            &["onelongAddress@mail.de", "two@mailprovider.com"],
        )
        .unwrap();
        mail_to
            .cc("copy@mail.org", &["abcdefg@yourmailhost.org"])
            .unwrap()
            .subject(&long_text(MAX_SUBJECT_LENGTH))
            .unwrap()
            .body(&long_text(MAX_BODY_LENGTH))
            .unwrap();

        let err = mail_to.build().unwrap_err();
        assert!(matches!(
            err,
            MailtoError::UriTooLong { limit: 2040, length } if length > 2040
        ));
    }

    #[test]
    fn uri_limit_is_inclusive() {
        let prefix = "mailto:?to=test@mail.org&body=";
        let limits = MailtoLimits {
            uri: prefix.len() + 10,
            ..MailtoLimits::default()
        };
        let mut mail_to = MailTo::with_limits(limits, "test@mail.org", NONE).unwrap();

        mail_to.body(&long_text(10)).unwrap();
        assert_eq!(mail_to.build().unwrap().as_str().len(), limits.uri);

        mail_to.body(&long_text(11)).unwrap();
        assert!(matches!(
            mail_to.build(),
            Err(MailtoError::UriTooLong { .. })
        ));
    }

    #[test]
    fn percent_in_address_never_reaches_uri() {
        assert_eq!(
            MailTo::new("a%zz@b.com", NONE).unwrap_err(),
            MailtoError::InvalidAddress("a%zz@b.com".to_string())
        );

        let mut mail_to = MailTo::new("test@mail.org", NONE).unwrap();
        assert!(mail_to.cc("x%2@b.com", NONE).is_err());
        mail_to.subject("100% sure").unwrap();

        let uri = mail_to.build().unwrap();
        let bytes = uri.as_str().as_bytes();
        for (i, _) in uri.as_str().match_indices('%') {
            assert!(
                bytes.len() > i + 2
                    && bytes[i + 1].is_ascii_hexdigit()
                    && bytes[i + 2].is_ascii_hexdigit(),
                "malformed escape at {i} in {uri}"
            );
        }
        assert_eq!(uri.as_str(), "mailto:?to=test@mail.org&subject=100%25%20sure");
    }

    #[test]
    fn build_is_repeatable() {
        let mut mail_to = MailTo::new("test@mail.org", NONE).unwrap();
        mail_to.subject("Same").unwrap();
        assert_eq!(mail_to.build().unwrap(), mail_to.build().unwrap());

        mail_to.subject("Changed").unwrap();
        assert_eq!(
            mail_to.build().unwrap().as_str(),
            "mailto:?to=test@mail.org&subject=Changed"
        );
    }

    #[test]
    fn custom_subject_limit() {
        let limits = MailtoLimits {
            subject: 4,
            ..MailtoLimits::default()
        };
        let mut mail_to = MailTo::with_limits(limits, "test@mail.org", NONE).unwrap();
        assert!(mail_to.subject("four").is_ok());
        assert!(mail_to.subject("fives").is_err());
    }
}
