use std::{
    fmt::{self, Display},
    ops::Deref,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{builder, error::MailtoError, text::is_valid_email_address};

/// A syntactically valid email address.
///
/// The original spelling is kept; addresses are neither lowercased nor
/// percent-encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Validates `address` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::InvalidAddress`] naming `address` if it is not a
    /// valid email address.
    pub fn parse(address: &str) -> Result<Self, MailtoError> {
        if is_valid_email_address(address) {
            Ok(Self(address.to_owned()))
        } else {
            builder!(level = WARN, "Rejected email address '{}'", address);
            Err(MailtoError::InvalidAddress(address.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = MailtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = MailtoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_email_address(&value) {
            Ok(Self(value))
        } else {
            Err(MailtoError::InvalidAddress(value))
        }
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Address {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A non-empty, ordered list of validated addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddressList(Vec<Address>);

impl AddressList {
    /// Validates `first` and then each of `additional`, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid address, naming only that address.
    pub fn parse<S: AsRef<str>>(first: &str, additional: &[S]) -> Result<Self, MailtoError> {
        let mut addresses = Vec::with_capacity(additional.len() + 1);
        addresses.push(Address::parse(first)?);
        for address in additional {
            addresses.push(Address::parse(address.as_ref())?);
        }
        Ok(Self(addresses))
    }

    /// The first address of the list; lists are never empty.
    pub fn primary(&self) -> &Address {
        &self.0[0]
    }
}

/// Comma-joined with no whitespace, as used in a mailto URI.
impl Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, addr) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            Display::fmt(addr, f)?;
        }
        Ok(())
    }
}

impl Deref for AddressList {
    type Target = [Address];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
