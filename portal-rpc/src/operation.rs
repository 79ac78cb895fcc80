use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

/// The name of a backend procedure, e.g. `exams.list`.
///
/// The client never looks inside a name beyond checking that it is not
/// blank; routing is entirely up to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationName(String);

impl OperationName {
    pub fn new<S: Into<String>>(name: S) -> Result<OperationName> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidOperation(name));
        }
        Ok(OperationName(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OperationName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OperationName::new(s)
    }
}

impl TryFrom<&str> for OperationName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        OperationName::new(value)
    }
}

impl TryFrom<String> for OperationName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        OperationName::new(value)
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for OperationName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

/// A backend operation with known payload types.
///
/// Implementations are usually generated with [`portal_ops!`][crate::portal_ops].
pub trait Operation: 'static {
    const NAME: &'static str;

    type Body: Serialize + Send + Sync;
    type Data: DeserializeOwned + Send;

    fn name() -> Result<OperationName> {
        OperationName::new(Self::NAME)
    }
}
