use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace of the cast vote record schema (`CVR.GpUnit`).
pub const CVR_NAMESPACE: &str = "CVR";

/// Namespace of the election results schema (`ElectionResults.GpUnit`).
pub const EDF_NAMESPACE: &str = "ElectionResults";

/// Separator between a namespace and a bare type name.
pub const SEPARATOR: char = '.';

/// Prefix that scopes declared type names to one schema family.
///
/// An empty namespace is valid and means type names carry no prefix; in
/// that case [`Namespace::qualify`] and [`Namespace::strip`] leave names
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Qualify a type name with this namespace.
    ///
    /// Names that already contain a separator are taken as qualified and
    /// returned as-is.
    ///
    /// ```
    /// use edm_types::Namespace;
    ///
    /// let ns = Namespace::new("CVR");
    /// assert_eq!(ns.qualify("GpUnit"), "CVR.GpUnit");
    /// assert_eq!(ns.qualify("CVR.GpUnit"), "CVR.GpUnit");
    /// ```
    pub fn qualify<'n>(&self, name: &'n str) -> Cow<'n, str> {
        if self.is_empty() || name.contains(SEPARATOR) {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(format!("{}{SEPARATOR}{name}", self.0))
        }
    }

    /// Remove this namespace's `"<ns>."` prefix from a type name.
    ///
    /// Names without the prefix are returned unchanged.
    pub fn strip<'n>(&self, name: &'n str) -> &'n str {
        if self.is_empty() {
            return name;
        }
        name.strip_prefix(self.0.as_str())
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .unwrap_or(name)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Self(name)
    }
}
