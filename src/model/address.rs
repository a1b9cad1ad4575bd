//! Email address value type (RFC 5322 §3.4).

use crate::error::{MailError, Result};
use crate::util::addr::is_valid_address_part;

/// An immutable, structurally-equal email address.
///
/// `local` and `domain` are always non-empty and satisfy
/// [`is_valid_address_part`]; `display_name` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    display_name: String,
    local: String,
    domain: String,
}

impl Address {
    /// Build an address from its three parts, validating `local`/`domain`.
    pub fn new(
        display_name: impl Into<String>,
        local: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self> {
        let local = local.into();
        let domain = domain.into();
        if !is_valid_address_part(&local) {
            return Err(MailError::MalformedAddress {
                raw: format!("{local}@{domain}"),
                reason: "invalid local part".to_string(),
            });
        }
        if !is_valid_address_part(&domain) {
            return Err(MailError::MalformedAddress {
                raw: format!("{local}@{domain}"),
                reason: "invalid domain part".to_string(),
            });
        }
        Ok(Self {
            display_name: display_name.into(),
            local,
            domain,
        })
    }

    /// Build an address from a raw `(display_name, local, domain)` tuple as
    /// produced by [`crate::util::addr::decode`], failing on missing parts.
    pub fn from_tuple(raw: &str, tuple: (String, String, String)) -> Result<Self> {
        let (display_name, local, domain) = tuple;
        if local.is_empty() || domain.is_empty() || local.contains('\0') || domain.contains('\0')
        {
            return Err(MailError::MalformedAddress {
                raw: raw.to_string(),
                reason: "missing local or domain part".to_string(),
            });
        }
        Self::new(display_name, local, domain)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The bare `local@domain` form, with no display name.
    pub fn email(&self) -> String {
        format!("{}@{}", self.local, self.domain)
    }

    /// Canonical text form (spec §3, §8 property 8):
    /// - no display name → `local@domain`
    /// - display name of 1 or 2 space-separated words → `name <local@domain>`
    /// - display name of 3+ words → `"name" <local@domain>`
    pub fn to_canonical(&self) -> String {
        if self.display_name.is_empty() {
            return self.email();
        }
        let word_count = self.display_name.split_whitespace().count();
        if word_count <= 2 {
            format!("{} <{}>", self.display_name, self.email())
        } else {
            format!("\"{}\" <{}>", self.display_name, self.email())
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical())
    }
}
