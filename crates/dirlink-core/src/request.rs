//! Operation request types.
//!
//! Requests are immutable descriptions of one directory operation,
//! constructed and owned by the caller and read-only to the adapter layer.
//! Distinguished names and filters are carried as opaque strings; parsing
//! and validation belong to the transport layer.

use secrecy::{ExposeSecret, SecretString};

/// Represents the search scope for directory queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Base object only.
    Base,
    /// One level below the base.
    OneLevel,
    /// Entire subtree.
    Subtree,
}

/// One attribute modification within a modify request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    /// Add attribute values.
    Add {
        /// Attribute to modify.
        attribute: String,
        /// Values to add.
        values: Vec<String>,
    },
    /// Delete attribute values.
    Delete {
        /// Attribute to modify.
        attribute: String,
        /// Values to delete (empty removes the attribute).
        values: Vec<String>,
    },
    /// Replace attribute values.
    Replace {
        /// Attribute to modify.
        attribute: String,
        /// Replacement values.
        values: Vec<String>,
    },
}

/// Simple bind request carrying a name and password.
#[derive(Debug, Clone)]
pub struct BindRequest {
    name: String,
    password: SecretString,
}

impl BindRequest {
    /// Creates a simple bind request.
    #[must_use]
    pub fn simple(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Returns the bind name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bind password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Request to add a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    dn: String,
    attributes: Vec<(String, Vec<String>)>,
}

impl AddRequest {
    /// Creates an add request for the given entry name.
    #[must_use]
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute to the new entry.
    #[must_use]
    pub fn with_attribute<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes
            .push((name.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// Returns the entry name.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Returns the attributes of the new entry.
    #[must_use]
    pub fn attributes(&self) -> &[(String, Vec<String>)] {
        &self.attributes
    }
}

/// Request to delete an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    dn: String,
}

impl DeleteRequest {
    /// Creates a delete request for the given entry name.
    #[must_use]
    pub fn new(dn: impl Into<String>) -> Self {
        Self { dn: dn.into() }
    }

    /// Returns the entry name.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }
}

/// Request to modify an entry's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyRequest {
    dn: String,
    modifications: Vec<Modification>,
}

impl ModifyRequest {
    /// Creates a modify request for the given entry name.
    #[must_use]
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            modifications: Vec::new(),
        }
    }

    /// Appends a modification.
    #[must_use]
    pub fn with_modification(mut self, modification: Modification) -> Self {
        self.modifications.push(modification);
        self
    }

    /// Returns the entry name.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Returns the modifications, in application order.
    #[must_use]
    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }
}

/// Request to rename an entry or move it below a new superior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyDnRequest {
    dn: String,
    new_rdn: String,
    delete_old_rdn: bool,
    new_superior: Option<String>,
}

impl ModifyDnRequest {
    /// Creates a rename request for the given entry name and new RDN.
    #[must_use]
    pub fn new(dn: impl Into<String>, new_rdn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            new_rdn: new_rdn.into(),
            delete_old_rdn: true,
            new_superior: None,
        }
    }

    /// Controls whether the old RDN attribute values are removed.
    #[must_use]
    pub const fn with_delete_old_rdn(mut self, delete: bool) -> Self {
        self.delete_old_rdn = delete;
        self
    }

    /// Moves the entry below a new superior entry.
    #[must_use]
    pub fn with_new_superior(mut self, superior: impl Into<String>) -> Self {
        self.new_superior = Some(superior.into());
        self
    }

    /// Returns the entry name.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Returns the new RDN.
    #[must_use]
    pub fn new_rdn(&self) -> &str {
        &self.new_rdn
    }

    /// Returns true when the old RDN attribute values are removed.
    #[must_use]
    pub const fn delete_old_rdn(&self) -> bool {
        self.delete_old_rdn
    }

    /// Returns the new superior entry name, when set.
    #[must_use]
    pub fn new_superior(&self) -> Option<&str> {
        self.new_superior.as_deref()
    }
}

/// Request to compare an attribute assertion against an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    dn: String,
    attribute: String,
    value: String,
}

impl CompareRequest {
    /// Creates a compare request.
    #[must_use]
    pub fn new(
        dn: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            dn: dn.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Returns the entry name.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Returns the attribute under comparison.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the assertion value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Generic extended operation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedRequest {
    oid: String,
    value: Option<Vec<u8>>,
}

impl ExtendedRequest {
    /// Creates an extended request for the given operation OID.
    #[must_use]
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            value: None,
        }
    }

    /// Sets the request value.
    #[must_use]
    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the operation OID.
    #[must_use]
    pub fn oid(&self) -> &str {
        &self.oid
    }

    /// Returns the request value, when present.
    #[must_use]
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }
}

/// Search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    base_dn: String,
    scope: SearchScope,
    filter: String,
    attributes: Vec<String>,
    size_limit: u32,
    time_limit_secs: u32,
    types_only: bool,
}

impl SearchRequest {
    /// Creates a search request over the given base, scope and filter.
    #[must_use]
    pub fn new(
        base_dn: impl Into<String>,
        scope: SearchScope,
        filter: impl Into<String>,
    ) -> Self {
        Self {
            base_dn: base_dn.into(),
            scope,
            filter: filter.into(),
            attributes: Vec::new(),
            size_limit: 0,
            time_limit_secs: 0,
            types_only: false,
        }
    }

    /// Restricts the attributes returned for each entry.
    #[must_use]
    pub fn with_attributes<I, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Caps the number of entries the server may return (0 means no cap).
    #[must_use]
    pub const fn with_size_limit(mut self, limit: u32) -> Self {
        self.size_limit = limit;
        self
    }

    /// Caps the server-side processing time in seconds (0 means no cap).
    #[must_use]
    pub const fn with_time_limit_secs(mut self, limit: u32) -> Self {
        self.time_limit_secs = limit;
        self
    }

    /// Requests attribute types without values.
    #[must_use]
    pub const fn with_types_only(mut self, types_only: bool) -> Self {
        self.types_only = types_only;
        self
    }

    /// Returns the search base name.
    #[must_use]
    pub fn base_dn(&self) -> &str {
        &self.base_dn
    }

    /// Returns the search scope.
    #[must_use]
    pub const fn scope(&self) -> SearchScope {
        self.scope
    }

    /// Returns the search filter.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Returns the requested attributes (empty means all user attributes).
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Returns the entry count cap (0 means no cap).
    #[must_use]
    pub const fn size_limit(&self) -> u32 {
        self.size_limit
    }

    /// Returns the server-side time cap in seconds (0 means no cap).
    #[must_use]
    pub const fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Returns true when only attribute types were requested.
    #[must_use]
    pub const fn types_only(&self) -> bool {
        self.types_only
    }
}

/// Request to abandon an outstanding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbandonRequest {
    message_id: i32,
}

impl AbandonRequest {
    /// Creates an abandon request for the given message ID.
    #[must_use]
    pub const fn new(message_id: i32) -> Self {
        Self { message_id }
    }

    /// Returns the message ID of the operation to abandon.
    #[must_use]
    pub const fn message_id(&self) -> i32 {
        self.message_id
    }
}
