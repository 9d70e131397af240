use crate::attribute::{AttributeValue, Attributes};

/// Settings of a [`CookieSync`](crate::sync::CookieSync)
///
/// ```rust
/// # use ssr_cookie::prelude::*;
/// let config = SyncConfig::new().default_attribute("path", "/").default_attribute("secure", true);
///
/// assert!(config.patches_request_header());
/// assert_eq!(config.default_attributes().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SyncConfig {
    #[doc(hidden)]
    patch_request_header: bool,
    #[doc(hidden)]
    default_attributes: Attributes,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            patch_request_header: true,
            default_attributes: Attributes::new(),
        }
    }
}

impl SyncConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cookies set on the server are also written into the request's
    /// `Cookie` header. Enabled by default.
    #[inline]
    pub fn patch_request_header(mut self, patch: bool) -> Self {
        self.patch_request_header = patch;
        self
    }

    /// Attribute given to every cookie unless the cookie sets it itself
    #[inline]
    pub fn default_attribute<N: Into<String>, V: Into<AttributeValue>>(mut self, name: N, value: V) -> Self {
        self.default_attributes.insert(name, value);
        self
    }

    #[inline]
    pub fn default_attributes_mut(&mut self) -> &mut Attributes {
        &mut self.default_attributes
    }

    #[inline]
    pub fn patches_request_header(&self) -> bool {
        self.patch_request_header
    }

    #[inline]
    pub fn default_attributes(&self) -> &Attributes {
        &self.default_attributes
    }
}
