use crate::{
    attribute::{AttributeValue, Attributes},
    compose::compose_fragment,
};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A request to set one named cookie to a value
///
/// ```rust
/// # use ssr_cookie::prelude::*;
/// let assignment = CookieAssignment::new("theme").value("dark").attribute("Path", "/");
/// assert_eq!(assignment.to_string(), "theme=dark; Path=/");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CookieAssignment {
    #[doc(hidden)]
    name: String,
    #[doc(hidden)]
    value: String,
    #[doc(hidden)]
    attributes: Attributes,
}

impl CookieAssignment {
    /// A cookie with an empty value and no attributes
    #[inline]
    pub fn new<N: Into<String>>(name: N) -> Self {
        CookieAssignment {
            name: name.into(),
            value: String::new(),
            attributes: Attributes::new(),
        }
    }

    #[inline]
    pub fn value<V: Into<String>>(mut self, value: V) -> Self {
        self.value = value.into();
        self
    }

    #[inline]
    pub fn attribute<N: Into<String>, V: Into<AttributeValue>>(mut self, name: N, value: V) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Replace every attribute at once
    #[inline]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn get_attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[inline]
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Header fragment for this cookie, see
    /// [`compose_fragment`](crate::compose::compose_fragment)
    #[inline]
    pub fn to_fragment(&self) -> String {
        compose_fragment(&self.name, &self.value, &self.attributes)
    }

    /// Put `defaults` underneath this assignment's own attributes
    pub(crate) fn with_defaults(self, defaults: &Attributes) -> Self {
        if defaults.is_empty() {
            return self;
        }

        let CookieAssignment { name, value, attributes } = self;
        let mut merged = defaults.clone();
        merged.extend_from(&attributes);
        CookieAssignment {
            name,
            value,
            attributes: merged,
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for CookieAssignment {
    fn from((name, value): (N, V)) -> Self {
        CookieAssignment::new(name).value(value)
    }
}

impl Display for CookieAssignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.to_fragment())
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn defaults_to_empty_value() {
        let assignment = CookieAssignment::new("a");
        assert_eq!(assignment.get_value(), "");
        assert!(assignment.get_attributes().is_empty());
        assert_eq!(assignment.to_fragment(), "a=");
    }

    #[test]
    fn from_tuple() {
        let assignment: CookieAssignment = ("authToken", "t 1").into();
        assert_eq!(assignment.name(), "authToken");
        assert_eq!(assignment.to_string(), "authToken=t%201");
    }

    #[test]
    fn defaults_go_first() {
        let defaults = Attributes::new().path("/").secure(true);
        let assignment = CookieAssignment::new("a").value("1").attribute("max-age", 60).attribute("path", "/app");

        let merged = assignment.with_defaults(&defaults);
        assert_eq!(merged.to_fragment(), "a=1; path=/app; secure; max-age=60");
    }
}
