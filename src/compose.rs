use crate::attribute::Attributes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Bytes left untouched when encoding a cookie value: ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )`
pub const COOKIE_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a cookie value so it can't break out of its header token
#[inline]
pub fn encode_value(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, COOKIE_VALUE_ENCODE_SET).into()
}

/// Serialize a cookie assignment into a header fragment:
/// `name=encodedValue; attr=value; flag`
///
/// Attributes are written in insertion order. Flags (`true`) are written
/// bare, every other value as `name=value` without further encoding. Neither
/// the name nor the attributes are validated.
///
/// ```rust
/// # use ssr_cookie::{attribute::Attributes, compose::compose_fragment};
/// let attrs = Attributes::new().with("Secure", true).with("Path", "/");
/// assert_eq!(compose_fragment("a", "x y", &attrs), "a=x%20y; Secure; Path=/");
/// ```
pub fn compose_fragment(name: &str, value: &str, attributes: &Attributes) -> String {
    let mut fragment = format!("{}={}", name, encode_value(value));

    for (attr, attr_value) in attributes.iter() {
        fragment.push_str("; ");
        fragment.push_str(attr);
        if !attr_value.is_flag() {
            fragment.push('=');
            fragment.push_str(&attr_value.to_string());
        }
    }

    fragment
}

/// Put `fragment` in front of the request's existing cookie header.
///
/// Cookies already present are kept as is, even when one has the same name as
/// the fragment's cookie; the new one simply comes first.
///
/// ```rust
/// # use ssr_cookie::compose::merge_into_header;
/// assert_eq!(merge_into_header("a=1", Some("b=2; c=3")), "a=1; b=2; c=3");
/// assert_eq!(merge_into_header("a=1", None), "a=1");
/// ```
pub fn merge_into_header(fragment: &str, existing: Option<&str>) -> String {
    match existing {
        Some(existing) if !existing.is_empty() => format!("{}; {}", fragment, existing),
        _ => fragment.to_string(),
    }
}
