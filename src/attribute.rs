use cookie::SameSite;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    time::{SystemTime, UNIX_EPOCH},
};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, PrimitiveDateTime};

/// `Tue, 01 Jan 2030 00:00:00 GMT`, the date format of `Expires` and of every
/// other HTTP date header
const HTTP_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT");

/// Format a date as an HTTP date, converting it to UTC first
pub fn format_http_date(date: OffsetDateTime) -> String {
    to_utc(date).format(&HTTP_DATE_FORMAT).unwrap_or_default()
}

/// Convert to UTC, clamping to the supported years when the offset pushes the
/// date out of them
pub(crate) fn to_utc(date: OffsetDateTime) -> OffsetDateTime {
    if date.offset().is_utc() {
        return date;
    }

    match OffsetDateTime::from_unix_timestamp(date.unix_timestamp()) {
        Ok(utc) => utc.replace_nanosecond(date.nanosecond()).unwrap_or(utc),
        Err(_) => clamp(date.unix_timestamp()),
    }
}

fn clamp(unix_timestamp: i64) -> OffsetDateTime {
    if unix_timestamp > 0 {
        PrimitiveDateTime::MAX.assume_utc()
    } else {
        PrimitiveDateTime::MIN.assume_utc()
    }
}

/// `SystemTime` to UTC date, seconds precision, clamped like [`to_utc`]
fn from_system_time(time: SystemTime) -> OffsetDateTime {
    let unix_timestamp = match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            -secs - i64::from(before.subsec_nanos() > 0)
        }
    };

    OffsetDateTime::from_unix_timestamp(unix_timestamp).unwrap_or_else(|_| clamp(unix_timestamp))
}

/// Parse an HTTP date as produced by [`format_http_date`]
pub fn parse_http_date(date: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(date.trim(), &HTTP_DATE_FORMAT).ok().map(PrimitiveDateTime::assume_utc)
}

/// Value of a single cookie attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// `true` is emitted as a bare flag (`Secure`), `false` as `name=false`
    Bool(bool),
    Text(String),
    Number(f64),
    /// A point in time, emitted as an HTTP date
    Timestamp(OffsetDateTime),
}

impl AttributeValue {
    /// Whether this value is emitted without `=value`
    #[inline]
    pub fn is_flag(&self) -> bool {
        matches!(self, AttributeValue::Bool(true))
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AttributeValue::Bool(b) => Display::fmt(b, f),
            AttributeValue::Text(t) => f.write_str(t),
            AttributeValue::Number(n) => f.write_str(&format_number(*n)),
            AttributeValue::Timestamp(date) => f.write_str(&format_http_date(*date)),
        }
    }
}

/// Numbers print like a script runtime prints them: no trailing `.0`, no
/// negative zero, `Infinity` rather than `inf`, exponent form (`1e+21`,
/// `1e-7`) outside of `[1e-6, 1e21)`
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let infinity = if n.is_sign_positive() { "Infinity" } else { "-Infinity" };
        infinity.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<OffsetDateTime> for AttributeValue {
    fn from(date: OffsetDateTime) -> Self {
        AttributeValue::Timestamp(date)
    }
}

impl From<SystemTime> for AttributeValue {
    fn from(time: SystemTime) -> Self {
        AttributeValue::Timestamp(from_system_time(time))
    }
}

impl From<SameSite> for AttributeValue {
    fn from(same_site: SameSite) -> Self {
        AttributeValue::Text(same_site.to_string())
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttributeValue {
                fn from(n: $t) -> Self {
                    AttributeValue::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Cookie attributes, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    #[doc(hidden)]
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. Setting a name that is already present replaces its
    /// value without moving it.
    ///
    /// ```rust
    /// # use ssr_cookie::attribute::Attributes;
    /// let mut attrs = Attributes::new();
    /// attrs.insert("Path", "/");
    /// attrs.insert("Secure", true);
    /// attrs.insert("Path", "/app");
    ///
    /// assert_eq!(attrs.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["Path", "Secure"]);
    /// ```
    pub fn insert<N: Into<String>, V: Into<AttributeValue>>(&mut self, name: N, value: V) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Builder flavour of [`insert`](#method.insert)
    #[inline]
    pub fn with<N: Into<String>, V: Into<AttributeValue>>(mut self, name: N, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Lay `other` over `self`: existing names take the new value in place,
    /// new names are appended in `other`'s order
    pub fn extend_from(&mut self, other: &Attributes) {
        for (name, value) in other.iter() {
            self.insert(name, value.clone());
        }
    }

    pub fn expires<V: Into<AttributeValue>>(self, expires: V) -> Self {
        self.with("expires", expires)
    }

    pub fn max_age<V: Into<AttributeValue>>(self, seconds: V) -> Self {
        self.with("max-age", seconds)
    }

    pub fn path<P: Into<String>>(self, path: P) -> Self {
        self.with("path", AttributeValue::Text(path.into()))
    }

    pub fn domain<D: Into<String>>(self, domain: D) -> Self {
        self.with("domain", AttributeValue::Text(domain.into()))
    }

    pub fn secure(self, secure: bool) -> Self {
        self.with("secure", secure)
    }

    pub fn http_only(self, http_only: bool) -> Self {
        self.with("httpOnly", http_only)
    }

    pub fn same_site(self, same_site: SameSite) -> Self {
        self.with("sameSite", same_site)
    }
}

impl<N: Into<String>, V: Into<AttributeValue>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn http_date_is_utc() {
        assert_eq!(format_http_date(datetime!(2030-01-01 00:00:00 UTC)), "Tue, 01 Jan 2030 00:00:00 GMT");
        assert_eq!(format_http_date(datetime!(2030-01-01 01:00:00 +1)), "Tue, 01 Jan 2030 00:00:00 GMT");
    }

    #[test]
    fn http_date_parses_back() {
        let date = datetime!(2024-02-29 13:05:09 UTC);
        assert_eq!(parse_http_date(&format_http_date(date)), Some(date));
        assert_eq!(parse_http_date("next tuesday"), None);
    }

    #[test]
    fn numbers_print_without_fraction() {
        assert_eq!(AttributeValue::from(3600).to_string(), "3600");
        assert_eq!(AttributeValue::from(1.5).to_string(), "1.5");
        assert_eq!(AttributeValue::from(-0.0).to_string(), "0");
        assert_eq!(AttributeValue::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(AttributeValue::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(AttributeValue::from(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn numbers_switch_to_exponent_form() {
        assert_eq!(AttributeValue::from(1e21).to_string(), "1e+21");
        assert_eq!(AttributeValue::from(-2.5e22).to_string(), "-2.5e+22");
        assert_eq!(AttributeValue::from(1e-7).to_string(), "1e-7");
        assert_eq!(AttributeValue::from(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(AttributeValue::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(AttributeValue::from(0.000001).to_string(), "0.000001");
    }

    #[test]
    fn far_dates_are_clamped() {
        let date = datetime!(9999-12-31 23:00:00 -5);
        assert_eq!(format_http_date(date), "Fri, 31 Dec 9999 23:59:59 GMT");
        assert_eq!(AttributeValue::from(date).to_string(), "Fri, 31 Dec 9999 23:59:59 GMT");
        assert_eq!(format_http_date(datetime!(9999-12-31 23:00:00 +1)), "Fri, 31 Dec 9999 22:00:00 GMT");
    }

    #[test]
    fn system_time_out_of_range_is_clamped() {
        let far = UNIX_EPOCH + std::time::Duration::from_secs(400_000_000_000);
        assert_eq!(AttributeValue::from(far).to_string(), "Fri, 31 Dec 9999 23:59:59 GMT");

        let expires = UNIX_EPOCH + std::time::Duration::from_secs(1_893_456_000);
        assert_eq!(AttributeValue::from(expires).to_string(), "Tue, 01 Jan 2030 00:00:00 GMT");
    }

    #[test]
    fn only_true_is_a_flag() {
        assert!(AttributeValue::from(true).is_flag());
        assert!(!AttributeValue::from(false).is_flag());
        assert_eq!(AttributeValue::from(false).to_string(), "false");
        assert!(!AttributeValue::from("true").is_flag());
    }

    #[test]
    fn same_site_is_text() {
        assert_eq!(AttributeValue::from(SameSite::Lax), AttributeValue::Text("Lax".to_string()));
    }

    #[test]
    fn extend_overrides_in_place() {
        let mut base: Attributes = vec![("path", "/"), ("domain", "a.test")].into_iter().collect();
        let other = Attributes::new().with("secure", true).with("path", "/app");
        base.extend_from(&other);

        let names = base.iter().map(|(n, _)| n).collect::<Vec<_>>();
        assert_eq!(names, vec!["path", "domain", "secure"]);
        assert_eq!(base.get("path"), Some(&AttributeValue::Text("/app".to_string())));
    }

    #[test]
    fn remove_keeps_order() {
        let mut attrs = Attributes::new().path("/").secure(true).max_age(10);
        assert_eq!(attrs.remove("secure"), Some(AttributeValue::Bool(true)));
        assert_eq!(attrs.remove("secure"), None);
        assert_eq!(attrs.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["path", "max-age"]);
        assert_eq!(attrs.len(), 2);
    }
}
