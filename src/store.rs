use crate::{
    assignment::CookieAssignment,
    attribute::{parse_http_date, to_utc, AttributeValue},
    compose::encode_value,
    error::CookieError,
};
use cookie::{Cookie, CookieJar, SameSite};
use http::{
    header::{HeaderValue, SET_COOKIE},
    HeaderMap,
};
use time::Duration;

/// Client visible cookie store, keyed by cookie name
pub trait CookieStore {
    fn set(&mut self, assignment: &CookieAssignment);

    /// Value of a cookie as it is sent on the wire
    fn get(&self, name: &str) -> Option<&str>;
}

/// Cookie store backed by a [`CookieJar`]. Every cookie set through it ends up
/// in the jar's delta, ready to be written as `Set-Cookie` on the response.
#[derive(Debug, Clone, Default)]
pub struct JarStore {
    #[doc(hidden)]
    jar: CookieJar,
}

impl JarStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    #[inline]
    pub fn jar_mut(&mut self) -> &mut CookieJar {
        &mut self.jar
    }

    #[inline]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    /// Append one `Set-Cookie` field per cookie set through this store
    ///
    /// ```rust
    /// # use ssr_cookie::prelude::*;
    /// let mut store = JarStore::new();
    /// store.set(&CookieAssignment::new("theme").value("dark").attribute("path", "/"));
    ///
    /// let mut headers = HeaderMap::new();
    /// store.write_set_cookies(&mut headers).unwrap();
    /// assert_eq!(headers.get(header::SET_COOKIE).unwrap(), "theme=dark; Path=/");
    /// ```
    pub fn write_set_cookies(&self, headers: &mut HeaderMap) -> Result<(), CookieError> {
        for c in self.jar.delta() {
            headers.append(SET_COOKIE, HeaderValue::from_str(c.to_string().as_str())?);
        }

        Ok(())
    }
}

impl From<CookieJar> for JarStore {
    fn from(jar: CookieJar) -> Self {
        JarStore { jar }
    }
}

impl CookieStore for JarStore {
    fn set(&mut self, assignment: &CookieAssignment) {
        let mut cookie = Cookie::new(assignment.name().to_string(), encode_value(assignment.get_value()).into_owned());

        for (name, value) in assignment.get_attributes().iter() {
            if !apply_attribute(&mut cookie, name, value) {
                debug!("Cookie {}: attribute {}={} is not kept by the cookie store", assignment.name(), name, value);
            }
        }

        self.jar.add(cookie);
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.jar.get(name).map(|c| c.value())
    }
}

/// Map a well known attribute onto the cookie. Returns false if the attribute
/// is unknown or its value is unusable.
fn apply_attribute(cookie: &mut Cookie<'static>, name: &str, value: &AttributeValue) -> bool {
    match (name.to_ascii_lowercase().as_str(), value) {
        ("expires", AttributeValue::Timestamp(date)) => cookie.set_expires(to_utc(*date)),
        ("expires", AttributeValue::Text(text)) => match parse_http_date(text) {
            Some(date) => cookie.set_expires(date),
            None => return false,
        },
        ("max-age" | "maxage", AttributeValue::Number(seconds)) if seconds.is_finite() => {
            cookie.set_max_age(Duration::seconds(*seconds as i64))
        }
        ("max-age" | "maxage", AttributeValue::Text(text)) => match text.trim().parse::<i64>() {
            Ok(seconds) => cookie.set_max_age(Duration::seconds(seconds)),
            Err(_) => return false,
        },
        ("path", value) if !value.is_flag() => cookie.set_path(value.to_string()),
        ("domain", value) if !value.is_flag() => cookie.set_domain(value.to_string()),
        ("secure", AttributeValue::Bool(b)) => cookie.set_secure(*b),
        ("httponly", AttributeValue::Bool(b)) => cookie.set_http_only(*b),
        ("samesite", AttributeValue::Bool(true)) => cookie.set_same_site(SameSite::Strict),
        ("samesite", AttributeValue::Text(text)) => match text.to_ascii_lowercase().as_str() {
            "strict" => cookie.set_same_site(SameSite::Strict),
            "lax" => cookie.set_same_site(SameSite::Lax),
            "none" => cookie.set_same_site(SameSite::None),
            _ => return false,
        },
        _ => return false,
    }

    true
}
