use crate::error::CookieError;
use http::{
    header::{HeaderValue, COOKIE},
    HeaderMap, Request,
};

/// Where a cookie is being set from
///
/// On the server there is a request in flight whose `Cookie` header can be
/// patched; in the browser there is none.
pub trait ExecutionContext {
    fn is_server_side(&self) -> bool;

    /// The raw `Cookie` header of the current request, if any
    fn current_request_header(&self) -> Option<String>;

    /// Replace the raw `Cookie` header of the current request
    fn set_current_request_header(&mut self, value: String) -> Result<(), CookieError>;
}

/// Server side rendering of one request
pub struct ServerContext<'a> {
    #[doc(hidden)]
    headers: &'a mut HeaderMap,
}

impl<'a> ServerContext<'a> {
    #[inline]
    pub fn new(headers: &'a mut HeaderMap) -> Self {
        ServerContext { headers }
    }

    #[inline]
    pub fn from_request<B>(request: &'a mut Request<B>) -> Self {
        ServerContext::new(request.headers_mut())
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl ExecutionContext for ServerContext<'_> {
    #[inline]
    fn is_server_side(&self) -> bool {
        true
    }

    /// A request may carry several `Cookie` fields (HTTP/2 splits them), they
    /// are read as a single header
    fn current_request_header(&self) -> Option<String> {
        let fields = self
            .headers
            .get_all(COOKIE)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>();

        if fields.is_empty() {
            None
        } else {
            Some(fields.join("; "))
        }
    }

    fn set_current_request_header(&mut self, value: String) -> Result<(), CookieError> {
        let value = HeaderValue::from_str(&value)?;
        self.headers.insert(COOKIE, value);
        Ok(())
    }
}

/// Browser side, there is no request to patch
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientContext;

impl ExecutionContext for ClientContext {
    #[inline]
    fn is_server_side(&self) -> bool {
        false
    }

    #[inline]
    fn current_request_header(&self) -> Option<String> {
        None
    }

    fn set_current_request_header(&mut self, _value: String) -> Result<(), CookieError> {
        trace!("No request to patch on the client side");
        Ok(())
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn missing_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(ServerContext::new(&mut headers).current_request_header(), None);
    }

    #[test]
    fn empty_header_is_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(""));
        assert_eq!(ServerContext::new(&mut headers).current_request_header(), None);
    }

    #[test]
    fn split_fields_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("b=2; c=3"));
        assert_eq!(ServerContext::new(&mut headers).current_request_header().as_deref(), Some("a=1; b=2; c=3"));
    }

    #[test]
    fn write_replaces_every_field() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("b=2"));

        let mut ctx = ServerContext::new(&mut headers);
        ctx.set_current_request_header("z=0; a=1; b=2".to_string()).unwrap();

        assert_eq!(headers.get_all(COOKIE).iter().count(), 1);
        assert_eq!(headers.get(COOKIE).unwrap(), "z=0; a=1; b=2");
    }

    #[test]
    fn control_characters_are_refused() {
        let mut headers = HeaderMap::new();
        let mut ctx = ServerContext::new(&mut headers);
        let res = ctx.set_current_request_header("a=1; path=/\n".to_string());
        assert!(matches!(res, Err(CookieError::InvalidHeaderValue(_))));
        assert!(headers.get(COOKIE).is_none());
    }

    #[test]
    fn from_request() {
        let mut req = Request::builder().header(COOKIE, "a=1").body(()).unwrap();
        let ctx = ServerContext::from_request(&mut req);
        assert!(ctx.is_server_side());
        assert_eq!(ctx.current_request_header().as_deref(), Some("a=1"));
    }

    #[test]
    fn client_has_no_request() {
        let mut ctx = ClientContext;
        assert!(!ctx.is_server_side());
        assert!(ctx.set_current_request_header("a=1".to_string()).is_ok());
        assert_eq!(ctx.current_request_header(), None);
    }
}
