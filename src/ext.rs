use crate::{
    assignment::CookieAssignment, config::SyncConfig, context::ServerContext, error::CookieError, store::JarStore, sync::CookieSync,
};
use http::Request;

/// Cookie syncing straight from a request being handled on the server.
///
/// Cookies set this way are kept in the request extensions until they are
/// written on the response with
/// [`JarStore::write_set_cookies`](crate::store::JarStore::write_set_cookies).
/// A [`SyncConfig`] inserted in the extensions is honored.
///
/// ```rust
/// # use ssr_cookie::prelude::*;
/// let mut req = http::Request::builder().header(header::COOKIE, "b=2").body(()).unwrap();
///
/// // some middleware
/// req.set_cookie(CookieAssignment::new("authToken").value("test")).unwrap();
///
/// // later in the same request
/// assert_eq!(req.headers().get(header::COOKIE).unwrap(), "authToken=test; b=2");
///
/// let mut res = http::Response::new(());
/// if let Some(cookies) = req.take_cookie_delta() {
///     cookies.write_set_cookies(res.headers_mut()).unwrap();
/// }
/// assert_eq!(res.headers().get(header::SET_COOKIE).unwrap(), "authToken=test");
/// ```
pub trait RequestCookieExt {
    fn set_cookie<A: Into<CookieAssignment>>(&mut self, assignment: A) -> Result<(), CookieError>;

    /// Cookies set on this request so far
    fn cookie_delta(&self) -> Option<&JarStore>;

    fn take_cookie_delta(&mut self) -> Option<JarStore>;
}

impl<B> RequestCookieExt for Request<B> {
    fn set_cookie<A: Into<CookieAssignment>>(&mut self, assignment: A) -> Result<(), CookieError> {
        let config = self.extensions().get::<SyncConfig>().cloned().unwrap_or_default();
        let store = self.extensions_mut().remove::<JarStore>().unwrap_or_default();

        let mut sync = CookieSync::with_config(store, ServerContext::from_request(self), config);
        let res = sync.set_cookie(assignment);
        let store = sync.into_store();

        self.extensions_mut().insert(store);
        res
    }

    #[inline]
    fn cookie_delta(&self) -> Option<&JarStore> {
        self.extensions().get::<JarStore>()
    }

    #[inline]
    fn take_cookie_delta(&mut self) -> Option<JarStore> {
        self.extensions_mut().remove::<JarStore>()
    }
}
