use crate::{
    assignment::CookieAssignment,
    compose::merge_into_header,
    config::SyncConfig,
    context::ExecutionContext,
    error::CookieError,
    store::CookieStore,
};

/// Sets cookies on the client visible store and, during server side
/// rendering, makes them visible to the rest of the request as well.
///
/// Cookies written during a render are normally only sent back with the
/// response, so reading the `Cookie` header later in the same request still
/// shows the old value. `CookieSync` prepends every cookie it sets to that
/// header.
///
/// ```rust
/// # use ssr_cookie::prelude::*;
/// let mut headers = HeaderMap::new();
/// headers.insert(header::COOKIE, HeaderValue::from_static("b=2; c=3"));
///
/// let mut sync = CookieSync::new(JarStore::new(), ServerContext::new(&mut headers));
/// sync.set_cookie(CookieAssignment::new("a").value("1")).unwrap();
/// assert_eq!(sync.store().get("a"), Some("1"));
///
/// drop(sync);
/// assert_eq!(headers.get(header::COOKIE).unwrap(), "a=1; b=2; c=3");
/// ```
pub struct CookieSync<S, C> {
    #[doc(hidden)]
    store: S,
    #[doc(hidden)]
    context: C,
    #[doc(hidden)]
    config: SyncConfig,
}

impl<S: CookieStore, C: ExecutionContext> CookieSync<S, C> {
    #[inline]
    pub fn new(store: S, context: C) -> Self {
        Self::with_config(store, context, SyncConfig::default())
    }

    #[inline]
    pub fn with_config(store: S, context: C, config: SyncConfig) -> Self {
        CookieSync { store, context, config }
    }

    /// Set a cookie.
    ///
    /// The store is always updated. On the server, the request's `Cookie`
    /// header becomes `fragment; previous header`. Fails only if the header
    /// map refuses the new header.
    pub fn set_cookie<A: Into<CookieAssignment>>(&mut self, assignment: A) -> Result<(), CookieError> {
        let assignment = assignment.into().with_defaults(self.config.default_attributes());

        self.store.set(&assignment);

        if !self.context.is_server_side() {
            trace!("Cookie {} set on the client only", assignment.name());
            return Ok(());
        }

        if !self.config.patches_request_header() {
            return Ok(());
        }

        let fragment = assignment.to_fragment();
        let header = merge_into_header(&fragment, self.context.current_request_header().as_deref());
        trace!("Request cookie header patched with {}", fragment);
        self.context.set_current_request_header(header)
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[inline]
    pub fn context(&self) -> &C {
        &self.context
    }

    #[inline]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Give the store back, releasing the context
    #[inline]
    pub fn into_store(self) -> S {
        self.store
    }
}
