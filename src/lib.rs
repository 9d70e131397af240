//! ### ssr-cookie keeps cookies set during server side rendering visible to the rest of the request
//! A cookie set while rendering on the server only reaches the browser with
//! the response. Anything reading the request's `Cookie` header later in the
//! same pass would still see the old value. This crate sets the cookie on the
//! client visible store and prepends it to the request's `Cookie` header.
//!
//! Just `use` the prelude module, and you're ready to go!
//!
//! ## Quick setup
//! ```rust
//! use ssr_cookie::prelude::*;
//!
//! let mut req = http::Request::builder().header(header::COOKIE, "lang=en").body(()).unwrap();
//!
//! req.set_cookie(CookieAssignment::new("authToken").value("test").attribute("path", "/")).unwrap();
//!
//! assert_eq!(req.headers().get(header::COOKIE).unwrap(), "authToken=test; path=/; lang=en");
//! ```

#[macro_use]
extern crate log;

/// Cookie attributes and their values
pub mod attribute;
/// A single cookie to set
pub mod assignment;
/// Header fragment serialization
pub mod compose;
///
pub mod config;
/// Server or client side execution
pub mod context;
/// Error definitions
pub mod error;
/// Cookie syncing on `http::Request`
pub mod ext;
/// Client visible cookie stores
pub mod store;
///
pub mod sync;
///
pub use cookie;
///
pub use http;

/// Contains everything you need to set cookies from a render
///
/// ```rust
/// use ssr_cookie::prelude::*;
///
/// let mut req = http::Request::builder().body(()).unwrap();
/// req.set_cookie(("theme", "dark")).unwrap();
/// assert_eq!(req.headers().get(header::COOKIE).unwrap(), "theme=dark");
/// ```
pub mod prelude {
    ///
    pub use crate::assignment::CookieAssignment;
    ///
    pub use crate::attribute::AttributeValue;
    ///
    pub use crate::attribute::Attributes;
    ///
    pub use crate::compose::compose_fragment;
    ///
    pub use crate::compose::merge_into_header;
    ///
    pub use crate::config::SyncConfig;
    ///
    pub use crate::context::ClientContext;
    ///
    pub use crate::context::ExecutionContext;
    ///
    pub use crate::context::ServerContext;
    ///
    pub use crate::error::CookieError;
    ///
    pub use crate::ext::RequestCookieExt;
    ///
    pub use crate::store::CookieStore;
    ///
    pub use crate::store::JarStore;
    ///
    pub use crate::sync::CookieSync;
    ///
    pub use cookie::CookieJar;
    ///
    pub use cookie::SameSite;
    ///
    pub use http::header;
    ///
    pub use http::HeaderMap;
    ///
    pub use http::HeaderValue;
}
