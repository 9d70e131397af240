#[macro_use]
extern crate log;

use hyper::{
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server,
};
use ssr_cookie::prelude::*;
use std::{convert::Infallible, net::SocketAddr};

/// Sets the auth cookie the way a server middleware would
fn authenticate(req: &mut Request<Body>) -> Result<(), CookieError> {
    let assignment = CookieAssignment::new("authToken")
        .value("test token")
        .attributes(Attributes::new().path("/").http_only(true).same_site(SameSite::Lax).max_age(3600));

    req.set_cookie(assignment)
}

/// Renders a page from the request's cookies, including the ones set earlier
/// in this same request
fn render(req: &Request<Body>) -> String {
    let cookies = req.headers().get(header::COOKIE).and_then(|c| c.to_str().ok()).unwrap_or_default();
    format!("Cookies seen while rendering: {}\r\n", cookies)
}

async fn handler(mut req: Request<Body>) -> Result<Response<Body>, Infallible> {
    if let Err(e) = authenticate(&mut req) {
        warn!("Unable to set the auth cookie: {}", e);
    }

    let mut res = Response::new(Body::from(render(&req)));

    if let Some(cookies) = req.take_cookie_delta() {
        if let Err(e) = cookies.write_set_cookies(res.headers_mut()) {
            warn!("Unable to write Set-Cookie: {}", e);
        }
    }

    Ok(res)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let make_svc = make_service_fn(|_conn| async { Ok::<_, Infallible>(service_fn(handler)) });

    info!("Listening on http://{}", addr);
    if let Err(e) = Server::bind(&addr).serve(make_svc).await {
        error!("Server error: {}", e);
    }
}
