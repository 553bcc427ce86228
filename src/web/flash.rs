//! One-shot user messages carried across the redirect back to the form.

use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::Cookie;

const FLASH_COOKIE: &str = "flash";

/// Queues `message` for the next page view.
pub fn set(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
    // hex keeps `;`, `,` and spaces out of the cookie value
    let cookie = Cookie::build((FLASH_COOKIE, hex::encode(message)))
        .path("/")
        .http_only(true);
    jar.add(cookie)
}

/// Returns the pending message, if any, and clears it.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    let message = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| hex::decode(cookie.value()).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match message {
        Some(message) => (
            jar.remove(Cookie::build(FLASH_COOKIE).path("/")),
            Some(message),
        ),
        None => (jar, None),
    }
}
