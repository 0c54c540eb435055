//! The canonical string and its HMAC-SHA1 signature.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Compute the `Authorization` header value for a request.
///
/// The canonical string is `method`, the hex MD5 of the body, the
/// `Content-Type` with any `;`-suffixed parameters stripped, the `Date`
/// header value, and the request path, joined with newlines. The signature
/// is the base64 HMAC-SHA1 of that string under the secret key, and the
/// final header is `"VWS {access_key}:{signature}"`.
pub fn authorization_header(
    access_key: &str,
    secret_key: &str,
    method: &str,
    content: &[u8],
    content_type: &str,
    date: &str,
    request_path: &str,
) -> String {
    let content_md5 = hex::encode(Md5::digest(content));
    let bare_content_type = content_type
        .split_once(';')
        .map_or(content_type, |(main, _)| main);
    let string_to_sign =
        format!("{method}\n{content_md5}\n{bare_content_type}\n{date}\n{request_path}");

    let mut mac = HmacSha1::new_from_slice(secret_key.as_bytes())
        .expect("HMAC-SHA1 accepts keys of any length");
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    format!("VWS {access_key}:{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_deterministic() {
        let first = authorization_header(
            "access",
            "secret",
            "GET",
            b"",
            "",
            "Sun, 22 Apr 2018 20:12:57 GMT",
            "/targets",
        );
        let second = authorization_header(
            "access",
            "secret",
            "GET",
            b"",
            "",
            "Sun, 22 Apr 2018 20:12:57 GMT",
            "/targets",
        );
        assert_eq!(first, second);
        assert!(first.starts_with("VWS access:"));
    }

    #[test]
    fn every_canonical_field_affects_the_signature() {
        let base = authorization_header("a", "s", "GET", b"", "", "date", "/targets");
        let variants = [
            authorization_header("a", "other", "GET", b"", "", "date", "/targets"),
            authorization_header("a", "s", "POST", b"", "", "date", "/targets"),
            authorization_header("a", "s", "GET", b"body", "", "date", "/targets"),
            authorization_header("a", "s", "GET", b"", "application/json", "date", "/targets"),
            authorization_header("a", "s", "GET", b"", "", "other date", "/targets"),
            authorization_header("a", "s", "GET", b"", "", "date", "/summary"),
        ];
        for variant in variants {
            assert_ne!(base, variant);
        }
    }

    #[test]
    fn content_type_parameters_are_stripped() {
        let bare = authorization_header("a", "s", "POST", b"{}", "application/json", "d", "/t");
        let with_charset = authorization_header(
            "a",
            "s",
            "POST",
            b"{}",
            "application/json; charset=utf-8",
            "d",
            "/t",
        );
        assert_eq!(bare, with_charset);
    }
}
