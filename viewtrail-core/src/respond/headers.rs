use pingora_http::ResponseHeader;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const PERMISSIONS_POLICY: &str = "accelerometer=*, autoplay=*, camera=*, clipboard-write=*, \
fullscreen=*, geolocation=*, gyroscope=*, magnetometer=*, microphone=*, payment=*, usb=*";

const CONTENT_SECURITY_POLICY: &str = "default-src 'self';base-uri 'self';\
font-src 'self' https: data:;form-action 'self';frame-ancestors 'self';img-src 'self' data:;\
object-src 'none';script-src 'self';script-src-attr 'none';style-src 'self' https: 'unsafe-inline';\
upgrade-insecure-requests";

/// Headers set on every response.
const STATIC_HEADERS: &[(&str, &str)] = &[
    ("permissions-policy", PERMISSIONS_POLICY),
    ("content-security-policy", CONTENT_SECURITY_POLICY),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

pub fn apply_response_headers(
    resp: &mut ResponseHeader,
    request_id: Option<&str>,
) -> pingora::Result<()> {
    for (name, value) in STATIC_HEADERS {
        resp.insert_header(*name, *value)?;
    }

    if let Some(id) = request_id {
        resp.insert_header(REQUEST_ID_HEADER, id.to_owned())?;
    }

    Ok(())
}
