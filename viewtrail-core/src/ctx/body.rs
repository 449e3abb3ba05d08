use serde_json::{Map, Value};

/// Bodies larger than this are drained but not parsed.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Parse a request body according to its content type.
///
/// Returns `None` for empty bodies, unsupported media types and parse failures.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }

    let media_type = content_type?
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        "application/json" => serde_json::from_slice(body).ok(),
        "application/x-www-form-urlencoded" => Some(parse_form(body)),
        "text/plain" => Some(Value::String(String::from_utf8_lossy(body).into_owned())),
        _ => None,
    }
}

/// Form fields as a JSON object. Repeated keys collect into an array.
fn parse_form(body: &[u8]) -> Value {
    let mut fields = Map::new();

    for (key, value) in url::form_urlencoded::parse(body) {
        let value = Value::String(value.into_owned());
        match fields.get_mut(key.as_ref()) {
            None => {
                fields.insert(key.into_owned(), value);
            }
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    Value::Object(fields)
}
