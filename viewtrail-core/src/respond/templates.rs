use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

const HOSTNAME_PLACEHOLDER: &str = "{{hostname}}";

/// Render an embedded HTML template, substituting the escaped hostname.
pub fn render(name: &str, hostname: &str) -> Option<String> {
    let file = Assets::get(name)?;
    let template = String::from_utf8_lossy(&file.data);
    Some(template.replace(HOSTNAME_PLACEHOLDER, &escape_html(hostname)))
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
