//! HTML sanitization.
//!
//! Removes executable and embedding markup before HTML is emitted. The
//! rewriting is streaming, so the markup that survives is passed through
//! byte for byte.

use lol_html::html_content::Element;
use lol_html::{HtmlRewriter, Settings, element};

/// Elements removed together with their content.
const FORBIDDEN_ELEMENTS: [&str; 10] =
    ["script", "noscript", "iframe", "frame", "frameset", "object", "embed", "applet", "base", "template"];

/// Attributes that carry URLs.
const URL_ATTRIBUTES: [&str; 5] = ["href", "src", "action", "formaction", "xlink:href"];

/// Schemes that execute code or render arbitrary markup when followed.
const DANGEROUS_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:text/html"];

/// Sanitizes an HTML document or fragment.
pub fn sanitize_html(html: &str) -> String {
    let mut handlers: Vec<_> = FORBIDDEN_ELEMENTS
        .iter()
        .map(|tag| {
            element!(*tag, |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    handlers.push(element!("meta[http-equiv]", |el| {
        if el
            .get_attribute("http-equiv")
            .is_some_and(|v| v.eq_ignore_ascii_case("refresh"))
        {
            el.remove();
        }
        Ok(())
    }));

    handlers.push(element!("*", |el| {
        strip_attributes(el);
        Ok(())
    }));

    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = HtmlRewriter::new(
        Settings { element_content_handlers: handlers, strict: false, ..Default::default() },
        |c: &[u8]| output.extend_from_slice(c),
    );

    // Non-strict parsing and infallible handlers leave only the memory limit.
    if let Err(err) = rewriter.write(html.as_bytes()) {
        tracing::warn!(%err, "sanitizer failed; emitting escaped source");
        return crate::render::escape_html(html);
    }

    if let Err(err) = rewriter.end() {
        tracing::warn!(%err, "sanitizer failed; emitting escaped source");
        return crate::render::escape_html(html);
    }

    String::from_utf8_lossy(&output).into_owned()
}

fn strip_attributes(el: &mut Element<'_, '_>) {
    let doomed: Vec<String> = el
        .attributes()
        .iter()
        .filter(|attr| {
            let name = attr.name();
            name.starts_with("on")
                || (URL_ATTRIBUTES.contains(&name.as_str()) && is_dangerous_url(&attr.value()))
        })
        .map(|attr| attr.name())
        .collect();

    for name in doomed {
        el.remove_attribute(&name);
    }
}

fn is_dangerous_url(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    DANGEROUS_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme))
}
