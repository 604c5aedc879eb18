//! Host page for the preview pane.
//!
//! Generated documents are untrusted. They are embedded through `srcdoc` in
//! an iframe sandboxed with `allow-scripts` only: scripts run, but the frame
//! gets an opaque origin and cannot reach the host page or its storage.

pub const PREVIEW_SANDBOX: &str = "allow-scripts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreviewBounds {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPage<'a> {
    Placeholder,
    Generating,
    Failed {
        detail: &'a str,
    },
    Document {
        html: &'a str,
        label: &'a str,
        bounds: PreviewBounds,
    },
}

pub fn render_preview_page(page: &PreviewPage<'_>) -> String {
    let (title, body) = match page {
        PreviewPage::Placeholder => (
            "SiteCraft AI",
            r#"<div class="state">
  <h2>AI Website Generator</h2>
  <p>Describe your ideal website. Our AI will transform your vision into a responsive design.</p>
</div>"#
                .to_string(),
        ),
        PreviewPage::Generating => (
            "Generating…",
            r#"<div class="state"><p>Generating your design…</p></div>"#.to_string(),
        ),
        PreviewPage::Failed { detail } => (
            "Design Generation Failed",
            format!(
                r#"<div class="state error">
  <h2>Design Generation Failed</h2>
  <p>{}</p>
</div>"#,
                escape_html(detail)
            ),
        ),
        PreviewPage::Document {
            html,
            label,
            bounds,
        } => (
            "Generated Website",
            format!(
                r#"<div class="device">{label}</div>
<iframe title="Generated Website" sandbox="{PREVIEW_SANDBOX}" style="{style}" srcdoc="{srcdoc}"></iframe>"#,
                label = escape_html(label),
                style = frame_style(*bounds),
                srcdoc = escape_html(html),
            ),
        ),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>
html,body{{margin:0;height:100%;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;background:#f3f4f6}}
body{{display:flex;flex-direction:column;align-items:center;justify-content:center}}
iframe{{border:0;background:#fff;box-shadow:0 10px 30px rgba(0,0,0,.2)}}
.device{{font-size:12px;color:#6b7280;margin:8px}}
.state{{text-align:center;padding:32px;max-width:480px}}
.state.error{{color:#dc2626}}
</style>
</head>
<body>
{body}
</body>
</html>
"##
    )
}

fn frame_style(bounds: PreviewBounds) -> String {
    let mut style = String::from("width:100%;height:100%");
    if let Some(width) = bounds.max_width {
        style.push_str(&format!(";max-width:{width}px"));
    }
    if let Some(height) = bounds.max_height {
        style.push_str(&format!(";max-height:{height}px"));
    }
    style
}

/// Escapes text for element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
