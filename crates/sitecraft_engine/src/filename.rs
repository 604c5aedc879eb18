use chrono::{DateTime, SecondsFormat, Utc};

pub const DOWNLOAD_PREFIX: &str = "sitecraft_design_";

/// `sitecraft_design_{ISO-8601 with ':' replaced by '-'}.html`
pub fn download_filename(at: DateTime<Utc>) -> String {
    let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let safe: String = stamp
        .chars()
        .map(|c| if is_forbidden(c) { '-' } else { c })
        .collect();
    format!("{DOWNLOAD_PREFIX}{safe}.html")
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::download_filename;

    #[test]
    fn embeds_filesystem_safe_iso_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(
            download_filename(at),
            "sitecraft_design_2024-05-01T10-20-30.123Z.html"
        );
    }
}
