//! Message body formatting.

/// Icon used when the alert title has no dedicated entry.
pub const DEFAULT_ICON: &str = "🚨";

const ICONS: &[(&str, &str)] = &[
    ("ירי רקטות וטילים", "🚀"),
    ("חדירת כלי טיס עוין", "✈︎"),
];

/// Pick the presentation icon for an alert title.
pub fn icon_for_title(title: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(known, _)| *known == title)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Render the notification text for an incident.
///
/// The output targets HTML parse mode, so every interpolated value is escaped.
pub fn format_alert_message<S: AsRef<str>>(
    icon: &str,
    title: &str,
    locations: &[S],
    description: &str,
) -> String {
    let joined = locations
        .iter()
        .map(|loc| escape_html(loc.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "🔴 התרעה מסוג <b>{}</b> {}\nבאזור: {}\n{}",
        escape_html(title),
        icon,
        joined,
        escape_html(description)
    )
}

/// Escape the characters Telegram's HTML parser treats specially.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_table() {
        assert_eq!(icon_for_title("ירי רקטות וטילים"), "🚀");
        assert_eq!(icon_for_title("חדירת כלי טיס עוין"), "✈︎");
        assert_eq!(icon_for_title("רעידת אדמה"), DEFAULT_ICON);
        assert_eq!(icon_for_title(""), DEFAULT_ICON);
    }

    #[test]
    fn test_format_layout() {
        let text = format_alert_message("🚀", "Rockets", &["A", "B"], "Take cover");
        assert_eq!(
            text,
            "🔴 התרעה מסוג <b>Rockets</b> 🚀\nבאזור: A, B\nTake cover"
        );
    }

    #[test]
    fn test_format_is_deterministic() {
        let locations = vec!["תל אביב".to_string(), "חולון".to_string()];
        let first = format_alert_message("🚨", "title", &locations, "desc");
        let second = format_alert_message("🚨", "title", &locations, "desc");
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_format_escapes_markup() {
        let text = format_alert_message("🚨", "<script>", &["A & B"], "1 > 0");
        assert!(text.contains("<b>&lt;script&gt;</b>"));
        assert!(text.contains("A &amp; B"));
        assert!(text.ends_with("1 &gt; 0"));
    }
}
