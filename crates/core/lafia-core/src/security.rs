//! Scrubbing of credentials before text reaches logs

use once_cell::sync::Lazy;
use regex::Regex;

static PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"AIza[0-9A-Za-z_\-]{30,}", "AIza-REDACTED"),
        (r"sk-[A-Za-z0-9]{20,}", "sk-REDACTED"),
        (r"([?&]key=)[^&\s]+", "${1}REDACTED"),
        (
            r"(?i)(x-goog-api-key|api[_-]?key)(\s*[:=]\s*)[A-Za-z0-9_\-]{12,}",
            "${1}${2}REDACTED",
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
        Ok(re) => Some((re, replacement)),
        Err(e) => {
            tracing::error!("Invalid redaction pattern {}: {}", pattern, e);
            None
        }
    })
    .collect()
});

/// Replace anything that looks like an API key with a marker
pub fn redact_secrets(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in PATTERNS.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    out
}
