//! Contact-detail redaction for résumé text.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?[0-9]{1,3}[\s-]?)?(\(?[0-9]{3,5}\)?[\s-]?)?[0-9]{3,4}[\s-]?[0-9]{4}")
        .expect("valid phone regex")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

static WWW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"www\.\S+").expect("valid www regex"));

pub const EMAIL_PLACEHOLDER: &str = "[email removed]";
pub const PHONE_PLACEHOLDER: &str = "[phone removed]";
pub const LINK_PLACEHOLDER: &str = "[link removed]";

/// Redacts emails, phone numbers and links.
///
/// Substitutions run in a fixed order (email, phone, http(s) link, bare
/// `www.` link), each over the output of the previous one. The order is part
/// of the contract: reordering changes what gets redacted.
pub fn anonymize_resume(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = EMAIL_RE.replace_all(text, EMAIL_PLACEHOLDER);
    let text = PHONE_RE.replace_all(&text, PHONE_PLACEHOLDER);
    let text = URL_RE.replace_all(&text, LINK_PLACEHOLDER);
    let text = WWW_RE.replace_all(&text, LINK_PLACEHOLDER);
    text.into_owned()
}
