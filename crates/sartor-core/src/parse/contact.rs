//! Contact field extraction.
//!
//! Runs over the whole raw text, not just the header block: some formats
//! put contact data in a document-header region that extractors append at
//! the end of the text flow.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ContactInfo;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,2}[\s.\-]?)?(?:\(\d{3}\)|\d{3})[\s.\-]?\d{3}[\s.\-]?\d{4}").unwrap()
});

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:https?://\S+|www\.\S+|(?:linkedin\.com|github\.com)/\S+)").unwrap()
});

pub fn extract_contact(text: &str) -> ContactInfo {
    let email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());

    let phone = PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| candidate.chars().filter(|c| c.is_ascii_digit()).count() >= 10)
        .map(|s| s.trim().to_string());

    let mut links: Vec<String> = Vec::new();
    for m in LINK_RE.find_iter(text) {
        let link = m
            .as_str()
            .trim_end_matches(|c: char| matches!(c, ',' | ';' | '.' | ')' | ']'))
            .to_string();
        // The email regex wins for anything containing '@'.
        if link.contains('@') {
            continue;
        }
        if !links.iter().any(|l| l.eq_ignore_ascii_case(&link)) {
            links.push(link);
        }
    }

    ContactInfo {
        email,
        phone,
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_phone_in_header() {
        let contact =
            extract_contact("Jane Doe\njane.doe@example.com | (555) 123-4567\nDenver, CO\n");
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_phone_needs_ten_digits() {
        let contact = extract_contact("Call 555-1234 anytime");
        assert_eq!(contact.phone, None);
    }

    #[test]
    fn test_links_collected_and_deduped() {
        let text = "github.com/janedoe\nlinkedin.com/in/janedoe\nGITHUB.com/janedoe\n";
        let contact = extract_contact(text);
        assert_eq!(contact.links.len(), 2);
        assert_eq!(contact.links[0], "github.com/janedoe");
    }

    #[test]
    fn test_https_link() {
        let contact = extract_contact("Portfolio: https://janedoe.dev/work.");
        assert_eq!(contact.links, vec!["https://janedoe.dev/work"]);
    }

    #[test]
    fn test_contact_outside_header_region() {
        let text = "Experience\nAcme Corp\n...\n\nReach me: jd@mail.net, 303.555.0144";
        let contact = extract_contact(text);
        assert_eq!(contact.email.as_deref(), Some("jd@mail.net"));
        assert_eq!(contact.phone.as_deref(), Some("303.555.0144"));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_contact("").is_empty());
    }

    #[test]
    fn test_international_prefix() {
        let contact = extract_contact("+1 555 867 5309");
        assert_eq!(contact.phone.as_deref(), Some("+1 555 867 5309"));
    }
}
