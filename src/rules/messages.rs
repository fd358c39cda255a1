//! Localized rule messages

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::DEFAULT_LOCALE;

/// Locale code to message template for one rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    templates: BTreeMap<String, String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the template for a locale
    pub fn insert(&mut self, locale: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(locale.into(), template.into());
    }

    /// Template for exactly this locale
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.templates.get(locale).map(String::as_str)
    }

    /// Template for `locale`, falling back to the default locale, then to the
    /// first locale available. Empty when the rule has no message at all.
    pub fn resolve(&self, locale: &str) -> &str {
        if let Some(template) = self.get(locale) {
            return template;
        }

        let fallback = self
            .get(DEFAULT_LOCALE)
            .or_else(|| self.templates.values().next().map(String::as_str));

        match fallback {
            Some(template) => {
                debug!(locale, "No message for locale, using fallback");
                template
            }
            None => "",
        }
    }

    /// Render the message for `locale` with numeric arguments
    pub fn render(&self, locale: &str, args: &[i64]) -> String {
        format_template(self.resolve(locale), args)
    }
}

/// Substitute `%d` placeholders positionally; `%%` is a literal percent.
/// Placeholders without an argument are left as written.
pub fn format_template(template: &str, args: &[i64]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('d') => {
                chars.next();
                match args.next() {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str("%d"),
                }
            }
            _ => out.push('%'),
        }
    }

    out
}
