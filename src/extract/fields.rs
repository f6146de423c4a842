//! Externally configured JSON field names that drive both traversals.

use serde::{Deserialize, Serialize};

/// Field names and templates the traversals are generic over.
///
/// Every value is an opaque string: used as a map key, a substring needle or a
/// format argument, never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    /// Key holding a candidate's link.
    #[serde(alias = "url")]
    pub url_field: String,
    /// Key holding a candidate's numeric ranking.
    #[serde(alias = "rate")]
    pub rate_field: String,
    /// Key holding the binary-download identifier on a detail page.
    #[serde(alias = "id")]
    pub id_field: String,
    /// Substring a link must contain to count as a downloadable file.
    #[serde(alias = "ext")]
    pub extension_filter: String,
    /// Download link template; the first `%s` receives the resolved identifier.
    #[serde(alias = "download")]
    pub download_url_template: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            url_field: "url".to_string(),
            rate_field: "rate".to_string(),
            id_field: "id".to_string(),
            extension_filter: ".pdf".to_string(),
            download_url_template: String::new(),
        }
    }
}

impl FieldMap {
    /// Build the binary download link for a resolved identifier.
    ///
    /// The first `%s` receives the identifier and `%%` renders as `%`. Any other
    /// `%` sequence, including a second `%s`, is copied as-is.
    pub fn download_url(&self, identifier: &str) -> String {
        let template = &self.download_url_template;
        let mut url = String::with_capacity(template.len() + identifier.len());
        let mut substituted = false;
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                url.push(c);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    url.push('%');
                }
                Some('s') if !substituted => {
                    chars.next();
                    url.push_str(identifier);
                    substituted = true;
                }
                _ => url.push('%'),
            }
        }
        url
    }
}
