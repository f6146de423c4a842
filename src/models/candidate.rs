//! Records mined out of a portal page's embedded JSON.

use serde::Serialize;

/// A downloadable item discovered while walking the page JSON.
///
/// Built transiently per visited node. Only candidates passing
/// [`FileCandidate::is_retained`] make it into a result list, and they are
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileCandidate {
    /// Link found under the configured url field (absolute or relative).
    pub url: String,
    /// Opaque identifier from the node's `id` field, empty when missing.
    pub identifier: String,
    /// Ranking signal from the configured rate field. Numeric values only.
    pub vote_score: Option<i64>,
    /// `YYYY-MM-DD` rendering of the node's epoch-seconds `date` field.
    pub formatted_date: Option<String>,
}

impl FileCandidate {
    /// Retention filter: non-blank url containing the extension filter, and a
    /// non-blank identifier.
    pub fn is_retained(&self, extension_filter: &str) -> bool {
        is_not_blank(&self.url)
            && self.url.contains(extension_filter)
            && is_not_blank(&self.identifier)
    }
}

/// The binary-download identifier resolved from a candidate's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadResolution {
    pub identifier: String,
}

impl DownloadResolution {
    pub fn is_retained(&self) -> bool {
        is_not_blank(&self.identifier)
    }
}

fn is_not_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(url: &str, id: &str) -> FileCandidate {
        FileCandidate {
            url: url.to_string(),
            identifier: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_candidate_retained() {
        assert!(candidate("http://x/f.pdf", "9").is_retained(".pdf"));
    }

    #[test]
    fn test_candidate_rejected_on_extension() {
        assert!(!candidate("http://x/g.txt", "9").is_retained(".pdf"));
    }

    #[test]
    fn test_candidate_rejected_on_blank_fields() {
        assert!(!candidate("http://x/f.pdf", "").is_retained(".pdf"));
        assert!(!candidate("http://x/f.pdf", "   ").is_retained(".pdf"));
        assert!(!candidate("", "9").is_retained(""));
        assert!(!candidate(" \t", "9").is_retained(""));
    }

    #[test]
    fn test_resolution_retained() {
        let resolved = DownloadResolution {
            identifier: "abc".to_string(),
        };
        assert!(resolved.is_retained());
        assert!(!DownloadResolution::default().is_retained());
        assert!(!DownloadResolution {
            identifier: "  ".to_string()
        }
        .is_retained());
    }
}
