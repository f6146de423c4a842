//! Human-readable file names for downloaded candidates.

use regex::Regex;
use thiserror::Error;
use url::{ParseError, Url};

use crate::models::FileCandidate;

/// Name used when a candidate's link cannot be turned into a file name.
pub const NO_NAME: &str = "no name";
/// Name used for a blank hyphenated segment.
pub const UNTITLED: &str = "no-name";

/// Why a candidate's link produced no usable name.
#[derive(Debug, Error)]
pub enum FileNameError {
    #[error("invalid link: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("path is not valid UTF-8 once decoded: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("invalid extension pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("URL does not have the expected structure: {0}")]
    Structure(String),
}

/// Convert a hyphen-separated slug to space-separated Title Case.
///
/// `march-report-2024` becomes `March Report 2024`. Blank or absent input
/// yields [`UNTITLED`].
pub fn to_title_case(segment: Option<&str>) -> String {
    let segment = match segment {
        Some(s) if !s.trim().is_empty() => s,
        _ => return UNTITLED.to_string(),
    };

    segment
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Derive `"{Category} - {Title} - {date} - {vote}"` from a candidate.
///
/// The category and title come from the third and fourth path segments of the
/// candidate's link. Any failure is logged and yields [`NO_NAME`].
pub fn derive_file_name(candidate: &FileCandidate, extension: &str) -> String {
    match try_derive_file_name(candidate, extension) {
        Ok(name) => name,
        Err(e @ FileNameError::Structure(_)) => {
            tracing::error!("{}", e);
            NO_NAME.to_string()
        }
        Err(e) => {
            tracing::error!("Error creating file name: {}", e);
            NO_NAME.to_string()
        }
    }
}

fn try_derive_file_name(candidate: &FileCandidate, extension: &str) -> Result<String, FileNameError> {
    let path = decoded_path(&candidate.url)?;
    let segments = path_segments(&path);
    if segments.len() < 4 {
        return Err(FileNameError::Structure(candidate.url.clone()));
    }

    let numbered_extension = Regex::new(&format!("{}\\d+$", regex::escape(extension)))?;
    let category = to_title_case(Some(segments[2]));
    let title = to_title_case(Some(&numbered_extension.replace_all(segments[3], "")));

    Ok(format!(
        "{} - {} - {} - {}",
        category,
        title,
        candidate.formatted_date.as_deref().unwrap_or_default(),
        candidate.vote_score.unwrap_or_default()
    ))
}

/// Percent-decoded path of `link`. Links without a scheme are treated as a
/// bare path, minus any query or fragment.
fn decoded_path(link: &str) -> Result<String, FileNameError> {
    let raw = match Url::parse(link) {
        Ok(url) => url.path().to_string(),
        Err(ParseError::RelativeUrlWithoutBase) => link
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
        Err(e) => return Err(e.into()),
    };
    Ok(urlencoding::decode(&raw)?.into_owned())
}

/// Split on `/`, keeping the leading empty segment of an absolute path and
/// dropping trailing empty ones.
fn path_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split('/').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}
