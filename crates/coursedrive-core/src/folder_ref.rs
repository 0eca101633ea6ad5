//! Turning a pasted folder link or id into a Drive folder id.
//!
//! Accepted forms:
//! - a bare id: `1AbC_dEf-123`
//! - a folder URL: `https://drive.google.com/drive/folders/<id>` (with or
//!   without a trailing slash, query string or `/u/0/` account segment)
//! - a legacy open URL: `https://drive.google.com/open?id=<id>`

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::FolderRefError;

/// Characters Drive uses in file and folder ids.
static FOLDER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid folder id regex"));

/// Extracts a folder id from user input.
///
/// # Example
///
/// ```
/// use coursedrive_core::parse_folder_ref;
///
/// let id = parse_folder_ref("https://drive.google.com/drive/folders/1AbC?usp=sharing").unwrap();
/// assert_eq!(id, "1AbC");
/// ```
pub fn parse_folder_ref(input: &str) -> Result<String, FolderRefError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FolderRefError::Empty);
    }

    let candidate = if input.contains("drive.google.com") {
        id_from_url(input)?
    } else {
        input.to_string()
    };

    if FOLDER_ID_REGEX.is_match(&candidate) {
        Ok(candidate)
    } else {
        Err(FolderRefError::InvalidId(candidate))
    }
}

fn id_from_url(input: &str) -> Result<String, FolderRefError> {
    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };
    let url = Url::parse(&with_scheme).map_err(|_| FolderRefError::MissingId(input.to_string()))?;

    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "id") {
        return Ok(id.into_owned());
    }

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .filter(|last| !matches!(*last, "folders" | "drive" | "open"))
        .map(String::from)
        .ok_or_else(|| FolderRefError::MissingId(input.to_string()))
}
