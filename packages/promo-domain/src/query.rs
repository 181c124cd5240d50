//! Query string identity rules.
//!
//! Two raw search strings map to the same stored query when they normalize to the same text, so
//! "Shoes!" and "  shoes " share one set of promotions.

pub const MAX_QUERY_CHARS: usize = 255;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const NO_SEARCH_TERMS_MESSAGE: &str = "Enter a search term containing letters or numbers.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStringError {
	Required,
	TooLong { chars: usize },
	NoSearchTerms,
}
impl QueryStringError {
	pub fn message(&self) -> String {
		match self {
			Self::Required => REQUIRED_MESSAGE.to_string(),
			Self::TooLong { chars } => format!(
				"Ensure this value has at most {MAX_QUERY_CHARS} characters (it has {chars})."
			),
			Self::NoSearchTerms => NO_SEARCH_TERMS_MESSAGE.to_string(),
		}
	}
}

/// Maps a raw search string onto its canonical stored form.
pub fn normalize_query_string(raw: &str) -> String {
	let truncated: String = raw.chars().take(MAX_QUERY_CHARS).collect();
	let lowered = truncated.to_lowercase();
	let stripped: String = lowered.chars().filter(|c| !c.is_ascii_punctuation()).collect();

	stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validates the query form field and returns the normalized query string.
pub fn clean_query_string(raw: &str) -> Result<String, QueryStringError> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return Err(QueryStringError::Required);
	}

	let chars = trimmed.chars().count();

	if chars > MAX_QUERY_CHARS {
		return Err(QueryStringError::TooLong { chars });
	}

	let normalized = normalize_query_string(trimmed);

	if normalized.is_empty() {
		return Err(QueryStringError::NoSearchTerms);
	}

	Ok(normalized)
}
