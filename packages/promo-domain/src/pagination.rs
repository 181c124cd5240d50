use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: u32 = 20;

/// A resolved page of a listing. `number` is always within `1..=num_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
	pub number: u32,
	pub num_pages: u32,
	pub count: u64,
}
impl PageWindow {
	pub fn offset(&self) -> i64 {
		i64::from(self.number - 1) * i64::from(PAGE_SIZE)
	}

	pub fn limit(&self) -> i64 {
		i64::from(PAGE_SIZE)
	}

	pub fn has_previous(&self) -> bool {
		self.number > 1
	}

	pub fn has_next(&self) -> bool {
		self.number < self.num_pages
	}
}

/// An empty result set still has one (empty) page.
pub fn num_pages(count: u64) -> u32 {
	if count == 0 {
		return 1;
	}

	u32::try_from(count.div_ceil(u64::from(PAGE_SIZE))).unwrap_or(u32::MAX)
}

/// Parses a requested page number. Anything other than a positive integer yields `None`.
pub fn parse_page_number(raw: Option<&str>) -> Option<u32> {
	let value = raw?.trim();

	if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	// Digit strings too large for u32 still name a page past the end.
	let number = value.parse::<u32>().unwrap_or(u32::MAX);

	if number == 0 { None } else { Some(number) }
}

/// Clamps a requested page into range. Invalid requests resolve to page 1 and requests beyond
/// the end resolve to the last page.
pub fn resolve_page(raw: Option<&str>, count: u64) -> PageWindow {
	let num_pages = num_pages(count);
	let number = parse_page_number(raw).unwrap_or(1).min(num_pages);

	PageWindow { number, num_pages, count }
}
