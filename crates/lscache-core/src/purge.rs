//! Purge triggers
//!
//! The `purge_by_post` option holds a `.` separated list of tokens naming the
//! kinds of pages purged together with a post.

/// Known purge trigger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurgeTrigger {
	All,
	FrontPage,
	HomePage,
	Author,
	Year,
	Month,
	Date,
	/// Category, tag and taxonomy archives
	Term,
	PostType,
}

impl PurgeTrigger {
	pub const ALL: [PurgeTrigger; 9] = [
		PurgeTrigger::All,
		PurgeTrigger::FrontPage,
		PurgeTrigger::HomePage,
		PurgeTrigger::Author,
		PurgeTrigger::Year,
		PurgeTrigger::Month,
		PurgeTrigger::Date,
		PurgeTrigger::Term,
		PurgeTrigger::PostType,
	];

	pub fn token(&self) -> &'static str {
		match self {
			PurgeTrigger::All => "-",
			PurgeTrigger::FrontPage => "F",
			PurgeTrigger::HomePage => "H",
			PurgeTrigger::Author => "A",
			PurgeTrigger::Year => "Y",
			PurgeTrigger::Month => "M",
			PurgeTrigger::Date => "D",
			PurgeTrigger::Term => "T",
			PurgeTrigger::PostType => "PT",
		}
	}

	pub fn from_token(token: &str) -> Option<Self> {
		PurgeTrigger::ALL.iter().find(|t| t.token() == token).copied()
	}
}

impl AsRef<str> for PurgeTrigger {
	fn as_ref(&self) -> &str {
		self.token()
	}
}

// Canonical ordering is the byte order of the token
impl PartialOrd for PurgeTrigger {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for PurgeTrigger {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.token().cmp(other.token())
	}
}

/// Joins triggers into the raw option value, in canonical order
pub fn join(triggers: &[PurgeTrigger]) -> String {
	let mut sorted = triggers.to_vec();
	sorted.sort();
	sorted.iter().map(PurgeTrigger::token).collect::<Vec<_>>().join(".")
}

/// Parsed purge trigger list
///
/// Tokens are kept verbatim: values written by a newer schema simply never
/// match a known trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeOptions(Vec<Box<str>>);

impl PurgeOptions {
	pub fn parse(raw: &str) -> Self {
		Self(raw.split('.').filter(|t| !t.is_empty()).map(Into::into).collect())
	}

	pub fn contains(&self, token: impl AsRef<str>) -> bool {
		let token = token.as_ref();
		self.0.iter().any(|t| &**t == token)
	}

	pub fn tokens(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|t| &**t)
	}

	/// Known triggers, skipping unrecognized tokens
	pub fn triggers(&self) -> impl Iterator<Item = PurgeTrigger> + '_ {
		self.0.iter().filter_map(|t| PurgeTrigger::from_token(t))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_and_membership() {
		let opts = PurgeOptions::parse("F.A.M");
		assert_eq!(opts.len(), 3);
		assert!(opts.contains("F"));
		assert!(opts.contains(PurgeTrigger::Author));
		assert!(!opts.contains("T"));
		assert!(!opts.contains(PurgeTrigger::PostType));
	}

	#[test]
	fn test_unknown_tokens_pass_through() {
		let opts = PurgeOptions::parse("F.XYZ.PT");
		assert_eq!(opts.tokens().collect::<Vec<_>>(), vec!["F", "XYZ", "PT"]);
		assert_eq!(
			opts.triggers().collect::<Vec<_>>(),
			vec![PurgeTrigger::FrontPage, PurgeTrigger::PostType]
		);
		assert!(opts.contains("XYZ"));
	}

	#[test]
	fn test_empty_segments_are_dropped() {
		assert!(PurgeOptions::parse("").is_empty());
		assert_eq!(PurgeOptions::parse("F..H.").len(), 2);
	}

	#[test]
	fn test_join_sorts_canonically() {
		let raw = join(&[
			PurgeTrigger::FrontPage,
			PurgeTrigger::HomePage,
			PurgeTrigger::Author,
			PurgeTrigger::Month,
			PurgeTrigger::Term,
			PurgeTrigger::PostType,
		]);
		assert_eq!(raw, "A.F.H.M.PT.T");
	}
}

// vim: ts=4
