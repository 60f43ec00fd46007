/// Per-workspace engagement status. Stored as a small integer in `-1..=3`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Status {
	Archived,
	#[default]
	NeedsReview,
	ReadyToEngage,
	Engaging,
	Engaged,
}
impl Status {
	pub fn from_code(code: i16) -> Option<Self> {
		match code {
			-1 => Some(Self::Archived),
			0 => Some(Self::NeedsReview),
			1 => Some(Self::ReadyToEngage),
			2 => Some(Self::Engaging),
			3 => Some(Self::Engaged),
			_ => None,
		}
	}

	pub fn code(self) -> i16 {
		match self {
			Self::Archived => -1,
			Self::NeedsReview => 0,
			Self::ReadyToEngage => 1,
			Self::Engaging => 2,
			Self::Engaged => 3,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Archived => "Archived",
			Self::NeedsReview => "Needs Review",
			Self::ReadyToEngage => "Ready to Engage",
			Self::Engaging => "Engaging",
			Self::Engaged => "Engaged",
		}
	}

	pub fn is_archived(self) -> bool {
		matches!(self, Self::Archived)
	}
}

#[cfg(test)]
mod tests {
	use crate::status::Status;

	#[test]
	fn codes_round_trip_through_the_fixed_table() {
		for code in -1..=3 {
			let status = Status::from_code(code).expect("Codes -1..=3 are defined.");

			assert_eq!(status.code(), code);
		}

		assert_eq!(Status::from_code(4), None);
		assert_eq!(Status::from_code(-2), None);
	}

	#[test]
	fn labels_match_dashboard_wording() {
		assert_eq!(Status::from_code(0).map(Status::label), Some("Needs Review"));
		assert_eq!(Status::from_code(1).map(Status::label), Some("Ready to Engage"));
		assert_eq!(Status::default(), Status::NeedsReview);
	}
}
