#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Tier {
	Low,
	Medium,
	High,
	Prime,
}
impl Tier {
	/// Thresholds are strict and checked from the top down. Non-finite scores land in `Low`.
	pub fn from_score(score: f64) -> Self {
		if score > 80.0 {
			Self::Prime
		} else if score > 50.0 {
			Self::High
		} else if score > 20.0 {
			Self::Medium
		} else {
			Self::Low
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Prime => "Prime",
			Self::High => "High",
			Self::Medium => "Medium",
			Self::Low => "Low",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"prime" => Some(Self::Prime),
			"high" => Some(Self::High),
			"medium" => Some(Self::Medium),
			"low" => Some(Self::Low),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::tier::Tier;

	#[test]
	fn boundaries_are_strict() {
		assert_eq!(Tier::from_score(81.0), Tier::Prime);
		assert_eq!(Tier::from_score(80.0), Tier::High);
		assert_eq!(Tier::from_score(50.5), Tier::High);
		assert_eq!(Tier::from_score(50.0), Tier::Medium);
		assert_eq!(Tier::from_score(20.0), Tier::Low);
		assert_eq!(Tier::from_score(0.0), Tier::Low);
	}

	#[test]
	fn nan_score_is_low() {
		assert_eq!(Tier::from_score(f64::NAN), Tier::Low);
	}

	#[test]
	fn parse_ignores_case_and_padding() {
		assert_eq!(Tier::parse(" PRIME "), Some(Tier::Prime));
		assert_eq!(Tier::parse("medium"), Some(Tier::Medium));
		assert_eq!(Tier::parse("urgent"), None);
	}
}
