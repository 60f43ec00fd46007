use std::cmp::Ordering;

use crate::content::MergedItem;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortField {
	#[default]
	Date,
	Score,
	/// Anything else the caller asked for. Compares equal, so only the id tie-break applies.
	Unrecognized,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
	Asc,
	#[default]
	Desc,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SortSpec {
	pub field: SortField,
	pub direction: SortDirection,
}
impl SortSpec {
	/// Parses `"field:direction"`. An absent or blank value means `date:desc`; a field without a
	/// direction sorts descending.
	pub fn parse(raw: Option<&str>) -> Self {
		let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
			return Self::default();
		};
		let (field, direction) = raw.split_once(':').unwrap_or((raw, ""));
		let field = match field.trim().to_ascii_lowercase().as_str() {
			"date" => SortField::Date,
			"score" => SortField::Score,
			_ => SortField::Unrecognized,
		};
		let direction = match direction.trim().to_ascii_lowercase().as_str() {
			"asc" => SortDirection::Asc,
			_ => SortDirection::Desc,
		};

		Self { field, direction }
	}

	pub fn compare(&self, a: &MergedItem, b: &MergedItem) -> Ordering {
		let primary = match self.field {
			SortField::Date => a.item.created_at.cmp(&b.item.created_at),
			SortField::Score => a.score.total_cmp(&b.score),
			SortField::Unrecognized => Ordering::Equal,
		};
		let primary = match self.direction {
			SortDirection::Asc => primary,
			SortDirection::Desc => primary.reverse(),
		};

		primary.then_with(|| a.item.id.cmp(&b.item.id))
	}

	pub fn apply(&self, items: &mut [MergedItem]) {
		items.sort_by(|a, b| self.compare(a, b));
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use time::{Duration, macros::datetime};
	use uuid::Uuid;

	use crate::{
		content::{ContentItem, ContentKind, MergedItem},
		sort::{SortDirection, SortField, SortSpec},
	};

	fn merged(id: u128, score: f64, minutes: i64) -> MergedItem {
		let item = ContentItem {
			id: Uuid::from_u128(id),
			kind: ContentKind::Comment,
			title: None,
			body: format!("comment {id}"),
			subreddit_id: Uuid::from_u128(7),
			author_id: None,
			post_id: None,
			raw_score: Some(score),
			sentiment: None,
			created_at: Some(datetime!(2024-03-01 00:00 UTC) + Duration::minutes(minutes)),
			keyword_ids: BTreeSet::new(),
		};

		MergedItem::resolve(item, None)
	}

	fn ids(items: &[MergedItem]) -> Vec<u128> {
		items.iter().map(|item| item.item.id.as_u128()).collect()
	}

	#[test]
	fn parse_defaults_to_date_desc() {
		assert_eq!(SortSpec::parse(None), SortSpec::default());
		assert_eq!(SortSpec::parse(Some("  ")).field, SortField::Date);
		assert_eq!(
			SortSpec::parse(Some("score:ASC")),
			SortSpec { field: SortField::Score, direction: SortDirection::Asc }
		);
		assert_eq!(
			SortSpec::parse(Some("score")),
			SortSpec { field: SortField::Score, direction: SortDirection::Desc }
		);
		assert_eq!(SortSpec::parse(Some("upvotes:asc")).field, SortField::Unrecognized);
	}

	#[test]
	fn equal_primary_values_fall_back_to_id() {
		let mut items = vec![merged(3, 40.0, 0), merged(1, 40.0, 5), merged(2, 40.0, 10)];

		SortSpec::parse(Some("score:desc")).apply(&mut items);

		assert_eq!(ids(&items), vec![1, 2, 3]);

		SortSpec::parse(Some("score:asc")).apply(&mut items);

		assert_eq!(ids(&items), vec![1, 2, 3]);
	}

	#[test]
	fn unrecognized_field_orders_by_id_only() {
		let mut items = vec![merged(2, 90.0, 0), merged(3, 10.0, 30), merged(1, 50.0, 15)];

		SortSpec::parse(Some("comments:desc")).apply(&mut items);

		assert_eq!(ids(&items), vec![1, 2, 3]);
	}

	#[test]
	fn date_direction_flips_primary_order() {
		let mut items = vec![merged(1, 0.0, 10), merged(2, 0.0, 30), merged(3, 0.0, 20)];

		SortSpec::default().apply(&mut items);

		assert_eq!(ids(&items), vec![2, 3, 1]);

		SortSpec::parse(Some("date:asc")).apply(&mut items);

		assert_eq!(ids(&items), vec![1, 3, 2]);
	}
}
