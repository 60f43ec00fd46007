/// An offset window over the filtered, sorted result. The cursor is only meaningful for the
/// filter and sort it was issued under.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
	pub cursor: usize,
	pub limit: usize,
}
impl PageRequest {
	pub fn new(cursor: usize, limit: usize) -> Self {
		Self { cursor, limit: limit.max(1) }
	}
}
impl Default for PageRequest {
	fn default() -> Self {
		Self::new(0, 20)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub next_cursor: Option<usize>,
}

pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
	let total = items.len();
	let end = request.cursor.saturating_add(request.limit);
	let next_cursor = (end < total).then_some(end);
	let items = items.into_iter().skip(request.cursor).take(request.limit).collect();

	Page { items, next_cursor }
}
