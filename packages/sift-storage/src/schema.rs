pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_keywords.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_keywords.sql")),
				"tables/002_subreddits.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_subreddits.sql")),
				"tables/003_workspace_tracking.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_workspace_tracking.sql")),
				"tables/004_posts.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_posts.sql")),
				"tables/005_comments.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_comments.sql")),
				"tables/006_keyword_links.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_keyword_links.sql")),
				"tables/007_workspace_overrides.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_workspace_overrides.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
