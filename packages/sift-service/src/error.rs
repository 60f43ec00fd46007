pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Not authorized: {message}")]
	NotAuthorized { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Upstream unavailable: {message}")]
	UpstreamUnavailable { message: String },
}
impl From<sift_storage::Error> for Error {
	fn from(err: sift_storage::Error) -> Self {
		match err {
			sift_storage::Error::Sqlx(inner) =>
				Self::UpstreamUnavailable { message: inner.to_string() },
		}
	}
}
