use thiserror::Error;

/// Failures while attaching the diagram to the page.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// No element with the given id is present in the document.
	#[error("drawing surface not found: #{0}")]
	NotFound(String),

	/// The browser window or document is unavailable.
	#[error("no browser window or document available")]
	NoDocument,
}

/// A connection policy name that does not match any known policy.
#[derive(Debug, Error)]
#[error("unknown connection policy: {0:?}")]
pub struct ParsePolicyError(pub String);
