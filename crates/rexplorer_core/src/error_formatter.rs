use crate::ExplorerError;

/// Formatted error with structured information for display.
#[derive(Debug, Clone, Default)]
pub struct FormattedError {
    /// Primary error message.
    pub message: String,

    /// Additional detail about the error (e.g. the raw server reply).
    pub detail: Option<String>,

    /// Suggestion for how to fix the error.
    pub hint: Option<String>,
}

impl FormattedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Convert to a single-line display string.
    pub fn to_display_string(&self) -> String {
        let mut parts = vec![self.message.clone()];

        if let Some(ref detail) = self.detail {
            parts.push(format!("Detail: {}", detail));
        }

        if let Some(ref hint) = self.hint {
            parts.push(format!("Hint: {}", hint));
        }

        parts.join(". ")
    }

    /// Convert to ExplorerError::QueryFailed.
    pub fn into_query_error(self) -> ExplorerError {
        ExplorerError::QueryFailed(self.to_display_string())
    }

    /// Convert to ExplorerError::ConnectionFailed.
    pub fn into_connection_error(self) -> ExplorerError {
        ExplorerError::ConnectionFailed(self.to_display_string())
    }
}

/// Formats errors raised while a request is in flight.
pub trait QueryErrorFormatter: Send + Sync {
    fn format_query_error(&self, error: &(dyn std::error::Error + 'static)) -> FormattedError;
}

/// Formats errors raised while opening a connection.
///
/// Separated from `QueryErrorFormatter` because connection errors need the
/// target address to be useful.
pub trait ConnectionErrorFormatter: Send + Sync {
    fn format_connection_error(
        &self,
        error: &(dyn std::error::Error + 'static),
        host: &str,
        port: u16,
    ) -> FormattedError;

    /// The URI must already be sanitized.
    fn format_uri_error(
        &self,
        error: &(dyn std::error::Error + 'static),
        sanitized_uri: &str,
    ) -> FormattedError;
}

/// Sanitize a connection URI by removing credentials.
///
/// Returns a safe-to-display version of the URI with password replaced by `***`.
pub fn sanitize_uri(uri: &str) -> String {
    let Some((authority, rest)) = uri.rsplit_once('@') else {
        return uri.to_string();
    };

    let scheme_end = authority.find("://").map(|pos| pos + 3).unwrap_or(0);
    let (scheme, credentials) = authority.split_at(scheme_end);

    match credentials.split_once(':') {
        Some((user, _)) => format!("{}{}:***@{}", scheme, user, rest),
        None => format!("{}{}@{}", scheme, credentials, rest),
    }
}
