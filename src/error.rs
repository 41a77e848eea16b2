use thiserror::Error;

/// The input string is not a syntactically valid URL. Propagated to the CLI,
/// which halts the run; nothing downstream sees a half-parsed result.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid connection URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("connection URL has no authority component")]
    MissingAuthority,
}

/// Probe failures, folded into `ConnectionTestResult::error_message`. The
/// Display prefix is the only category signal the caller gets.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Host {host}:{port} is not reachable")]
    Unreachable { host: String, port: u16 },
    #[error("PostgreSQL error: {0}")]
    Protocol(String),
    #[error("General error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for ProbeError {
    fn from(e: sqlx::Error) -> Self {
        // Server- and TLS-reported failures are protocol-level; I/O,
        // pool-timeout and the rest are generic.
        match e {
            sqlx::Error::Database(_) | sqlx::Error::Tls(_) | sqlx::Error::Protocol(_) => {
                ProbeError::Protocol(e.to_string())
            }
            other => ProbeError::Unknown(other.to_string()),
        }
    }
}

/// Scrub credentials from driver error messages before they reach a report.
pub fn sanitize_error(error: &str) -> String {
    let mut sanitized = error.to_string();

    // Hide the userinfo of any embedded postgres:// connection string.
    if let Some(start) = sanitized.find("postgres://") {
        if let Some(at_pos) = sanitized[start..].find('@') {
            let end = start + at_pos + 1;
            sanitized = format!(
                "{}postgres://[credentials]@{}",
                &sanitized[..start],
                &sanitized[end..]
            );
        }
    }

    // Hide password= parameters. The search resumes past each replacement;
    // the replacement text itself contains `password=` and must not be
    // rescanned.
    const REPLACEMENT: &str = "password=[hidden]";
    let mut search_from = 0;
    while let Some(found) = sanitized[search_from..].find("password=") {
        let start = search_from + found;
        let after = &sanitized[start + "password=".len()..];
        let end_offset = after
            .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'' || c == ';')
            .unwrap_or(after.len());
        sanitized = format!(
            "{}{}{}",
            &sanitized[..start],
            REPLACEMENT,
            &after[end_offset..]
        );
        search_from = start + REPLACEMENT.len();
    }

    sanitized
}
