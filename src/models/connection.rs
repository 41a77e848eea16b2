use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Standard PostgreSQL port, used when the URL carries no explicit port.
pub const DEFAULT_PORT: u16 = 5432;

/// SSL mode applied when the URL has no `sslmode` query parameter.
pub const DEFAULT_SSL_MODE: &str = "prefer";

/// Structured form of a PostgreSQL connection URL.
///
/// Produced once by [`crate::url::decompose`] and treated as immutable from
/// then on; the prober only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    /// Host from the URL authority. May be empty; an empty host fails at
    /// probe time, not at parse time.
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Never serialized; the report layer masks it for display.
    #[serde(skip)]
    pub password: Option<String>,
    pub ssl_mode: String,
    /// Raw query parameters in URL order. A repeated key keeps every value,
    /// in order.
    pub query_params: IndexMap<String, Vec<String>>,
    /// The untouched input string, retained for audit. Redacted on the way
    /// out: serialization and display go through [`redact_url`].
    #[serde(serialize_with = "serialize_redacted")]
    pub original_url: String,
    pub parsed_at: DateTime<Local>,
}

impl ConnectionInfo {
    /// Password masked for display, one `*` per character.
    pub fn masked_password(&self) -> String {
        match &self.password {
            Some(p) => "*".repeat(p.chars().count()),
            None => "None".to_string(),
        }
    }

    /// Original URL with any userinfo password hidden.
    pub fn redacted_url(&self) -> String {
        redact_url(&self.original_url)
    }
}

/// Hide the password portion of a URL's userinfo, leaving everything else
/// intact.
pub fn redact_url(url: &str) -> String {
    if let Some(scheme_end) = url.find("://") {
        let rest = &url[scheme_end + 3..];
        if let Some(at) = rest.find('@') {
            let userinfo = &rest[..at];
            if let Some(colon) = userinfo.find(':') {
                return format!(
                    "{}{}:[hidden]{}",
                    &url[..scheme_end + 3],
                    &userinfo[..colon],
                    &rest[at..]
                );
            }
        }
    }
    url.to_string()
}

fn serialize_redacted<S: Serializer>(url: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&redact_url(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_hides_only_the_password() {
        assert_eq!(
            redact_url("postgresql://alice:secret@db:6543/orders?sslmode=require"),
            "postgresql://alice:[hidden]@db:6543/orders?sslmode=require"
        );
        assert_eq!(
            redact_url("postgres://bob@localhost/"),
            "postgres://bob@localhost/"
        );
        assert_eq!(redact_url("postgres://localhost/db"), "postgres://localhost/db");
    }
}
