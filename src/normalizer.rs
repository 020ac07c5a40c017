//! URL canonicalization and redirection rewriting.
//!
//! URLs are parsed with [`Uri`], which keeps the authority exactly as written, so
//! the canonical form preserves case. A `Uri` has no fragment, so the `#fragment`
//! is split off before parsing and appended again after the path and query.
//!
//! Input must already be valid URI text: non-ASCII hosts and raw spaces are
//! rejected as [`UrlError::InvalidUrl`].

use std::{fmt, str::FromStr};

use axum::http::{uri::Authority, Uri};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Transformation applied by [`process`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Strip the query and a single trailing slash
    Canonical,
    /// Force the canonical host, then lowercase everything
    Redirection,
    /// Canonical, then redirection on the re-parsed result
    All,
}

impl FromStr for Operation {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canonical" => Ok(Operation::Canonical),
            "redirection" => Ok(Operation::Redirection),
            "all" => Ok(Operation::All),
            other => Err(UrlError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Canonical => "canonical",
            Operation::Redirection => "redirection",
            Operation::All => "all",
        };
        f.write_str(name)
    }
}

/// Parse `raw` and apply `operation`, using `host` as the redirection target
pub fn process(raw: &str, operation: Operation, host: &str) -> Result<String, UrlError> {
    let (target, fragment) = split_fragment(raw);
    let uri = parse(target)?;

    match operation {
        Operation::Canonical => canonical(&uri, fragment),
        Operation::Redirection => redirect(&uri, fragment, host),
        Operation::All => {
            let cleaned = canonical(&uri, fragment)?;
            let (target, fragment) = split_fragment(&cleaned);
            redirect(&parse(target)?, fragment, host)
        }
    }
}

/// Split at the first `#`; an empty fragment counts as none
fn split_fragment(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('#') {
        Some((target, fragment)) => (target, Some(fragment).filter(|f| !f.is_empty())),
        None => (raw, None),
    }
}

/// Parse an absolute URL; both a scheme and an authority are required
pub fn parse(raw: &str) -> Result<Uri, UrlError> {
    let uri: Uri = raw
        .parse()
        .map_err(|e: axum::http::uri::InvalidUri| UrlError::InvalidUrl(e.to_string()))?;

    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(UrlError::InvalidUrl(format!("{} is not an absolute url", raw)));
    }

    Ok(uri)
}

fn canonical(uri: &Uri, fragment: Option<&str>) -> Result<String, UrlError> {
    let rebuilt = rebuild(uri, authority(uri)?, uri.path())?;
    let serialized = with_fragment(&rebuilt, fragment);

    Ok(serialized
        .strip_suffix('/')
        .map(str::to_string)
        .unwrap_or(serialized))
}

fn redirect(uri: &Uri, fragment: Option<&str>, host: &str) -> Result<String, UrlError> {
    let current = authority(uri)?.as_str();
    // userinfo survives, host and port are replaced
    let target = match current.rfind('@') {
        Some(at) => format!("{}{}", &current[..=at], host),
        None => host.to_string(),
    };

    let target = Authority::from_str(&target).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());

    let rebuilt = rebuild(uri, &target, path_and_query)?;
    Ok(with_fragment(&rebuilt, fragment).to_lowercase())
}

fn with_fragment(uri: &Uri, fragment: Option<&str>) -> String {
    match fragment {
        Some(fragment) => format!("{}#{}", uri, fragment),
        None => uri.to_string(),
    }
}

fn authority(uri: &Uri) -> Result<&Authority, UrlError> {
    uri.authority()
        .ok_or_else(|| UrlError::InvalidUrl(format!("{} has no host", uri)))
}

fn rebuild(uri: &Uri, authority: &Authority, path_and_query: &str) -> Result<Uri, UrlError> {
    let scheme = uri
        .scheme_str()
        .ok_or_else(|| UrlError::InvalidUrl(format!("{} has no scheme", uri)))?;

    Uri::builder()
        .scheme(scheme)
        .authority(authority.as_str())
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| UrlError::InvalidUrl(e.to_string()))
}
