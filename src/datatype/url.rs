use url::{Host, Url};

use super::screening::{has_script_tag, has_sql_injection};

pub(super) fn validate(value: &str) -> bool {
    // The parser trims and normalizes, so raw-string checks come first
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    if has_sql_injection(value) || has_script_tag(value) || value.contains("../") {
        return false;
    }

    let Ok(parsed) = Url::parse(value) else {
        return false;
    };
    match parsed.host() {
        // The parser maps IDN hosts to punycode, so the host is checked as written
        Some(Host::Domain(_)) => raw_host(value).is_some_and(is_domain_name),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Host as it appears in `value`, without userinfo or port.
fn raw_host(value: &str) -> Option<&str> {
    let (_, rest) = value.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    Some(host_port.split_once(':').map_or(host_port, |(h, _)| h))
}

/// `[a-zA-Z0-9.-]+` followed by a dot and an alphabetic label of at least two letters.
fn is_domain_name(host: &str) -> bool {
    let Some((name, tld)) = host.rsplit_once('.') else {
        return false;
    };
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
        && tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}
