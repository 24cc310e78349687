//! Host-label tenant resolution. Pure classification over the inbound
//! `Host` header and path; the server layer turns decisions into actual
//! redirects, rewrites and cookies.

use crate::registry::TenantRegistry;

/// Internal addressing prefix. Requests are rewritten to
/// `/t/{tenant}/...` after resolution; the prefix must never appear in
/// a user-visible URL.
pub const INTERNAL_PREFIX: &str = "/t/";

/// Global recovery page for unknown tenant labels.
pub const TENANT_NOT_FOUND_PATH: &str = "/tenant-not-found";

/// Session cookie carrying the demo role selection.
pub const ROLE_MARKER: &str = "demo_role";
pub const DEFAULT_ROLE_MARKER: &str = "admin";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Leave the request alone.
    Passthrough,
    /// No tenant label on the host; send the caller to the default
    /// tenant's subdomain, same path.
    RedirectToDefaultTenant { authority: String, path: String },
    /// Label not in the allow-list; the offending label and origin path
    /// ride along as query parameters for the recovery page.
    RedirectTenantNotFound { tenant: String, from: String },
    /// The internal prefix leaked into a public URL; bounce back to the
    /// canonical public path.
    RedirectToPublicPath { public_path: String },
    /// Valid tenant; address the request under its namespace.
    RewriteToTenant { tenant: String, internal_path: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub decision: RouteDecision,
    /// Plant the default role marker unless one is already present.
    /// Never set for static/API traffic.
    pub ensure_role_marker: bool,
}

fn is_static_path(path: &str) -> bool {
    path.starts_with("/api/")
        || path.starts_with("/assets/")
        || path == "/favicon.ico"
        || path == "/robots.txt"
        || path == "/sitemap.xml"
        || path.contains('.')
}

fn is_ip_hostname(hostname: &str) -> bool {
    let v4 = {
        let parts: Vec<&str> = hostname.split('.').collect();
        parts.len() == 4
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.len() <= 3 && p.chars().all(|c| c.is_ascii_digit()))
    };
    let v6_bracketed = hostname.starts_with('[') && hostname.contains(']');
    let v6_bare = hostname.contains(':')
        && hostname
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == ':');
    v4 || v6_bracketed || v6_bare
}

/// Splits `Host` into hostname and the `:port` suffix (kept verbatim so
/// redirect targets preserve it).
fn split_authority(host: &str) -> (&str, &str) {
    if host.starts_with('[') {
        if let Some(end) = host.find(']') {
            return (&host[..=end], &host[end + 1..]);
        }
    }
    match host.split_once(':') {
        Some((hostname, _)) => (hostname, &host[hostname.len()..]),
        None => (host, ""),
    }
}

/// Leading host label, unless the host cannot carry one (localhost, IP
/// literal, single label).
fn tenant_label(hostname: &str) -> Option<&str> {
    if hostname == "localhost" || is_ip_hostname(hostname) {
        return None;
    }
    let (label, rest) = hostname.split_once('.')?;
    if rest.is_empty() {
        return None;
    }
    Some(label)
}

/// Strips `/t/{segment}` and returns the remaining public path.
fn public_path(path: &str) -> String {
    let rest = &path[INTERNAL_PREFIX.len()..];
    match rest.split_once('/') {
        Some((_, tail)) => format!("/{tail}"),
        None => "/".to_string(),
    }
}

/// Total and pure: every (host, path) pair maps to exactly one
/// decision, with no I/O and no failure mode.
pub fn resolve(registry: &TenantRegistry, host: &str, path: &str) -> Resolution {
    if is_static_path(path) {
        return Resolution {
            decision: RouteDecision::Passthrough,
            ensure_role_marker: false,
        };
    }
    if path == TENANT_NOT_FOUND_PATH {
        return Resolution {
            decision: RouteDecision::Passthrough,
            ensure_role_marker: true,
        };
    }

    let (hostname, port) = split_authority(host);
    let decision = match tenant_label(hostname) {
        None => RouteDecision::RedirectToDefaultTenant {
            authority: format!("{}.{hostname}{port}", registry.default_tenant()),
            path: path.to_string(),
        },
        Some(label) if !registry.is_tenant(label) => RouteDecision::RedirectTenantNotFound {
            tenant: label.to_string(),
            from: path.to_string(),
        },
        Some(label) => {
            if path.starts_with(INTERNAL_PREFIX) {
                RouteDecision::RedirectToPublicPath {
                    public_path: public_path(path),
                }
            } else {
                // "/" rewrites to "/t/{label}" with no trailing slash so
                // the tenant root stays addressable.
                let internal_path = if path == "/" {
                    format!("/t/{label}")
                } else {
                    format!("/t/{label}{path}")
                };
                RouteDecision::RewriteToTenant {
                    tenant: label.to_string(),
                    internal_path,
                }
            }
        }
    };
    Resolution {
        decision,
        ensure_role_marker: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_splitting_keeps_ports() {
        assert_eq!(split_authority("acme.localhost:3000"), ("acme.localhost", ":3000"));
        assert_eq!(split_authority("localhost"), ("localhost", ""));
        assert_eq!(split_authority("[::1]:3000"), ("[::1]", ":3000"));
    }

    #[test]
    fn ip_literals_carry_no_tenant() {
        assert!(is_ip_hostname("127.0.0.1"));
        assert!(is_ip_hostname("[::1]"));
        assert!(is_ip_hostname("fe80::1"));
        assert!(!is_ip_hostname("acme.localhost"));
        assert!(!is_ip_hostname("example.com"));
    }

    #[test]
    fn internal_prefix_is_stripped_to_public() {
        assert_eq!(public_path("/t/acme/dashboard"), "/dashboard");
        assert_eq!(public_path("/t/acme/a/b"), "/a/b");
        assert_eq!(public_path("/t/acme"), "/");
    }
}
