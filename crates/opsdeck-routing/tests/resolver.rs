use opsdeck_routing::prelude::*;

fn registry() -> TenantRegistry {
    TenantRegistry::demo()
}

#[test]
fn valid_tenant_is_rewritten_into_its_namespace() {
    let r = resolve(&registry(), "acme.localhost:3000", "/dashboard");
    assert_eq!(
        r.decision,
        RouteDecision::RewriteToTenant {
            tenant: "acme".into(),
            internal_path: "/t/acme/dashboard".into(),
        }
    );
    assert!(r.ensure_role_marker);
}

#[test]
fn tenant_root_rewrites_without_trailing_slash() {
    let r = resolve(&registry(), "acme.localhost:3000", "/");
    assert_eq!(
        r.decision,
        RouteDecision::RewriteToTenant {
            tenant: "acme".into(),
            internal_path: "/t/acme".into(),
        }
    );
}

#[test]
fn bare_localhost_redirects_to_default_tenant() {
    let r = resolve(&registry(), "localhost:3000", "/dashboard");
    assert_eq!(
        r.decision,
        RouteDecision::RedirectToDefaultTenant {
            authority: "acme.localhost:3000".into(),
            path: "/dashboard".into(),
        }
    );
}

#[test]
fn ip_literals_redirect_to_default_tenant() {
    let r = resolve(&registry(), "127.0.0.1:3000", "/");
    assert!(matches!(
        r.decision,
        RouteDecision::RedirectToDefaultTenant { .. }
    ));
    let r = resolve(&registry(), "[::1]:3000", "/");
    assert!(matches!(
        r.decision,
        RouteDecision::RedirectToDefaultTenant { .. }
    ));
}

#[test]
fn unknown_label_carries_context_to_the_recovery_page() {
    let r = resolve(&registry(), "initech.localhost:3000", "/dashboard");
    assert_eq!(
        r.decision,
        RouteDecision::RedirectTenantNotFound {
            tenant: "initech".into(),
            from: "/dashboard".into(),
        }
    );
}

#[test]
fn leaked_internal_prefix_bounces_to_public_path() {
    let r = resolve(&registry(), "acme.localhost:3000", "/t/acme/dashboard");
    assert_eq!(
        r.decision,
        RouteDecision::RedirectToPublicPath {
            public_path: "/dashboard".into(),
        }
    );
}

#[test]
fn api_and_static_traffic_is_untouched() {
    for path in ["/api/resources", "/favicon.ico", "/robots.txt", "/app.js"] {
        let r = resolve(&registry(), "acme.localhost:3000", path);
        assert_eq!(r.decision, RouteDecision::Passthrough, "path {path}");
        assert!(!r.ensure_role_marker, "path {path}");
    }
}

#[test]
fn recovery_page_passes_through_with_marker() {
    let r = resolve(&registry(), "initech.localhost:3000", "/tenant-not-found");
    assert_eq!(r.decision, RouteDecision::Passthrough);
    assert!(r.ensure_role_marker);
}

#[test]
fn resolution_is_deterministic() {
    let a = resolve(&registry(), "globex.localhost:3000", "/audit");
    let b = resolve(&registry(), "globex.localhost:3000", "/audit");
    assert_eq!(a, b);
}
