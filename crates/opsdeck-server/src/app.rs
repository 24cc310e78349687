use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use opsdeck_model::prelude::{Resource, ResourceKind};
use opsdeck_model::validate::is_valid_gateway_port;
use opsdeck_provision::prelude::is_unique_resource_name;
use opsdeck_routing::prelude::ROLE_MARKER;
use opsdeck_types::prelude::{Role, TenantId};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceBuilder;

use crate::error::ApiError;
use crate::middleware::{cookie_value, tenant_resolution};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/api/resources", get(list_resources))
        .route("/api/resources/one", get(get_resource))
        .route("/api/resources/mutate", post(mutate_resource))
        .route("/api/resources/delete", post(delete_resource))
        .route("/api/resources/provision", post(provision_resource))
        .route("/api/audit", get(list_audit))
        .route("/api/demo/role", post(set_demo_role))
        .route("/tenant-not-found", get(tenant_not_found))
        .route("/t/:tenant", get(console_root))
        .route("/t/:tenant/*path", get(console_shell))
        .with_state(state.clone());

    // The resolver must run before route matching so its path rewrite
    // is re-dispatched; hence the wrap instead of `Router::layer`.
    let resolved = ServiceBuilder::new()
        .layer(from_fn_with_state(state, tenant_resolution))
        .service(routes);
    Router::new().fallback_service(resolved)
}

/// The caller's role comes from the session cookie, never the body.
fn actor(headers: &HeaderMap) -> Role {
    Role::from_marker(cookie_value(headers, ROLE_MARKER))
}

fn tenant_param(state: &AppState, slug: &str) -> Result<TenantId, ApiError> {
    if state.registry.is_tenant(slug) {
        Ok(TenantId::from(slug))
    } else {
        Err(ApiError::bad_request(format!("Unknown tenant: {slug}")))
    }
}

fn kind_param(kind: &str) -> Result<ResourceKind, ApiError> {
    ResourceKind::parse(kind)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown resource kind: {kind}")))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Deserialize)]
struct TenantQuery {
    tenant: String,
}

async fn list_resources(
    State(state): State<AppState>,
    Query(q): Query<TenantQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = tenant_param(&state, &q.tenant)?;
    let resources = state.store.list_all(&tenant).await?;
    Ok(Json(json!({ "resources": resources })))
}

#[derive(Deserialize)]
struct OneQuery {
    tenant: String,
    kind: String,
    id: String,
}

async fn get_resource(
    State(state): State<AppState>,
    Query(q): Query<OneQuery>,
) -> Result<Json<Option<Resource>>, ApiError> {
    let tenant = tenant_param(&state, &q.tenant)?;
    let kind = kind_param(&q.kind)?;
    let resource = state.store.get_one(&tenant, kind, &q.id).await?;
    Ok(Json(resource))
}

#[derive(Deserialize)]
struct MutateBody {
    tenant: String,
    kind: String,
    id: String,
    action: String,
    #[serde(default)]
    payload: Value,
}

async fn mutate_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<MutateBody>,
) -> Result<Json<Resource>, ApiError> {
    let tenant = tenant_param(&state, &body.tenant)?;
    let kind = kind_param(&body.kind)?;

    // Rule payloads with an out-of-range port are rejected outright,
    // not clamped.
    if matches!(body.action.as_str(), "addRule" | "editRule") {
        if let Some(port) = body.payload.get("externalPort").and_then(Value::as_i64) {
            if !is_valid_gateway_port(port) {
                return Err(ApiError::validation(
                    "externalPort",
                    "Port must be between 1 and 65535",
                ));
            }
        }
    }

    let updated = state
        .store
        .apply_action(
            &tenant,
            kind,
            &body.id,
            actor(&headers),
            &body.action,
            body.payload,
        )
        .await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
struct DeleteBody {
    tenant: String,
    kind: String,
    id: String,
}

async fn delete_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<DeleteBody>,
) -> Result<Json<Value>, ApiError> {
    let tenant = tenant_param(&state, &body.tenant)?;
    let kind = kind_param(&body.kind)?;
    state
        .store
        .delete_one(&tenant, kind, &body.id, actor(&headers))
        .await?;
    Ok(Json(json!({ "ok": true })))
}

#[derive(Deserialize)]
struct ProvisionBody {
    tenant: String,
    payload: Value,
}

async fn provision_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ProvisionBody>,
) -> Result<Json<Value>, ApiError> {
    let tenant = tenant_param(&state, &body.tenant)?;
    if let Some(name) = body.payload.get("name").and_then(Value::as_str) {
        if !is_unique_resource_name(state.store.as_ref(), &tenant, name).await? {
            return Err(ApiError::conflict(format!("Name already in use: {name}")));
        }
    }
    let outcome = state
        .provisioner
        .provision(&tenant, actor(&headers), body.payload)
        .await?;
    Ok(Json(json!(outcome)))
}

async fn list_audit(
    State(state): State<AppState>,
    Query(q): Query<TenantQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = tenant_param(&state, &q.tenant)?;
    let entries = state.store.list_audit(&tenant).await?;
    Ok(Json(json!({ "entries": entries })))
}

#[derive(Deserialize)]
struct RoleBody {
    role: String,
}

async fn set_demo_role(Json(body): Json<RoleBody>) -> Result<impl IntoResponse, ApiError> {
    if !matches!(body.role.as_str(), "admin" | "viewer") {
        return Err(ApiError::bad_request(format!("Unknown role: {}", body.role)));
    }
    let cookie = format!("{ROLE_MARKER}={}; Path=/; SameSite=Lax", body.role);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "role": body.role })),
    ))
}

#[derive(Deserialize)]
struct NotFoundQuery {
    #[serde(default)]
    tenant: Option<String>,
    #[serde(default)]
    from: Option<String>,
}

async fn tenant_not_found(Query(q): Query<NotFoundQuery>) -> impl IntoResponse {
    Json(json!({
        "error": "Tenant not found",
        "tenant": q.tenant,
        "from": q.from,
    }))
}

/// Stub for rewritten console paths; proves the internal addressing
/// scheme end to end without a rendering layer behind it.
async fn console_shell(
    State(state): State<AppState>,
    Path((tenant, path)): Path<(String, String)>,
) -> impl IntoResponse {
    shell_body(&state, &tenant, format!("/{path}"))
}

/// Tenant root; the resolver rewrites "/" to "/t/{tenant}" with no
/// trailing slash, which the wildcard route cannot match.
async fn console_root(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
) -> impl IntoResponse {
    shell_body(&state, &tenant, "/".to_string())
}

fn shell_body(state: &AppState, tenant: &str, path: String) -> Json<Value> {
    let display_name = state.registry.display_name(tenant).to_string();
    Json(json!({
        "tenant": tenant,
        "displayName": display_name,
        "path": path,
    }))
}
