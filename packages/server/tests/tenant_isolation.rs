//! End-to-end tenant isolation through the real router: subdomain
//! resolution, token precedence, fail-closed scoping, and concurrent
//! requests on a multi-threaded runtime.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use autolot_core::{DealershipId, Slug, TenantContext};
use autolot_server::auth::AuthConfig;
use autolot_server::service::SignupRequest;
use autolot_server::{AppConfig, AppState, NetworkModule};

fn test_module() -> NetworkModule {
    NetworkModule::new(AppConfig {
        auth: AuthConfig {
            jwt_secret: "integration-test-secret-0123456789abcdef".to_string(),
            token_ttl_ms: 3_600_000,
        },
        ..AppConfig::default()
    })
    .expect("valid test config")
}

/// Signs up a dealership directly through the service layer and returns
/// its id and a valid admin token.
fn seed_tenant(state: &AppState, slug: &str) -> (DealershipId, String) {
    let response = state
        .auth
        .signup(SignupRequest {
            dealership_name: format!("{slug} motors"),
            slug: slug.to_string(),
            email: format!("owner@{slug}.test"),
            password: "long-enough-password".to_string(),
            full_name: "Seed Owner".to_string(),
        })
        .expect("signup succeeds");
    let id = state
        .dealerships
        .find_by_slug(&Slug::parse(slug).unwrap())
        .expect("dealership exists")
        .id;
    (id, response.token)
}

fn seed_vehicle(state: &AppState, tenant: DealershipId, make: &str) -> Value {
    let mut ctx = TenantContext::new();
    ctx.bind_tenant(tenant);
    let request: autolot_core::model::VehicleRequest = serde_json::from_value(json!({
        "make": make,
        "model": "Test",
        "year": 2022,
        "price": 10000,
        "mileage": 1000,
        "condition": "USED",
        "transmission": "MANUAL",
        "fuelType": "PETROL",
        "bodyType": "SEDAN",
        "exteriorColor": "Red"
    }))
    .unwrap();
    serde_json::to_value(state.vehicles.create(&ctx, request).unwrap()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(host: &str, path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap()
}

fn get_with_token(host: &str, path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::HOST, host)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn known_subdomain_binds_tenant_and_serves_its_inventory() {
    let module = test_module();
    let (acme, _) = seed_tenant(module.state(), "acme");
    seed_vehicle(module.state(), acme, "Toyota");
    let router = module.build_router();

    let (status, body) = send(&router, get("acme.autolot.com", "/api/public/vehicles")).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["make"], "Toyota");
}

#[tokio::test]
async fn unknown_subdomain_short_circuits_with_not_found() {
    let module = test_module();
    seed_tenant(module.state(), "acme");
    let router = module.build_router();

    let (status, body) = send(
        &router,
        get("nosuchslug.autolot.com", "/api/public/vehicles"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("nosuchslug"));

    // A label that could never be a slug is just another unknown tenant.
    let (status, _) = send(
        &router,
        get("bad_label.autolot.com", "/api/public/vehicles"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bare_domain_and_www_pass_through_unbound() {
    let module = test_module();
    seed_tenant(module.state(), "acme");
    let router = module.build_router();

    for host in ["autolot.com", "www.autolot.com", "localhost:8080"] {
        // Health does not touch tenant data and succeeds unbound.
        let (status, _) = send(&router, get(host, "/health")).await;
        assert_eq!(status, StatusCode::OK, "health on {host}");

        // A tenant-scoped route with no binding fails closed: a masked
        // server error, never an unscoped listing.
        let (status, body) = send(&router, get(host, "/api/public/vehicles")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "scoped on {host}");
        assert_eq!(body["message"], "An unexpected error occurred");
    }
}

#[tokio::test]
async fn token_tenant_overrides_subdomain_tenant() {
    let module = test_module();
    let (_acme, _) = seed_tenant(module.state(), "acme");
    let (beta, beta_token) = seed_tenant(module.state(), "beta");
    seed_vehicle(module.state(), beta, "Honda");
    let router = module.build_router();

    // Request arrives on acme's subdomain but carries beta's token: the
    // verified token wins, so the admin listing is beta's.
    let (status, body) = send(
        &router,
        get_with_token("acme.autolot.com", "/api/admin/vehicles", &beta_token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["make"], "Honda");
}

#[tokio::test]
async fn scoped_reads_never_leak_across_tenants() {
    let module = test_module();
    let (acme, acme_token) = seed_tenant(module.state(), "acme");
    let (beta, beta_token) = seed_tenant(module.state(), "beta");
    seed_vehicle(module.state(), acme, "Toyota");
    let beta_vehicle = seed_vehicle(module.state(), beta, "Honda");
    let router = module.build_router();

    let (_, acme_rows) = send(
        &router,
        get_with_token("acme.autolot.com", "/api/admin/vehicles", &acme_token),
    )
    .await;
    assert!(acme_rows
        .as_array()
        .unwrap()
        .iter()
        .all(|v| v["make"] == "Toyota"));

    let (_, beta_rows) = send(
        &router,
        get_with_token("beta.autolot.com", "/api/admin/vehicles", &beta_token),
    )
    .await;
    assert!(beta_rows
        .as_array()
        .unwrap()
        .iter()
        .all(|v| v["make"] == "Honda"));

    // Addressing beta's vehicle id with acme's token reads as absent.
    let beta_id = beta_vehicle["id"].as_str().unwrap();
    let (status, _) = send(
        &router,
        get_with_token(
            "acme.autolot.com",
            &format!("/api/admin/vehicles/{beta_id}"),
            &acme_token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let module = test_module();
    seed_tenant(module.state(), "acme");
    let router = module.build_router();

    // No token at all.
    let (status, _) = send(&router, get("acme.autolot.com", "/api/admin/vehicles")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token degrades to unauthenticated, not a hard failure.
    let (status, _) = send(
        &router,
        get_with_token("acme.autolot.com", "/api/admin/vehicles", "not.a.token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Wrong scheme is ignored entirely.
    let request = Request::builder()
        .uri("/api/admin/vehicles")
        .header(header::HOST, "acme.autolot.com")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The public side of the same tenant still works.
    let (status, _) = send(&router, get("acme.autolot.com", "/api/public/vehicles")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_token_does_not_disturb_subdomain_binding() {
    let module = test_module();
    let (acme, _) = seed_tenant(module.state(), "acme");
    seed_vehicle(module.state(), acme, "Toyota");
    let router = module.build_router();

    // An expired-looking garbage token on a public route: the request
    // proceeds with the subdomain tenant.
    let (status, body) = send(
        &router,
        get_with_token("acme.autolot.com", "/api/public/vehicles", "junk"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_requests_never_observe_each_others_tenant() {
    let module = test_module();
    let (acme, _) = seed_tenant(module.state(), "acme");
    let (beta, _) = seed_tenant(module.state(), "beta");
    seed_vehicle(module.state(), acme, "Toyota");
    seed_vehicle(module.state(), beta, "Honda");
    let router = module.build_router();

    // Interleave many requests for both tenants across pooled worker
    // threads; every response must contain exactly its own tenant's row.
    let mut handles = Vec::new();
    for i in 0..200 {
        let router = router.clone();
        let (host, expected) = if i % 2 == 0 {
            ("acme.autolot.com", "Toyota")
        } else {
            ("beta.autolot.com", "Honda")
        };
        handles.push(tokio::spawn(async move {
            let request = Request::builder()
                .uri("/api/public/vehicles")
                .header(header::HOST, host)
                .body(Body::empty())
                .unwrap();
            let response = router.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let rows: Value = serde_json::from_slice(&bytes).unwrap();
            let rows = rows.as_array().unwrap();
            assert_eq!(rows.len(), 1, "exactly one row for {host}");
            assert_eq!(rows[0]["make"], expected, "row for {host}");
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
}
