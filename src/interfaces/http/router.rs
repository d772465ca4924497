//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AdministratorPayload, AdministratorService, TokenIssuer, VehiclePayload, VehicleService,
};
use crate::domain::repositories::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, role_gate, AuthState, RolePolicy};
use crate::interfaces::http::modules::administrators::{self, AdministratorHandlerState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::vehicles::{self, VehicleHandlerState};
use crate::interfaces::http::modules::home;

/// Router state. Handlers extract their own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub administrators: AdministratorService,
    pub vehicles: VehicleService,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            administrators: AdministratorService::new(repos.clone(), bcrypt_cost),
            vehicles: VehicleService::new(repos),
            tokens: TokenIssuer::new(jwt_config),
        }
    }
}

impl FromRef<AppState> for AdministratorHandlerState {
    fn from_ref(s: &AppState) -> Self {
        AdministratorHandlerState {
            service: s.administrators.clone(),
            tokens: s.tokens.clone(),
        }
    }
}

impl FromRef<AppState> for VehicleHandlerState {
    fn from_ref(s: &AppState) -> Self {
        VehicleHandlerState {
            service: s.vehicles.clone(),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            tokens: s.tokens.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /administrators/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        home::home,
        // Administrators
        administrators::login,
        administrators::list_administrators,
        administrators::get_administrator,
        administrators::create_administrator,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
    ),
    components(
        schemas(
            ApiResponse<String>,
            home::HomeInfo,
            administrators::AdministratorDto,
            administrators::LoginRequest,
            administrators::LoginResponse,
            AdministratorPayload,
            vehicles::VehicleDto,
            VehiclePayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Home", description = "Service information"),
        (name = "Administrators", description = "Login and administrator management (ADMIN only)"),
        (name = "Vehicles", description = "Vehicle registry: reads and creation for ADMIN and EDITOR, changes for ADMIN"),
    ),
    info(
        title = "Vehicle Registry API",
        version = "1.0.0",
        description = "Administrator login and role-gated vehicle registry"
    )
)]
pub struct ApiDoc;

/// Wrap a method router in authentication plus a role check.
/// Authentication is the outer layer, so it runs first.
fn guarded(route: MethodRouter<AppState>, auth: &AuthState, policy: RolePolicy) -> MethodRouter<AppState> {
    route
        .route_layer(middleware::from_fn_with_state(policy, role_gate))
        .route_layer(middleware::from_fn_with_state(auth.clone(), auth_middleware))
}

/// Create the API router with all routes.
///
/// `metrics` mounts `GET /metrics` when a Prometheus recorder is installed.
pub fn create_api_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let auth = AuthState::from_ref(&state);

    let administrator_routes = Router::new()
        .route("/login", post(administrators::login))
        .route(
            "/",
            guarded(
                get(administrators::list_administrators).post(administrators::create_administrator),
                &auth,
                RolePolicy::ADMIN_ONLY,
            ),
        )
        .route(
            "/{id}",
            guarded(
                get(administrators::get_administrator),
                &auth,
                RolePolicy::ADMIN_ONLY,
            ),
        );

    let vehicle_routes = Router::new()
        .route(
            "/",
            guarded(
                get(vehicles::list_vehicles).post(vehicles::create_vehicle),
                &auth,
                RolePolicy::STAFF,
            ),
        )
        .route(
            "/{id}",
            guarded(get(vehicles::get_vehicle), &auth, RolePolicy::STAFF).merge(guarded(
                axum::routing::put(vehicles::update_vehicle).delete(vehicles::delete_vehicle),
                &auth,
                RolePolicy::ADMIN_ONLY,
            )),
        );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .route("/", get(home::home))
        .nest("/administrators", administrator_routes)
        .nest("/vehicles", vehicle_routes)
        .with_state(state)
        .merge(swagger_routes);

    if let Some(handle) = metrics {
        router = router.route(
            "/metrics",
            get(prometheus_metrics).with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, Response, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::{NewVehicle, Role};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    const TEST_COST: u32 = 4;

    struct TestApp {
        router: Router,
        state: AppState,
    }

    impl TestApp {
        async fn new() -> Self {
            let repos = Arc::new(InMemoryRepositoryProvider::new());
            let state = AppState::new(
                repos,
                JwtConfig::new("router-test-secret-0123456789abcdef", 24),
                TEST_COST,
            );
            state
                .administrators
                .create("adm@fleet.io", "123456", Some(Role::Admin))
                .await
                .unwrap();
            state
                .administrators
                .create("ed@fleet.io", "abcdef", Some(Role::Editor))
                .await
                .unwrap();

            Self {
                router: create_api_router(state.clone(), None),
                state,
            }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> Response<Body> {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };
            self.router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap()
        }

        async fn token(&self, email: &str, password: &str) -> String {
            let resp = self
                .send(
                    Method::POST,
                    "/administrators/login",
                    None,
                    Some(json!({"email": email, "password": password})),
                )
                .await;
            assert_eq!(resp.status(), StatusCode::OK);
            read_json(resp).await["data"]["token"]
                .as_str()
                .unwrap()
                .to_string()
        }

        async fn admin_token(&self) -> String {
            self.token("adm@fleet.io", "123456").await
        }

        async fn editor_token(&self) -> String {
            self.token("ed@fleet.io", "abcdef").await
        }
    }

    async fn read_json(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn home_is_public() {
        let app = TestApp::new().await;
        let resp = app.send(Method::GET, "/", None, None).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        let body = read_json(resp).await;
        assert_eq!(body["data"]["docs"], "/docs");
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let app = TestApp::new().await;
        let req = Request::builder()
            .uri("/")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn login_returns_token_and_identity() {
        let app = TestApp::new().await;
        let resp = app
            .send(
                Method::POST,
                "/administrators/login",
                None,
                Some(json!({"email": "adm@fleet.io", "password": "123456"})),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["administrator"]["role"], "ADMIN");
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert!(body["data"]["administrator"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::new().await;

        let wrong_password = app
            .send(
                Method::POST,
                "/administrators/login",
                None,
                Some(json!({"email": "adm@fleet.io", "password": "nope"})),
            )
            .await;
        let unknown_email = app
            .send(
                Method::POST,
                "/administrators/login",
                None,
                Some(json!({"email": "ghost@fleet.io", "password": "123456"})),
            )
            .await;

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(wrong_password).await, read_json(unknown_email).await);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = TestApp::new().await;

        for uri in ["/vehicles", "/vehicles/1", "/administrators", "/administrators/1"] {
            let resp = app.send(Method::GET, uri, None, None).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }

        let resp = app
            .send(Method::GET, "/vehicles", Some("not-a-token"), None)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn editor_is_kept_out_of_admin_routes() {
        let app = TestApp::new().await;
        let token = app.editor_token().await;
        let vehicle = app
            .state
            .vehicles
            .create(NewVehicle::new("Fiat", "Uno", 1990))
            .await
            .unwrap();
        let path = format!("/vehicles/{}", vehicle.id);

        let resp = app.send(Method::GET, "/administrators", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = app.send(Method::DELETE, &path, Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = app
            .send(
                Method::PUT,
                &path,
                Some(&token),
                Some(json!({"brand": "Fiat", "model": "Palio", "year": 2000})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = app.send(Method::GET, &path, Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app.send(Method::GET, "/vehicles", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn editor_can_create_vehicles() {
        let app = TestApp::new().await;
        let token = app.editor_token().await;

        let resp = app
            .send(
                Method::POST,
                "/vehicles",
                Some(&token),
                Some(json!({"brand": "Toyota", "model": "Corolla", "year": 2020})),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
        let body = read_json(resp).await;
        assert_eq!(location, format!("/vehicles/{}", body["data"]["id"]));
        assert_eq!(body["data"]["brand"], "Toyota");
    }

    #[tokio::test]
    async fn invalid_vehicle_lists_every_message() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let resp = app
            .send(
                Method::POST,
                "/vehicles",
                Some(&token),
                Some(json!({"brand": "", "year": 1949})),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let req = Request::builder()
            .method(Method::POST)
            .uri("/vehicles")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_checks_existence_before_payload() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let resp = app
            .send(
                Method::PUT,
                "/vehicles/999",
                Some(&token),
                Some(json!({"brand": "", "model": "", "year": 1900})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let vehicle = app
            .state
            .vehicles
            .create(NewVehicle::new("Fiat", "Uno", 1990))
            .await
            .unwrap();
        let path = format!("/vehicles/{}", vehicle.id);

        let resp = app
            .send(
                Method::PUT,
                &path,
                Some(&token),
                Some(json!({"brand": "", "model": "", "year": 1900})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = app
            .send(
                Method::PUT,
                &path,
                Some(&token),
                Some(json!({"brand": "Fiat", "model": "Palio", "year": 2001})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["data"]["model"], "Palio");
        assert_eq!(body["data"]["id"], vehicle.id);
    }

    #[tokio::test]
    async fn delete_returns_204_then_404() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;
        let vehicle = app
            .state
            .vehicles
            .create(NewVehicle::new("Fiat", "Uno", 1990))
            .await
            .unwrap();
        let path = format!("/vehicles/{}", vehicle.id);

        let resp = app.send(Method::DELETE, &path, Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app.send(Method::DELETE, &path, Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app.send(Method::GET, &path, Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn vehicle_list_filters_and_paginates() {
        let app = TestApp::new().await;
        let token = app.editor_token().await;
        for i in 0..12 {
            app.state
                .vehicles
                .create(NewVehicle::new("Toyota", format!("T{i}"), 2010))
                .await
                .unwrap();
        }
        app.state
            .vehicles
            .create(NewVehicle::new("Honda", "Civic", 2018))
            .await
            .unwrap();

        let resp = app
            .send(Method::GET, "/vehicles?brand=toy&page=2", Some(&token), None)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let resp = app
            .send(Method::GET, "/vehicles?model=civ", Some(&token), None)
            .await;
        let body = read_json(resp).await;
        assert_eq!(body["data"][0]["brand"], "Honda");

        let resp = app.send(Method::GET, "/vehicles", Some(&token), None).await;
        let body = read_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 13);

        let resp = app
            .send(
                Method::GET,
                "/vehicles?page=18446744073709551615",
                Some(&token),
                None,
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_creates_administrators() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let resp = app
            .send(
                Method::POST,
                "/administrators",
                Some(&token),
                Some(json!({"email": "new@fleet.io", "password": "pw", "role": "editor"})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = read_json(resp).await;
        assert_eq!(body["data"]["role"], "EDITOR");
        let id = body["data"]["id"].as_i64().unwrap();

        let resp = app
            .send(Method::GET, &format!("/administrators/{id}"), Some(&token), None)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .send(
                Method::POST,
                "/administrators",
                Some(&token),
                Some(json!({"email": "new@fleet.io", "password": "pw", "role": "ADMIN"})),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = app
            .send(Method::GET, "/administrators/999", Some(&token), None)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn administrator_payload_without_fields_is_400() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;

        let resp = app
            .send(Method::POST, "/administrators", Some(&token), Some(json!({})))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let messages = read_json(resp).await["messages"].clone();
        let messages: Vec<String> = serde_json::from_value(messages).unwrap();
        assert!(messages.iter().any(|m| m.contains("email")));
        assert!(messages.iter().any(|m| m.contains("password")));
        assert!(messages.iter().any(|m| m.contains("role")));
    }

    #[tokio::test]
    async fn administrator_list_paginates() {
        let app = TestApp::new().await;
        let token = app.admin_token().await;
        for i in 0..13 {
            app.state
                .administrators
                .create(&format!("user{i}@fleet.io"), "pw", None)
                .await
                .unwrap();
        }

        let resp = app
            .send(Method::GET, "/administrators?page=2", Some(&token), None)
            .await;
        let body = read_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = TestApp::new().await;
        let resp = app.send(Method::GET, "/api-doc/openapi.json", None, None).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let doc = read_json(resp).await;
        assert!(doc["paths"].get("/vehicles/{id}").is_some());
        assert!(doc["components"]["securitySchemes"].get("bearer_auth").is_some());
    }
}
