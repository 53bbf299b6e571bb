//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{PaymentConfig, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};

use pixelwall::Trace;
#[cfg(debug_assertions)]
use pixelwall::doc::ApiDoc;
use pixelwall::inbound::http::configure_routes;
use pixelwall::inbound::http::health::{HealthState, live, ready};
use pixelwall::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let cors = DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*"));

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors)
        .wrap(Trace)
        .configure(configure_routes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the adapters cannot be built or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    if config.db_pool.is_none() {
        health_state.mark_volatile_records();
    }
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    fn deps(upload_dir: &std::path::Path) -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("socket address"),
            upload_dir,
        );
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).expect("http state"),
        }
    }

    #[actix_web::test]
    async fn empty_wall_lists_no_pixels() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(deps(dir.path()))).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/pixels").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert!(res.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn pay_without_provider_is_unavailable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(deps(dir.path()))).await;

        let req = test::TestRequest::post()
            .uri("/pay")
            .set_json(serde_json::json!({ "pixels": 10 }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "service_unavailable");
    }

    #[actix_web::test]
    async fn probes_are_mounted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let deps = deps(dir.path());
        deps.health_state.mark_ready();
        let app = test::init_service(build_app(deps)).await;

        for path in ["/health/ready", "/health/live"] {
            let res =
                test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "{path}");
        }
    }
}
