//! Application factory
//!
//! Builds the actix-web application from prepared state. Both the binary
//! and the integration tests go through [`create_app`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use tracing_actix_web::TracingLogger;

use stazy_shared::config::{CorsConfig, Environment};

use crate::handlers::{json_config, path_config, query_config};
use crate::middleware::{create_cors, JwtAuth, SecurityMiddleware};
use crate::routes::{self, health};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let jwt = JwtAuth::new(state.token_service.clone());

    App::new()
        .app_data(state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        // Middleware order matters: the last wrap runs first
        .wrap(SecurityMiddleware::for_environment(environment))
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(web::scope("/api").configure(|cfg| routes::configure_api(cfg, jwt)))
        .default_service(web::route().to(health::not_found))
}
