use actix_web::{web, App, HttpServer};
use backend::config::app::{password_hashing_from_env, security_from_env, ServerConfig};
use backend::config::db::DbKind;
use backend::infra::state::build_state;
use backend::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = ServerConfig::from_env().unwrap_or_else(|e| exit_with(&e));
    let security_config = security_from_env().unwrap_or_else(|e| exit_with(&e));
    let hashing = password_hashing_from_env().unwrap_or_else(|e| exit_with(&e));

    let app_state = match build_state()
        .with_db(DbKind::Postgres)
        .with_security(security_config)
        .with_password_hashing(hashing)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => exit_with(&e),
    };

    info!(host = %server.host, port = server.port, "starting user registry");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}

fn exit_with(err: &backend::AppError) -> ! {
    error!(error = %err, "startup failed");
    eprintln!("startup failed: {err}");
    std::process::exit(1);
}
