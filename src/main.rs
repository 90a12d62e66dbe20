mod config;
mod controllers;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::database::DatabaseConfig;
use config::environment::EnvironmentConfig;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 AutoCare - Backend de centros de servicio");
    info!("============================================");

    // Inicializar base de datos
    let db_config = DatabaseConfig::default();
    let pool = match db_config.create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Aplicar migraciones
    if let Err(e) = DatabaseConfig::run_migrations(&pool).await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }
    info!("✅ Migraciones aplicadas");

    // Crear router de la API
    let app_state = AppState::new(pool, EnvironmentConfig::default());

    let protected = Router::new()
        .nest("/api/auth", routes::auth_routes::create_me_router())
        .nest("/api/center", routes::center_routes::create_center_router())
        .nest("/api/employee", routes::employee_routes::create_employee_router())
        .nest("/api/shift", routes::shift_routes::create_shift_router())
        .nest("/api/work-center", routes::work_center_routes::create_work_center_router())
        .nest("/api/work-schedule", routes::work_schedule_routes::create_work_schedule_router())
        .layer(from_fn_with_state(app_state.clone(), auth_middleware));

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if app_state.config.is_production() {
        cors_middleware_with_origins(app_state.config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(cors)
        .with_state(app_state.clone());

    // Dirección del servidor
    let addr: SocketAddr = app_state.config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /api/auth/register-admin - Registrar cuenta admin inicial");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Cuenta actual");
    info!("🏢 Endpoints - Service Center:");
    info!("   POST /api/center - Crear centro");
    info!("   GET  /api/center - Listar centros");
    info!("   GET  /api/center/:id - Obtener centro");
    info!("   PUT  /api/center/:id - Actualizar centro");
    info!("   DELETE /api/center/:id - Eliminar centro");
    info!("👥 Endpoints - Employee:");
    info!("   POST /api/employee - Crear empleado");
    info!("   GET  /api/employee - Listar empleados");
    info!("   GET  /api/employee/:id - Obtener empleado");
    info!("   PUT  /api/employee/:id - Actualizar empleado");
    info!("   DELETE /api/employee/:id - Eliminar empleado");
    info!("⏰ Endpoints - Shift:");
    info!("   POST /api/shift - Crear turno");
    info!("   GET  /api/shift - Listar turnos");
    info!("   GET  /api/shift/:id - Obtener turno");
    info!("   PUT  /api/shift/:id - Actualizar turno");
    info!("   DELETE /api/shift/:id - Eliminar turno");
    info!("📍 Endpoints - Work Center:");
    info!("   POST /api/work-center - Asignar empleado a centro");
    info!("   GET  /api/work-center - Listar asignaciones");
    info!("   GET  /api/work-center/:id - Obtener asignación");
    info!("   PUT  /api/work-center/:id - Actualizar asignación");
    info!("   DELETE /api/work-center/:id - Finalizar asignación (baja lógica)");
    info!("📅 Endpoints - Work Schedule:");
    info!("   POST /api/work-schedule - Asignar empleados a un turno/fecha");
    info!("   POST /api/work-schedule/generate - Expandir recurrencia de un turno");
    info!("   GET  /api/work-schedule - Listar horarios");
    info!("   PUT  /api/work-schedule/shift/:shift_id/date/:date - Reemplazar asignados");
    info!("   DELETE /api/work-schedule/:id - Eliminar asignación");

    // Iniciar servidor
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "autocare-backend",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
