//! Server assembly: state, readiness timer, router and listener.

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::health::spawn_readiness_timer;
use crate::http;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the server until the process is terminated.
///
/// The readiness timer starts before the listener is bound so the init delay
/// is measured from startup, not from the first accepted connection.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let addr = config.http.socket_addr().await?;
    let init_delay = config.readiness.init_delay;

    tracing::info!(
        namespace = %config.kubernetes.namespace,
        node = %config.kubernetes.node,
        pod = %config.kubernetes.pod,
        init_delay = ?init_delay,
        kill_code = config.kill.exit_code,
        "Loaded configuration"
    );

    let state = AppState::new(config);
    spawn_readiness_timer(state.health.clone(), init_delay);

    let app = create_router(state);
    http::start_server(app, addr).await?;

    Ok(())
}
