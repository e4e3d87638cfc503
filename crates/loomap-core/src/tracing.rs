use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset; database drivers are noisy at `info`.
const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the JSON stdout subscriber. Call once at service startup; later calls are
/// ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().flatten_event(true))
        .try_init();
}
