use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::RunEnvironment;

/// Install the global tracing subscriber for `environment`.
///
/// `local` logs human-readable lines at debug level, `dev` logs JSON at debug level
/// and `prod` logs JSON at info level. `RUST_LOG` overrides the default filter.
pub fn init(environment: RunEnvironment) {
    let default_filter = match environment {
        RunEnvironment::Local | RunEnvironment::Dev => "sso_service=debug,tower_http=debug",
        RunEnvironment::Prod => "sso_service=info,tower_http=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);

    match environment {
        RunEnvironment::Local => registry.with(tracing_subscriber::fmt::layer()).init(),
        RunEnvironment::Dev | RunEnvironment::Prod => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
