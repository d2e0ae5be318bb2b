use crate::settings::{TracingFormat, TracingSettings};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, prelude::*, EnvFilter, Layer};

/// Installs the global subscriber. Logs go to stderr so that command output
/// on stdout stays machine readable.
pub fn init_logs(settings: &TracingSettings) -> Result<(), anyhow::Error> {
    if !settings.enabled {
        return Ok(());
    }

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let stderr_layer: Box<dyn Layer<_> + Sync + Send + 'static> = match settings.format {
        TracingFormat::Default => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        TracingFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(())
}
