use {
    crate::Config,
    std::{io::IsTerminal, sync::Once},
    time::macros::format_description,
    tracing_subscriber::{
        EnvFilter,
        Layer,
        Registry,
        fmt::{
            time::UtcTime,
            writer::{BoxMakeWriter, MakeWriterExt as _},
        },
        prelude::*,
        util::SubscriberInitExt,
    },
};

/// Initializes the global tracing subscriber. The filter in `config` has
/// similar syntax to env_logger, it is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
///
/// Can be called multiple times in a row, later calls are ignored. Useful for
/// tests that start the service more than once per process.
pub fn initialize_reentrant(config: &Config) {
    // The tracing subscriber below is a global object so initializing it again
    // in the same process by a different thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| set_tracing_subscriber(config));
}

fn set_tracing_subscriber(config: &Config) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer(config))
        .with_timer(UtcTime::new(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        )));
    let layer: Box<dyn Layer<Registry> + Send + Sync> = if config.use_json_format {
        layer.json().boxed()
    } else {
        layer.with_ansi(std::io::stdout().is_terminal()).boxed()
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(EnvFilter::new(&config.env_filter)))
        .init();
    tracing::info!(
        filter = %config.env_filter,
        json = config.use_json_format,
        "initialized tracing"
    );
}

fn writer(config: &Config) -> BoxMakeWriter {
    match config.stderr_threshold {
        Some(threshold) => BoxMakeWriter::new(
            std::io::stderr
                .with_max_level(threshold)
                .or_else(std::io::stdout),
        ),
        None => BoxMakeWriter::new(std::io::stdout),
    }
}
