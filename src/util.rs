pub mod log {
    use std::sync::Once;

    use tracing_subscriber::EnvFilter;

    pub fn init() {
        static ONCE: Once = Once::new();
        ONCE.call_once(|| {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| "trace".into()),
                );

            // This has to be executed in single threaded environment.
            #[cfg(not(test))]
            let result = match tracing_subscriber::fmt::time::OffsetTime::local_rfc_3339() {
                Ok(timer) => tracing::subscriber::set_global_default(
                    builder.with_timer(timer).finish(),
                ),
                Err(_) => tracing::subscriber::set_global_default(builder.finish()),
            };
            #[cfg(test)]
            let result = tracing::subscriber::set_global_default(builder.finish());

            if let Err(e) = result {
                eprintln!("failed to set global default tracing subscriber: {e}");
            }
        })
    }
}
