pub mod tracing_listener;
