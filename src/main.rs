//! Extract API - HTTP service for document text extraction
//!
//! Accepts document uploads (PDF, Office formats, markup, e-mail and
//! more) and returns the extracted plain text as JSON.

use std::env;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use config::{LogFormat, LogTarget};
use extract_api::{api, config, middleware, AppConfig, AppState, ExtractionService, TextCache};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        println!("Extract API {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Check for --write-default-config flag
    if let Some(pos) = args.iter().position(|arg| arg == "--write-default-config") {
        let path = args
            .get(pos + 1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.yaml"));
        AppConfig::create_default_config(&path)
            .with_context(|| format!("Failed to write configuration to {:?}", path))?;
        println!("Wrote default configuration to {:?}", path);
        return Ok(());
    }

    // Load configuration first (before logging, so we know log format)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging based on configuration
    // The guard must be kept alive for the duration of the program
    // to ensure log messages are flushed to files
    let _log_guard = init_logging(&config);

    info!("Extract API starting up");
    info!("Configuration loaded successfully");

    // Initialize the extraction cache if enabled
    let cache = if config.cache.enabled {
        info!(
            ttl_secs = config.cache.ttl_secs,
            max_entries = config.cache.max_entries,
            "Extraction cache enabled"
        );
        Some(Arc::new(TextCache::new(&config.cache)))
    } else {
        info!("Extraction cache disabled");
        None
    };

    // Initialize the extraction service
    info!(
        max_file_size_mb = config.extraction.max_file_size_mb,
        "Initializing extraction service"
    );
    let extractor = Arc::new(ExtractionService::new(
        config.extraction.clone(),
        cache.clone(),
    ));

    // Create application state
    let state = AppState {
        config: config.clone(),
        extractor,
        cache,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address configuration")?;

    // Check if TLS is configured
    if let Some(ref tls_config) = config.server.tls {
        info!("Starting HTTPS server on https://{}", addr);
        info!("TLS certificate: {:?}", tls_config.cert_file);

        let rustls_config = create_rustls_config(tls_config).await?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context("Failed to bind to address")?;

        info!("HTTPS server is ready to accept connections");

        // Use axum-server for TLS with ConnectInfo support
        axum_server::from_tcp_rustls(listener.into_std()?, rustls_config)?
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .context("HTTPS server error")?;
    } else {
        info!("Starting HTTP server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context("Failed to bind to address")?;

        info!("HTTP server is ready to accept connections");

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .context("HTTP server error")?;
    }

    Ok(())
}

/// Create RusTLS configuration from TLS config
async fn create_rustls_config(
    tls_config: &config::TlsConfig,
) -> Result<axum_server::tls_rustls::RustlsConfig> {
    use axum_server::tls_rustls::RustlsConfig;
    use rustls::crypto::aws_lc_rs::default_provider;
    use rustls::ServerConfig;

    // Load certificate chain
    let cert_file = std::fs::File::open(&tls_config.cert_file)
        .with_context(|| format!("Failed to open certificate file: {:?}", tls_config.cert_file))?;
    let mut cert_reader = BufReader::new(cert_file);
    let certs: Vec<_> = rustls_pemfile::certs(&mut cert_reader)
        .filter_map(|r| r.ok())
        .collect();

    if certs.is_empty() {
        anyhow::bail!("No certificates found in {:?}", tls_config.cert_file);
    }

    // Load private key
    let key_file = std::fs::File::open(&tls_config.key_file)
        .with_context(|| format!("Failed to open key file: {:?}", tls_config.key_file))?;
    let mut key_reader = BufReader::new(key_file);
    let key = rustls_pemfile::private_key(&mut key_reader)
        .with_context(|| format!("Failed to read private key: {:?}", tls_config.key_file))?
        .ok_or_else(|| anyhow::anyhow!("No private key found in {:?}", tls_config.key_file))?;

    let provider = default_provider();

    // Determine minimum TLS version from config
    let versions: Vec<&'static rustls::SupportedProtocolVersion> =
        match tls_config.min_version.as_str() {
            "1.3" => vec![&rustls::version::TLS13],
            _ => vec![&rustls::version::TLS12, &rustls::version::TLS13],
        };

    info!("TLS configured with minimum version: {}", tls_config.min_version);

    let mut server_config = ServerConfig::builder_with_provider(provider.into())
        .with_protocol_versions(&versions)
        .context("Failed to set TLS protocol versions")?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("Failed to build TLS server config")?;

    // Enable ALPN for HTTP/1.1 and HTTP/2
    server_config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(RustlsConfig::from_config(Arc::new(server_config)))
}

/// Initialize the logging/tracing infrastructure
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let log_config = &config.logging;
    let to_console = log_config.target != LogTarget::File;

    // Set up the non-blocking file writer when file output is requested
    let (file_writer, guard) = match log_config.target {
        LogTarget::Console => (None, None),
        LogTarget::File | LogTarget::Both => {
            if let Err(e) = std::fs::create_dir_all(&log_config.log_dir) {
                eprintln!(
                    "Warning: Failed to create log directory {:?}: {}",
                    log_config.log_dir, e
                );
            }
            let file_appender = if log_config.daily_rotation {
                tracing_appender::rolling::daily(&log_config.log_dir, &log_config.log_prefix)
            } else {
                tracing_appender::rolling::never(&log_config.log_dir, &log_config.log_prefix)
            };
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(writer), Some(guard))
        }
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_config.format {
        LogFormat::Json => {
            let console_layer = to_console.then(|| fmt::layer().json().with_target(true));
            let file_layer =
                file_writer.map(|w| fmt::layer().json().with_target(true).with_writer(w));
            registry.with(console_layer).with(file_layer).init();
        }
        LogFormat::Compact => {
            let console_layer = to_console.then(|| fmt::layer().compact().with_target(false));
            let file_layer =
                file_writer.map(|w| fmt::layer().compact().with_target(false).with_writer(w));
            registry.with(console_layer).with(file_layer).init();
        }
        LogFormat::Pretty => {
            let console_layer = to_console.then(|| fmt::layer().with_target(true));
            let file_layer = file_writer.map(|w| fmt::layer().with_target(true).with_writer(w));
            registry.with(console_layer).with(file_layer).init();
        }
    }

    guard
}

/// Create the application router with all routes and middleware
fn create_router(state: AppState) -> Router {
    // The API is consumed cross-origin; responses carry no credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Configure tracing for HTTP requests
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Initialize rate limiting
    // - Standard limits on informational endpoints
    // - Stricter limits on extraction endpoints, which occupy blocking workers
    let api_rate_limit = middleware::create_rate_limit_state(middleware::api_rate_limit_config());
    let extract_rate_limit =
        middleware::create_rate_limit_state(middleware::extract_rate_limit_config());

    // Spawn background cleanup tasks for the rate limiters
    middleware::spawn_rate_limit_cleanup(api_rate_limit.clone());
    middleware::spawn_rate_limit_cleanup(extract_rate_limit.clone());

    // Batch requests may carry several maximum-size files plus multipart
    // framing overhead
    let max_body_bytes = (state.extractor.max_file_size_bytes() as usize)
        .saturating_mul(state.extractor.max_batch_files())
        .saturating_add(1024 * 1024);

    let router = Router::new()
        .merge(
            api::info_routes().layer(axum::middleware::from_fn_with_state(
                api_rate_limit,
                middleware::rate_limit_middleware,
            )),
        )
        .merge(
            api::extraction_routes()
                .layer(axum::middleware::from_fn_with_state(
                    extract_rate_limit,
                    middleware::rate_limit_middleware,
                ))
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .layer(axum::middleware::from_fn(
            middleware::api_cache_control_middleware,
        ))
        .with_state(state);

    // Apply global middleware layers:
    // 1. Security headers
    // 2. Compression
    // 3. Request tracing
    // 4. CORS
    router
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(trace_layer)
        .layer(cors)
}

/// Print help message
fn print_help() {
    println!(
        r#"Extract API {}

USAGE:
    extract-api [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    --write-default-config [PATH]
                            Write a default configuration file to PATH
                            (default: config.yaml) and exit.

ENVIRONMENT:
    EXTRACT_API_CONFIG  Path to configuration file (default: config.yaml)

CONFIGURATION:
    The application looks for configuration files in the following order:
    1. Path specified by EXTRACT_API_CONFIG environment variable
    2. ./config.yaml
    3. ./config/config.yaml
    4. /etc/extract-api/config.yaml"#,
        env!("CARGO_PKG_VERSION")
    );
}
