use anyhow::Result;
use background_services::marker_renderer::{apply_map_commands, map_channel};
use background_services::stop_fetcher::{RefreshRequest, run_stop_fetcher};
use clap::Parser;
use config::Config;
use dotenvy::dotenv;
use map_surface::TracingMapSurface;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::time::Duration;
use tokio::sync::mpsc::channel;
use tokio::{select, spawn};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod background_services;
mod config;
mod map_surface;
mod model;

#[derive(Parser, Debug)]
struct Args {
    /// URL of the stop feed, falls back to the SUNSPOT_ENDPOINT env variable
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    _ = dotenv();
    let args = Args::parse();

    let otlp_endpoint =
        dotenvy::var("OTLP_ENDPOINT").unwrap_or("http://localhost:4317".to_string());

    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_timeout(Duration::from_millis(1000))
        .with_endpoint(&otlp_endpoint)
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            Resource::builder()
                .with_service_name("sunspot_stop_map")
                .build(),
        )
        .build();

    let tracer = provider.tracer("sunspot_stop_map");

    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = tracing_appender::rolling::daily("./logs", "sunspot_stop_map.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    Registry::default()
        .with(telemetry_layer)
        .with(file_log)
        .with(env_filter)
        .init();

    info!("OTLP_ENDPOINT: {}", otlp_endpoint);

    let config = Config::from_sources(args.endpoint)?;

    let (map_handle, mut map_commands) = map_channel(32);
    let (refresh_sender, mut refresh_requests) = channel::<RefreshRequest>(1);

    let renderer = spawn(async move {
        let mut surface = TracingMapSurface::default();
        apply_map_commands(&mut map_commands, &mut surface).await;
    });

    let fetcher = spawn(async move {
        if let Err(e) = run_stop_fetcher(&mut refresh_requests, &config, map_handle).await {
            error!("{e}");
        }
    });

    // the page coming up is the first display event
    refresh_sender.send(RefreshRequest).await?;

    select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        },
        res = renderer => {
            match res {
                Ok(_) => info!("Renderer stopped"),
                Err(err) => error!("{:?}", err),
            }
        },
        res = fetcher => {
            match res {
                Ok(_) => info!("Stop fetcher stopped"),
                Err(err) => error!("{:?}", err),
            }
        },
    }

    Ok(())
}
