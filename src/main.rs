//! rpc-logging demo
//!
//! Sends one call through a client-side and a server-side logging layer
//! around an echo handler and prints the records they produce.
//!
//! ```text
//!   payload ──▶ client Logging ──▶ server Logging ──▶ echo handler
//!                    │                   │
//!                    ▼                   ▼
//!              TracingLogger        TracingLogger
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tower::{service_fn, ServiceBuilder, ServiceExt};

use rpc_logging::config::{load_config, Config};
use rpc_logging::observability::logging;
use rpc_logging::{
    server, BoxError, Call, CallContext, Kind, LoggingLayer, Side, Status, TracingLogger,
    Transport,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Failure {
    /// Handler answers with a structured status error.
    Status,
    /// Handler fails with an opaque error.
    Internal,
}

#[derive(Parser)]
#[command(name = "rpc-logging")]
#[command(about = "Run one call through the RPC logging middleware", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Operation name of the call.
    #[arg(short, long, default_value = "/helloworld.Greeter/SayHello")]
    operation: String,

    /// Peer endpoint of the call.
    #[arg(short, long, default_value = "127.0.0.1:9000")]
    endpoint: String,

    /// Transport kind.
    #[arg(short, long, value_enum, default_value_t = KindArg::Grpc)]
    kind: KindArg,

    /// Make the handler fail.
    #[arg(long, value_enum)]
    fail: Option<Failure>,

    /// Request payload.
    #[arg(default_value = "hello")]
    payload: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Http,
    Grpc,
}

impl From<KindArg> for Kind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Http => Kind::Http,
            KindArg::Grpc => Kind::Grpc,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    logging::init(&config.observability)?;

    tracing::info!(
        half_length = config.middleware.half_length,
        log_format = ?config.observability.log_format,
        "Configuration loaded"
    );

    let fail = cli.fail;
    let handler = service_fn(move |call: Call<String>| async move {
        match fail {
            None => Ok(format!("echo: {}", call.payload)),
            Some(Failure::Status) => Err::<String, BoxError>(Box::new(
                Status::unavailable("greeter is draining").with_metadata("retry_after", "5"),
            )),
            Some(Failure::Internal) => Err("handler exploded".into()),
        }
    });

    let server_side = ServiceBuilder::new()
        .layer(server(TracingLogger).with_half_length(config.middleware.half_length))
        .service(handler);

    // The client hop hands the call over to the server hop in-process.
    let outbound = service_fn(move |call: Call<String>| {
        let svc = server_side.clone();
        async move {
            let transporter = call
                .context
                .transporter(Side::Client)
                .cloned()
                .ok_or_else(|| BoxError::from("no client transporter"))?;
            let inbound = CallContext::new().with_server(Arc::new(Transport::new(
                transporter.kind(),
                "127.0.0.1:50000",
                transporter.operation(),
            )));
            svc.oneshot(Call::new(inbound, call.payload)).await
        }
    });

    let client_side = ServiceBuilder::new()
        .layer(LoggingLayer::from_config(
            Side::Client,
            TracingLogger,
            &config.middleware,
        ))
        .service(outbound);

    let ctx = CallContext::client(Transport::new(cli.kind.into(), cli.endpoint, cli.operation));
    match client_side.oneshot(Call::new(ctx, cli.payload)).await {
        Ok(reply) => println!("reply: {}", reply),
        Err(e) => println!("error: {}", e),
    }

    Ok(())
}
