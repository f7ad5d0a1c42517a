//! Hello-world example binary
//!
//! Demonstrates the Courier mediator end to end: a custom handler, an
//! observable echo pipeline with two behaviors, and the error a caller sees
//! for an unrouted request type.

use anyhow::Result;
use courier_core::{BoxError, CancellationToken, Request, RequestHandler, async_trait};
use courier_runtime::Mediator;
use courier_testing::{EchoHandler, EchoRequest, ExecutionLog, RecordingBehavior};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A request with a hand-written handler.
struct Greet {
    name: String,
}

impl Request for Greet {
    type Response = String;
}

struct GreetHandler;

#[async_trait]
impl RequestHandler<Greet> for GreetHandler {
    async fn handle(&self, request: &Greet, _token: &CancellationToken) -> Result<String, BoxError> {
        Ok(format!("Hello, {}!", request.name))
    }
}

/// A request type nothing handles, to demonstrate the routing error.
struct Unrouted;

impl Request for Unrouted {
    type Response = ();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_world=debug,courier_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Hello World: Courier Mediator ===\n");

    let log = ExecutionLog::new();
    let token = CancellationToken::new();

    // One registry, built once at startup: two handlers, two behaviors on
    // the echo pipeline.
    let mediator = Mediator::builder()
        .register_handler(GreetHandler)
        .register_handler(EchoHandler::new())
        .register_behavior::<EchoRequest, _>(RecordingBehavior::new("Behavior1", log.clone()))
        .register_behavior::<EchoRequest, _>(RecordingBehavior::new("Behavior2", log.clone()))
        .build()?;

    tracing::info!(handlers = mediator.registry().handler_count(), "registry built");

    // A plain dispatch: caller names the request, never the handler.
    println!(">>> Sending: Greet {{ name: \"World\" }}");
    let greeting = mediator
        .send(
            Greet {
                name: "World".to_owned(),
            },
            &token,
        )
        .await?;
    println!("Response: {greeting}\n");

    // A dispatch through the behavior chain. The first-registered behavior
    // is the outermost wrapper.
    println!(">>> Sending: EchoRequest {{ message: \"Hello World\" }}");
    let response = mediator.send(EchoRequest::new("Hello World"), &token).await?;
    println!("Response: {}", response.result);
    println!("Trace:");
    for entry in log.entries() {
        println!("  {entry}");
    }
    println!();

    // An unrouted request type fails fast, before any behavior runs.
    println!(">>> Sending: Unrouted");
    match mediator.send(Unrouted, &token).await {
        Ok(()) => println!("Response: ()"),
        Err(error) => println!("Error: {error}"),
    }

    println!("\n=== Demonstration Complete ===");
    println!("\nKey concepts demonstrated:");
    println!("  • Request: a typed value tagged with its response type");
    println!("  • Handler: the single authoritative implementation per request type");
    println!("  • Pipeline behavior: before/after logic wrapped onion-style");
    println!("  • Mediator: stateless dispatch over an immutable registry");
    println!("  • Errors: unrouted types fail fast; handler errors pass through verbatim");

    Ok(())
}
