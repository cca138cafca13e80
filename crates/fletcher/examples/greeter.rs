//! Minimal component server.
//!
//! Run with `cargo run --example greeter`, then:
//!
//! ```text
//! curl http://localhost:8080/world
//! ```

use fletcher::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let greeter = Component::simple("greeter", "text", |config: Config| async move {
        let greet = config.get_str("greet").unwrap_or("hello").to_string();
        Ok(simple_handler_fn(move |args| {
            let greet = greet.clone();
            async move { Ok(format!("{}, {}", greet, &args.path[1..])) }
        }))
    });

    let args = RunArgs::new().with_main("greeter");
    let handle = run_with_components(&[greeter], &args).await?;
    println!("listening on port {}", handle.port());
    handle.stopped().await;
    Ok(())
}
