//! Runs a producer and a consumer over an ordered channel until Ctrl+C.
//!
//! Run with: `cargo run -p ordring-driver --bin ordring -- --duration-secs 5`
//!
//! Every value the consumer receives is printed on stdout; logs and the final
//! summary go to stderr (`RUST_LOG=ordring=trace` to see each insert and get).

use anyhow::Context;
use clap::Parser;
use ordring_driver::{run, write_value, DriverConfig, StopFlag};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ordring")]
#[command(about = "Bounded ordered channel producer/consumer demo")]
struct Cli {
    /// Channel capacity
    #[arg(long, default_value_t = 1024)]
    capacity: usize,

    /// Maximum random pause before each operation, in milliseconds
    #[arg(long, default_value_t = 100)]
    max_delay_ms: u64,

    /// Produced values are drawn from 1..=MAX_VALUE
    #[arg(long, default_value_t = 100)]
    max_value: i32,

    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(long)]
    duration_secs: Option<u64>,
}

impl Cli {
    fn into_config(self) -> DriverConfig {
        DriverConfig::default()
            .with_capacity(self.capacity)
            .with_max_delay(Duration::from_millis(self.max_delay_ms))
            .with_max_value(self.max_value)
            .with_duration(self.duration_secs.map(Duration::from_secs))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();
    let stop = StopFlag::new();

    eprintln!("To terminate the program use Ctrl+C.");

    let mut runner = tokio::task::spawn_blocking({
        let stop = stop.clone();
        move || {
            let sink_stop = stop.clone();
            run(&config, &stop, move |value| {
                write_value(&mut std::io::stdout().lock(), value, &sink_stop);
            })
        }
    });

    // The run ends on its own when --duration-secs elapses or stdout closes.
    let finished = tokio::select! {
        result = &mut runner => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            tracing::info!("received Ctrl+C, stopping");
            stop.stop();
            runner.await
        }
    };
    let report = finished.context("driver task failed")??;

    eprintln!();
    eprintln!("accepted:       {}", report.accepted);
    eprintln!("rejected:       {}", report.rejected);
    eprintln!("received:       {}", report.received);
    eprintln!("left in buffer: {}", report.left_in_buffer);
    eprintln!("elapsed:        {:.2}s", report.elapsed.as_secs_f64());
    Ok(())
}
