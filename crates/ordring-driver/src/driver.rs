use crate::{DriverConfig, DriverError, StopFlag};
use ordring::{Config, Consumer, OrderedChannel, Producer};
use rand::Rng;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Counts gathered from the channel once both loops have exited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Values the channel accepted.
    pub accepted: u64,
    /// Values dropped because they were not greater than the last accepted one.
    pub rejected: u64,
    /// Values handed to the consumer callback.
    pub received: u64,
    /// Values still buffered when the consumer stopped.
    pub left_in_buffer: u64,
    /// Wall-clock time between start and both threads joining.
    pub elapsed: Duration,
}

/// Runs one producer thread and one consumer thread over a fresh channel
/// until `stop` is set or `config.duration` has elapsed.
///
/// The producer pauses a random `0..=max_delay`, draws a value in
/// `1..=max_value` and inserts it; rejected values are dropped. The consumer
/// pauses a random `0..=max_delay`, then waits up to `poll_interval` for a
/// value and passes it to `on_value`.
///
/// Shutdown is producer first: once `stop` is set the producer finishes its
/// current insert (the still-running consumer relieves a full buffer) and
/// exits; only after it has been joined is the consumer told to exit. Neither
/// thread is left blocked inside the channel.
///
/// If `on_value` panics the consumer sets `stop`, keeps draining (discarding
/// values) until the producer has exited, and the run ends with
/// [`DriverError::Panicked`].
pub fn run<F>(config: &DriverConfig, stop: &StopFlag, on_value: F) -> Result<RunReport, DriverError>
where
    F: FnMut(i32) + Send + 'static,
{
    if config.max_value < 1 {
        return Err(DriverError::InvalidConfig(format!(
            "max_value must be at least 1, got {}",
            config.max_value
        )));
    }

    let channel = OrderedChannel::<i32>::with_natural_order(Config::new(config.capacity, true))?;
    let (producer, consumer) = channel.split();
    let producer_exited = Arc::new(AtomicBool::new(false));
    let start = Instant::now();
    let deadline = config.duration.and_then(|d| start.checked_add(d));

    info!(
        capacity = config.capacity,
        max_delay_ms = config.max_delay.as_millis() as u64,
        max_value = config.max_value,
        "driver started"
    );

    // Consumer goes first so a running producer always has someone draining.
    let consumer_handle = thread::Builder::new()
        .name("consumer".into())
        .spawn({
            let exited = Arc::clone(&producer_exited);
            let stop = stop.clone();
            let max_delay = config.max_delay;
            let poll_interval = config.poll_interval;
            move || {
                consume(&consumer, &stop, &exited, max_delay, poll_interval, on_value);
                consumer
            }
        })
        .map_err(|source| DriverError::Spawn {
            role: "consumer",
            source,
        })?;

    let producer_handle = thread::Builder::new().name("producer".into()).spawn({
        let stop = stop.clone();
        let max_delay = config.max_delay;
        let max_value = config.max_value;
        move || produce(&producer, &stop, deadline, max_value, max_delay)
    });

    let producer_result = match producer_handle {
        Ok(handle) => handle.join().map_err(|_| DriverError::Panicked("producer")),
        Err(source) => Err(DriverError::Spawn {
            role: "producer",
            source,
        }),
    };

    // Whatever ended the producer, the consumer may go now.
    stop.stop();
    producer_exited.store(true, Ordering::Release);

    let consumer = consumer_handle
        .join()
        .map_err(|_| DriverError::Panicked("consumer"))?;
    producer_result?;

    let metrics = consumer.metrics();
    let report = RunReport {
        accepted: metrics.accepted,
        rejected: metrics.rejected,
        received: metrics.received,
        left_in_buffer: metrics.in_flight(),
        elapsed: start.elapsed(),
    };

    info!(
        accepted = report.accepted,
        rejected = report.rejected,
        received = report.received,
        left_in_buffer = report.left_in_buffer,
        "driver stopped"
    );
    Ok(report)
}

fn produce(
    producer: &Producer<i32>,
    stop: &StopFlag,
    deadline: Option<Instant>,
    max_value: i32,
    max_delay: Duration,
) {
    debug!("producer started");
    let mut rng = rand::thread_rng();

    while !stop.is_stopped() && deadline.map_or(true, |d| Instant::now() < d) {
        pause(&mut rng, max_delay);
        let value = rng.gen_range(1..=max_value);
        if let Err(rejected) = producer.insert(value) {
            trace!(value = rejected.into_inner(), "value out of order, dropped");
        }
    }

    debug!("producer stopping");
}

fn consume<F>(
    consumer: &Consumer<i32>,
    stop: &StopFlag,
    producer_exited: &AtomicBool,
    max_delay: Duration,
    poll_interval: Duration,
    mut on_value: F,
) where
    F: FnMut(i32),
{
    debug!("consumer started");
    let mut rng = rand::thread_rng();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        while !producer_exited.load(Ordering::Acquire) {
            pause(&mut rng, max_delay);
            if let Some(value) = consumer.get_timeout(poll_interval) {
                on_value(value);
            }
        }
    }));

    if let Err(payload) = outcome {
        // A producer parked on a full ring needs someone to make room.
        warn!("value callback panicked, draining until the producer exits");
        stop.stop();
        while !producer_exited.load(Ordering::Acquire) {
            let _ = consumer.get_timeout(poll_interval);
        }
        panic::resume_unwind(payload);
    }

    debug!("consumer stopping");
}

/// Sleeps a uniformly random `0..=max` (millisecond granularity).
fn pause<R: Rng>(rng: &mut R, max: Duration) {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return;
    }
    thread::sleep(Duration::from_millis(rng.gen_range(0..=max_ms)));
}
