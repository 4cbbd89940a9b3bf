//! # smarthomed: smart home daemon
//!
//! Composition root: loads configuration, builds the household, then runs an
//! interactive shell on stdin until `quit`, end of input, or Ctrl-C.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the notification bus and every configured appliance
//! - Print notifications as timed processes complete
//! - Read commands line by line and print replies
//!
//! ## Dependency rule
//! This is the **only** crate that depends on every other crate.
//! It is the wiring layer: no domain logic belongs here.

mod command;
mod config;
mod shell;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tracing_subscriber::EnvFilter;

use smarthome_app::home::SmartHome;
use smarthome_app::notification_bus::InProcessNotificationBus;
use smarthome_app::ports::NotificationPublisher;
use smarthome_domain::notification::Notification;

use crate::config::Config;
use crate::shell::{Outcome, Shell};

const NOTIFICATION_CAPACITY: usize = 64;
const INPUT_BUFFER: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let bus = Arc::new(InProcessNotificationBus::new(NOTIFICATION_CAPACITY));
    let mut home = SmartHome::new(Arc::clone(&bus), config.timings());
    for device in &config.devices {
        home.add(device.kind, device.name.as_str())
            .with_context(|| format!("adding {} {:?}", device.kind, device.name))?;
    }
    tracing::info!(devices = home.len(), "household ready");

    let printer = tokio::spawn(print_notifications(BroadcastStream::new(bus.subscribe())));
    let shell = Shell::new(home, config.schedule_unit());
    let mut lines = spawn_stdin_reader().context("starting stdin reader")?;

    println!("smarthomed ready, type `help` for commands");
    run(&shell, &mut lines, interrupted()).await?;

    printer.abort();
    tracing::info!("smarthomed stopped");
    Ok(())
}

/// Read stdin on a plain thread so a pending read never holds up shutdown.
///
/// The thread is detached; it ends with the process or at end of input.
fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<std::io::Result<String>>> {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("interrupted"),
        Err(err) => {
            tracing::warn!(error = %err, "unable to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

async fn run<N>(
    shell: &Shell<N>,
    lines: &mut mpsc::Receiver<std::io::Result<String>>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()>
where
    N: NotificationPublisher + Send + Sync + 'static,
{
    tokio::pin!(shutdown);
    loop {
        let line = tokio::select! {
            line = lines.recv() => line,
            () = &mut shutdown => return Ok(()),
        };
        let Some(line) = line else {
            tracing::debug!("end of input");
            return Ok(());
        };
        let line = line.context("reading stdin")?;
        match shell.handle_line(&line) {
            Ok(Outcome::Quit) => return Ok(()),
            Ok(Outcome::Reply(reply)) if reply.is_empty() => {}
            Ok(Outcome::Reply(reply)) => println!("{reply}"),
            Err(err) => println!("error: {err}"),
        }
    }
}

async fn print_notifications(mut stream: BroadcastStream<Notification>) {
    while let Some(item) = stream.next().await {
        match item {
            Ok(notification) => println!("{notification}"),
            Err(err) => tracing::warn!(error = %err, "notifications dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use smarthome_app::appliances::Timings;
    use smarthome_domain::device::DeviceKind;

    fn shell() -> Shell<InProcessNotificationBus> {
        let mut home = SmartHome::new(
            Arc::new(InProcessNotificationBus::default()),
            Timings::default(),
        );
        home.add(DeviceKind::Door, "Front door").unwrap();
        Shell::new(home, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn should_return_on_shutdown_while_input_stays_open() {
        let shell = shell();
        let (_tx, mut lines) = mpsc::channel(1);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            run(&shell, &mut lines, std::future::ready(())),
        )
        .await;
        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn should_run_lines_until_quit() {
        let shell = shell();
        let (tx, mut lines) = mpsc::channel(4);
        tx.send(Ok("lock Front door".to_string())).await.unwrap();
        tx.send(Ok("quit".to_string())).await.unwrap();
        tx.send(Ok("unlock Front door".to_string())).await.unwrap();

        run(&shell, &mut lines, std::future::pending()).await.unwrap();
        assert_eq!(
            shell.handle_line("status").unwrap(),
            Outcome::Reply("Front door: door - locked".to_string())
        );
    }

    #[tokio::test]
    async fn should_return_at_end_of_input() {
        let shell = shell();
        let (tx, mut lines) = mpsc::channel::<std::io::Result<String>>(1);
        drop(tx);

        run(&shell, &mut lines, std::future::pending()).await.unwrap();
    }
}
