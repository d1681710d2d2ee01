use crate::events::HudEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the socket server and config watcher on their own thread. Events
/// reach the selector through `tx`, one at a time.
pub fn start_background_services(tx: Sender<HudEvent>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
