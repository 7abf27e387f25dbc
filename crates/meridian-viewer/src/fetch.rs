//! One-shot background fetch of the cube texture.
//!
//! The fetch runs on its own thread and delivers raw bytes over a channel;
//! a [`Waker`] ping schedules a redraw so the frame loop picks the result up
//! promptly. Fire-once: there is no retry and no cancellation — if the fetch
//! never completes, the cube keeps its placeholder color.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use meridian_engine::window::Waker;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle to an in-flight texture fetch.
pub struct TextureFetch {
    rx: Receiver<Result<Vec<u8>>>,
    delivered: bool,
}

impl TextureFetch {
    /// Starts fetching `source` (an http(s) URL or a local file path).
    pub fn spawn(source: String, waker: Waker) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("meridian-texture-fetch".to_string())
            .spawn(move || {
                let result = fetch_bytes(&source);
                // The receiver may already be gone on shutdown.
                let _ = tx.send(result);
                waker.wake();
            })
            .expect("failed to spawn texture fetch thread");

        Self {
            rx,
            delivered: false,
        }
    }

    /// Non-blocking poll. Returns the fetch outcome exactly once.
    pub fn poll(&mut self) -> Option<Result<Vec<u8>>> {
        if self.delivered {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.delivered = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.delivered = true;
                Some(Err(anyhow::anyhow!("texture fetch thread disappeared")))
            }
        }
    }
}

fn fetch_bytes(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("failed to build http client")?;

        let response = client
            .get(source)
            .send()
            .with_context(|| format!("request to {source} failed"))?
            .error_for_status()
            .with_context(|| format!("{source} returned an error status"))?;

        Ok(response
            .bytes()
            .context("failed to read response body")?
            .to_vec())
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {source}"))
    }
}
