//! Scripted in-memory transport for tests.
//!
//! Answers every command from a per-method script (falling back to a small
//! healthy device) and records what was sent, so tests can count requests
//! and inspect their parameters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Command, Transport};
use crate::error::GatewayError;

#[derive(Clone)]
enum Scripted {
    Body(Value),
    TransportError(String),
}

#[derive(Default)]
struct Inner {
    script: HashMap<String, Scripted>,
    delays: HashMap<String, Duration>,
    sent: Vec<Command>,
}

/// Mock transport; clones share the same script and log.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with this raw body from now on.
    pub fn respond(&self, method: &str, body: Value) {
        self.inner
            .lock()
            .unwrap()
            .script
            .insert(method.to_string(), Scripted::Body(body));
    }

    /// Answer `method` with an `Error` envelope from now on.
    pub fn fail(&self, method: &str, message: &str) {
        self.respond(method, json!({ "Error": message }));
    }

    /// Make `method` fail before any envelope is produced.
    pub fn fail_transport(&self, method: &str, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .script
            .insert(method.to_string(), Scripted::TransportError(message.to_string()));
    }

    /// Delay the reply to `method`.
    pub fn delay(&self, method: &str, delay: Duration) {
        self.inner
            .lock()
            .unwrap()
            .delays
            .insert(method.to_string(), delay);
    }

    /// Serve a queue of `len` tracks titled `t0..`.
    pub fn queue_of(&self, len: usize) {
        self.respond("get-queue-contents", json!({ "Value": queue_body(len) }));
    }

    /// Report `track` (1-based) as the current track.
    pub fn playing_track(&self, track: u32) {
        self.respond(
            "get-position-info",
            json!({ "Value": {
                "Track": track,
                "TrackDuration": 200,
                "RelTime": 20,
                "Title": format!("t{}", track.saturating_sub(1)),
            }}),
        );
    }

    pub fn count(&self, method: &str) -> usize {
        self.sent(method).len()
    }

    pub fn sent(&self, method: &str) -> Vec<Command> {
        self.inner
            .lock()
            .unwrap()
            .sent
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    pub fn all_sent(&self) -> Vec<Command> {
        self.inner.lock().unwrap().sent.clone()
    }

    pub fn clear_log(&self) {
        self.inner.lock().unwrap().sent.clear();
    }
}

fn queue_body(len: usize) -> Value {
    Value::Array(
        (0..len)
            .map(|i| {
                json!({
                    "ID": format!("Q:0/{}", i + 1),
                    "ParentID": "Q:0",
                    "Title": format!("t{}", i),
                    "Creator": "Artist",
                    "Album": "Album",
                    "Class": "object.item.audioItem.musicTrack",
                })
            })
            .collect(),
    )
}

fn default_body(method: &str) -> Value {
    match method {
        "get-volume" => json!({ "Value": 30 }),
        "get-position-info" => json!({ "Value": {
            "Track": 1, "TrackDuration": 200, "RelTime": 20, "Title": "t0"
        }}),
        "get-transport-info" => json!({ "Value": {
            "CurrentTransportState": "PLAYING",
            "CurrentTransportStatus": "OK",
            "CurrentSpeed": "1"
        }}),
        "get-queue-contents" => json!({ "Value": queue_body(3) }),
        "get-all-genres" => json!({ "Value": [
            { "ID": "A:GENRE/Jazz", "Title": "Jazz", "Class": "object.container.genre.musicGenre" },
            { "ID": "A:GENRE/Rock", "Title": "Rock", "Class": "object.container.genre.musicGenre" }
        ]}),
        "get-direct-children" => json!({ "Value": [
            { "ID": "A:GENRE/Jazz/Miles%20Davis", "Title": "Miles Davis",
              "Class": "object.container.person.musicArtist" }
        ]}),
        _ => json!({ "Value": true }),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, command: &Command) -> Result<Value, GatewayError> {
        let (scripted, delay) = {
            let mut inner = self.inner.lock().unwrap();
            inner.sent.push(command.clone());
            (
                inner.script.get(command.method).cloned(),
                inner.delays.get(command.method).copied(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match scripted {
            Some(Scripted::Body(body)) => Ok(body),
            Some(Scripted::TransportError(message)) => Err(GatewayError::Transport(message)),
            None => Ok(default_body(command.method)),
        }
    }
}
