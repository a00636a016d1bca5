//! Gateway module - the single path every device request takes
//!
//! - `command`: Named commands and their parameters
//! - `transport`: How a command reaches the device (HTTP in production)
//! - `envelope`: Decoding of the `{ Error }` / `{ Value }` reply envelope
//! - `mocks`: Scripted in-memory transport for tests

mod command;
mod envelope;
mod transport;
#[cfg(test)]
pub mod mocks;

pub use command::Command;
pub use transport::{HttpTransport, Transport};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GatewayError, Reply};
use crate::model::{LibraryNode, PositionInfo, TrackInfo, TransportInfo, Volume};

/// Sends commands to the device and decodes every reply into a [`Reply`].
///
/// One call is one attempt; retrying is left to the caller.
pub struct CommandGateway<T> {
    transport: T,
}

impl<T: Transport> CommandGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send a command and return the untyped payload of its envelope.
    pub async fn send(&self, command: Command) -> Reply<Value> {
        crate::log_command_request!(command.method, params = ?command.params);

        let result = match self.transport.post(&command).await {
            Ok(body) => envelope::decode(command.method, body),
            Err(e) => Err(e),
        };

        crate::log_command_result!(command.method, result);
        result
    }

    /// Send a command whose reply value is not needed.
    pub async fn execute(&self, command: Command) -> Result<(), GatewayError> {
        self.send(command).await.map(|_| ())
    }

    async fn fetch<R: DeserializeOwned>(&self, command: Command) -> Reply<R> {
        let method = command.method;
        let value = self.send(command).await?;
        envelope::decode_value(method, value)
    }

    async fn fetch_list<R: DeserializeOwned>(&self, command: Command) -> Reply<Vec<R>> {
        let method = command.method;
        let value = self.send(command).await?;
        envelope::decode_list(method, value)
    }

    pub async fn get_volume(&self) -> Reply<Volume> {
        self.fetch(Command::get_volume()).await
    }

    pub async fn get_position_info(&self) -> Reply<PositionInfo> {
        self.fetch(Command::get_position_info()).await
    }

    pub async fn get_transport_info(&self) -> Reply<TransportInfo> {
        self.fetch(Command::get_transport_info()).await
    }

    pub async fn get_queue_contents(&self) -> Reply<Vec<TrackInfo>> {
        self.fetch_list(Command::get_queue_contents()).await
    }

    pub async fn get_all_genres(&self) -> Reply<Vec<LibraryNode>> {
        self.fetch_list(Command::get_all_genres()).await
    }

    pub async fn get_direct_children(&self, root: &str) -> Reply<Vec<LibraryNode>> {
        self.fetch_list(Command::get_direct_children(root)).await
    }
}
