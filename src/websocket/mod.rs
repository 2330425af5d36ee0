//! WebSocket Live Updates
//!
//! Pushes the subscription list to open dashboards after every mutation.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Tracks active connections and fans messages out
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8090/api/v1/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'snapshot') console.log(msg.formatted_total);
//! };
//!
//! ws.onopen = () => ws.send(JSON.stringify({type: 'refresh'}));
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
