#![allow(dead_code)]

mod local_server;
mod messages;
mod mock_transport;
mod recording_logger;

pub use local_server::*;
pub use messages::*;
pub use mock_transport::*;
pub use recording_logger::*;
