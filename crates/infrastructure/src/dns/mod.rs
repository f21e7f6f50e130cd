pub mod client;
pub mod message_builder;
pub mod response_parser;
pub mod transport;

pub use client::PoolExchange;
pub use message_builder::MessageBuilder;
pub use response_parser::{ParsedResponse, ResponseParser};
