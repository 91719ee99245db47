//! HTTP client layer for the Vigil board: the session lifecycle and the
//! remote facade over every resource operation.

pub mod board_client;
mod http;
pub mod session_client;

pub use board_client::HttpBoardService;
pub use session_client::SessionClient;
