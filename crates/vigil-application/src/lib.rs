//! Use-case layer for the Vigil client: the reconciled board view that
//! the rendering surface drives.

pub mod board_usecase;

pub use board_usecase::BoardUseCase;
