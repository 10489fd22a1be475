pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;

pub use domain::{GameDetail, GameListResult, Region, SlotFailure, StoreOffer};
pub use error::{GameError, Result};
pub use services::GameService;
