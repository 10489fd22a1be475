mod game;
mod query;
mod region;

pub use game::{
    GameDetail, GameListResult, GameSummary, SlotFailure, StoreOffer, DEFAULT_GAME_TYPE,
};
pub use query::ListQuery;
pub use region::Region;
