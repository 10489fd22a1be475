pub mod collector;
pub mod detail;
pub mod game_service;
pub mod offers;
pub mod pagination;
pub mod regions;
pub mod session;

pub use collector::GameCollector;
pub use game_service::GameService;
pub use pagination::PagePlan;
pub use session::ScrapeSession;
