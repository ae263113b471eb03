mod bootstrap;
mod interrupt;
mod state;

pub use bootstrap::AppBootstrap;
pub use interrupt::InterruptHandler;
pub use state::AppState;
