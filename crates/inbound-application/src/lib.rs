pub mod in_flight;
pub mod lead_usecase;
pub mod status_ticker;

pub use in_flight::{Dispatch, InFlightGuard, Operation};
pub use lead_usecase::LeadUseCase;
pub use status_ticker::{RunningTicker, Status, StatusTicker};
