mod leader_info;
mod locator;

pub use leader_info::LeaderInfo;
pub use locator::LeaderLocator;
pub use locator::LocateLeaderError;
pub use locator::NotAvailableReason;
