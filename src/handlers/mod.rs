mod carrier_calls;
mod health;
mod loads;
mod verify;

pub use carrier_calls::record_carrier_call;
pub use health::{health_check, home, not_found_fallback};
pub use loads::search_loads;
pub use verify::{verify_carrier, verify_carrier_by_path};
