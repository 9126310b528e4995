//! Edge adapters between catalog state and the outside world.

pub mod query_params;
