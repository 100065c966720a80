//! Status polling
//!
//! Long-running cloud operations report progress through a status field.
//! [`StateChangeConf`] polls a [`StateRefresh`] at a fixed interval until
//! the reported state reaches a target, leaves the pending set, or the
//! timeout expires. There is no backoff.

mod refresh;
mod state;

pub use refresh::{FnRefresh, StatusFieldRefresh};
pub use state::{
    RefreshResult, StateChangeConf, StateRefresh, STATE_COMPLETED, STATE_DELETED, STATE_PENDING,
};

#[cfg(test)]
mod tests;
