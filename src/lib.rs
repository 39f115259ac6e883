//! Fee and pricing model for the freight load board.
//!
//! [`services::fee_service::FeeCalculator`] is the core: transaction fee
//! breakdowns, cancellation refunds and free-tier booking gates, all read
//! from a single [`config::FeeSchedule`]. The `routes` module exposes it as
//! a JSON quoting service.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::FeeSchedule;
pub use error::{FeeError, Result};
pub use models::fees::{
    CancellationBreakdown, FeeBreakdown, FeeKind, FeeLineItem, GateDecision, ReasonCode,
    TransactionKind,
};
pub use models::membership::{MembershipContext, MembershipTier};
pub use services::fee_service::FeeCalculator;
