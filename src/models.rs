pub mod bookings;
pub mod fees;
pub mod membership;
pub mod money;
pub mod plans;
