//! Fee schedule: the one table every rate and booking limit comes from.
//!
//! Defaults below are the production rates. Each field can be overridden
//! through a `LOADBOARD_*` environment variable, validated at startup.

use std::env;
use std::str::FromStr;

use log::info;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{FeeError, Result};

pub const AI_GENERATION_RATE_VAR: &str = "LOADBOARD_AI_GENERATION_RATE";
pub const PAYMENT_PROCESSING_RATE_VAR: &str = "LOADBOARD_PAYMENT_PROCESSING_RATE";
pub const ENTERPRISE_PAYMENT_PROCESSING_RATE_VAR: &str =
    "LOADBOARD_ENTERPRISE_PAYMENT_PROCESSING_RATE";
pub const ADMINISTRATIVE_RATE_VAR: &str = "LOADBOARD_ADMINISTRATIVE_RATE";
pub const CHECKOUT_ADMINISTRATIVE_RATE_VAR: &str = "LOADBOARD_CHECKOUT_ADMINISTRATIVE_RATE";
pub const VISITOR_BOOKING_RATE_VAR: &str = "LOADBOARD_VISITOR_BOOKING_RATE";
pub const CANCELLATION_RATE_VAR: &str = "LOADBOARD_CANCELLATION_RATE";
pub const LIVE_AI_BOOKING_RATE_VAR: &str = "LOADBOARD_LIVE_AI_BOOKING_RATE";
pub const FREE_DAILY_LOAD_LIMIT_VAR: &str = "LOADBOARD_FREE_DAILY_LOAD_LIMIT";
pub const FREE_LOAD_VALUE_CAP_VAR: &str = "LOADBOARD_FREE_LOAD_VALUE_CAP";

/// Average job value assumed by the admin fee summary when none is given.
pub const DEFAULT_AVERAGE_JOB_VALUE: i64 = 1750;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    /// Charged on every transaction.
    pub ai_generation_rate: Decimal,
    pub payment_processing_rate: Decimal,
    pub enterprise_payment_processing_rate: Decimal,
    /// Visitor-only, on load bookings.
    pub administrative_rate: Decimal,
    /// Visitor-only, in the sign-up-and-book checkout.
    pub checkout_administrative_rate: Decimal,
    /// Visitor-only, stacked on top of the administrative fee.
    pub visitor_booking_rate: Decimal,
    pub cancellation_rate: Decimal,
    /// Used by the admin fee collection summary only.
    pub live_ai_booking_rate: Decimal,
    pub free_daily_load_limit: u32,
    pub free_load_value_cap: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            ai_generation_rate: Decimal::new(3, 2),
            payment_processing_rate: Decimal::new(3, 2),
            enterprise_payment_processing_rate: Decimal::new(25, 3),
            administrative_rate: Decimal::new(5, 2),
            checkout_administrative_rate: Decimal::new(3, 2),
            visitor_booking_rate: Decimal::new(10, 2),
            cancellation_rate: Decimal::new(5, 2),
            live_ai_booking_rate: Decimal::new(4, 2),
            free_daily_load_limit: 3,
            free_load_value_cap: Decimal::from(1000),
        }
    }
}

impl FeeSchedule {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        let schedule = Self::from_lookup(|key| env::var(key).ok())?;
        info!("Fee schedule loaded: {:?}", schedule);
        Ok(schedule)
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut schedule = FeeSchedule::default();

        let rates: [(&'static str, &mut Decimal); 8] = [
            (AI_GENERATION_RATE_VAR, &mut schedule.ai_generation_rate),
            (PAYMENT_PROCESSING_RATE_VAR, &mut schedule.payment_processing_rate),
            (
                ENTERPRISE_PAYMENT_PROCESSING_RATE_VAR,
                &mut schedule.enterprise_payment_processing_rate,
            ),
            (ADMINISTRATIVE_RATE_VAR, &mut schedule.administrative_rate),
            (
                CHECKOUT_ADMINISTRATIVE_RATE_VAR,
                &mut schedule.checkout_administrative_rate,
            ),
            (VISITOR_BOOKING_RATE_VAR, &mut schedule.visitor_booking_rate),
            (CANCELLATION_RATE_VAR, &mut schedule.cancellation_rate),
            (LIVE_AI_BOOKING_RATE_VAR, &mut schedule.live_ai_booking_rate),
        ];
        for (name, slot) in rates {
            if let Some(raw) = lookup(name) {
                *slot = parse_rate(name, &raw)?;
            }
        }

        if let Some(raw) = lookup(FREE_DAILY_LOAD_LIMIT_VAR) {
            schedule.free_daily_load_limit =
                raw.trim().parse().map_err(|_| FeeError::InvalidLimit {
                    name: FREE_DAILY_LOAD_LIMIT_VAR,
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup(FREE_LOAD_VALUE_CAP_VAR) {
            schedule.free_load_value_cap = Decimal::from_str(raw.trim())
                .ok()
                .filter(|cap| !cap.is_sign_negative())
                .ok_or_else(|| FeeError::InvalidLimit {
                    name: FREE_LOAD_VALUE_CAP_VAR,
                    value: raw.clone(),
                })?;
        }

        schedule.validate()?;
        Ok(schedule)
    }

    /// Every rate must sit in `[0, 1]` and the value cap must be non-negative.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("ai_generation_rate", self.ai_generation_rate),
            ("payment_processing_rate", self.payment_processing_rate),
            (
                "enterprise_payment_processing_rate",
                self.enterprise_payment_processing_rate,
            ),
            ("administrative_rate", self.administrative_rate),
            (
                "checkout_administrative_rate",
                self.checkout_administrative_rate,
            ),
            ("visitor_booking_rate", self.visitor_booking_rate),
            ("cancellation_rate", self.cancellation_rate),
            ("live_ai_booking_rate", self.live_ai_booking_rate),
        ];
        for (name, rate) in rates {
            if !is_unit_rate(rate) {
                return Err(FeeError::InvalidRate {
                    name,
                    value: rate.to_string(),
                });
            }
        }

        if self.free_load_value_cap.is_sign_negative() {
            return Err(FeeError::InvalidLimit {
                name: "free_load_value_cap",
                value: self.free_load_value_cap.to_string(),
            });
        }
        Ok(())
    }
}

fn is_unit_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

fn parse_rate(name: &'static str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|rate| is_unit_rate(*rate))
        .ok_or_else(|| FeeError::InvalidRate {
            name,
            value: raw.to_string(),
        })
}
