use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::money::{format_currency, format_percent, round_cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    AiGeneration,
    PaymentProcessing,
    Administrative,
    VisitorBooking,
    Cancellation,
    LiveAiBooking,
}

impl FeeKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeeKind::AiGeneration => "AI Generation Fee",
            FeeKind::PaymentProcessing => "Payment Processing Fee",
            FeeKind::Administrative => "Administrative Fee",
            FeeKind::VisitorBooking => "Visitor Booking Fee",
            FeeKind::Cancellation => "Cancellation Fee",
            FeeKind::LiveAiBooking => "Live AI Auto-Booking Fee",
        }
    }
}

/// Booking flow a quote is for. Flows differ only in the administrative
/// rate charged to visitors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Booking a load from the board.
    #[default]
    LoadBooking,
    /// A visitor signing up and booking in one step.
    VisitorCheckout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeLineItem {
    pub kind: FeeKind,
    pub label: &'static str,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl FeeLineItem {
    /// `base × rate`, rounded to cents.
    pub fn charge(kind: FeeKind, rate: Decimal, base: Decimal) -> Self {
        FeeLineItem {
            kind,
            label: kind.label(),
            rate,
            amount: round_cents(base * rate),
        }
    }

    /// [`charge`](Self::charge) for amounts that may exceed decimal range.
    pub fn checked_charge(kind: FeeKind, rate: Decimal, base: Decimal) -> Option<Self> {
        base.checked_mul(rate).map(|fee| FeeLineItem {
            kind,
            label: kind.label(),
            rate,
            amount: round_cents(fee),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub base_amount: Decimal,
    pub line_items: Vec<FeeLineItem>,
    pub total_fees: Decimal,
    pub grand_total: Decimal,
}

impl FeeBreakdown {
    /// Totals are always derived from the items, never supplied.
    pub fn from_items(base_amount: Decimal, line_items: Vec<FeeLineItem>) -> Self {
        let total_fees: Decimal = line_items.iter().map(|item| item.amount).sum();
        FeeBreakdown {
            base_amount,
            line_items,
            total_fees,
            grand_total: base_amount + total_fees,
        }
    }

    pub fn line_item(&self, kind: FeeKind) -> Option<&FeeLineItem> {
        self.line_items.iter().find(|item| item.kind == kind)
    }

    /// Fee for `kind`, or 0 when it does not apply.
    pub fn amount_for(&self, kind: FeeKind) -> Decimal {
        self.line_item(kind)
            .map(|item| item.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Total fees as a percentage of the base, one decimal place.
    pub fn effective_rate_percent(&self) -> Decimal {
        if self.base_amount.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_fees / self.base_amount * Decimal::ONE_HUNDRED).round_dp(1)
    }

    pub fn display(&self) -> BreakdownDisplay {
        BreakdownDisplay {
            base_amount: format_currency(self.base_amount),
            line_items: self
                .line_items
                .iter()
                .map(|item| DisplayLine {
                    label: item.label,
                    rate: format_percent(item.rate),
                    amount: format_currency(item.amount),
                })
                .collect(),
            total_fees: format_currency(self.total_fees),
            grand_total: format_currency(self.grand_total),
        }
    }
}

/// Currency strings for rendering a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownDisplay {
    pub base_amount: String,
    pub line_items: Vec<DisplayLine>,
    pub total_fees: String,
    pub grand_total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLine {
    pub label: &'static str,
    pub rate: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationBreakdown {
    pub label: &'static str,
    pub original_amount: Decimal,
    pub rate: Decimal,
    pub cancellation_fee: Decimal,
    /// `original_amount - cancellation_fee`
    pub refund_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    DailyLimitReached,
    ValueCapExceeded,
}

impl ReasonCode {
    pub fn title(&self) -> &'static str {
        match self {
            ReasonCode::DailyLimitReached => "Daily Limit Reached",
            ReasonCode::ValueCapExceeded => "Load Value Too High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
}

impl GateDecision {
    pub fn allow() -> Self {
        GateDecision {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: ReasonCode) -> Self {
        GateDecision {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Projected fee revenue over a batch of jobs, for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeCollectionSummary {
    pub total_jobs: u64,
    pub successful_jobs: u64,
    pub average_job_value: Decimal,
    pub revenue: Decimal,
    pub ai_generation_fees: Decimal,
    pub live_ai_booking_fees: Decimal,
    pub administrative_fees: Decimal,
    pub estimated_cancellation_fees: Decimal,
    pub total_fees_collected: Decimal,
    pub success_rate_percent: Decimal,
    /// The four fee figures above, labelled, in display order.
    pub fee_lines: Vec<FeeLineItem>,
}
