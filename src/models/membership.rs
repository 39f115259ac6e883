use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FeeError;

/// Membership tiers. Closed set: parsing anything else is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MembershipTier {
    Visitor,
    Free,
    /// Also reached through the legacy `basic` name.
    Pro,
    Enterprise,
    Admin,
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 5] = [
        MembershipTier::Visitor,
        MembershipTier::Free,
        MembershipTier::Pro,
        MembershipTier::Enterprise,
        MembershipTier::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Visitor => "visitor",
            MembershipTier::Free => "free",
            MembershipTier::Pro => "pro",
            MembershipTier::Enterprise => "enterprise",
            MembershipTier::Admin => "admin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipTier::Visitor => "Visitor",
            MembershipTier::Free => "Free Member",
            MembershipTier::Pro => "Pro Member",
            MembershipTier::Enterprise => "Enterprise Member",
            MembershipTier::Admin => "Administrator",
        }
    }

    /// Only the free tier is subject to daily and per-load caps.
    pub fn has_booking_limits(&self) -> bool {
        matches!(self, MembershipTier::Free)
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visitor" => Ok(MembershipTier::Visitor),
            "free" => Ok(MembershipTier::Free),
            "pro" | "basic" => Ok(MembershipTier::Pro),
            "enterprise" => Ok(MembershipTier::Enterprise),
            "admin" => Ok(MembershipTier::Admin),
            _ => Err(FeeError::UnknownTier(s.to_string())),
        }
    }
}

impl TryFrom<String> for MembershipTier {
    type Error = FeeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Who is asking for a quote. Resolved by the caller and passed in
/// explicitly; nothing in the fee model looks it up on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipContext {
    pub tier: MembershipTier,
    pub is_authenticated: bool,
}

impl MembershipContext {
    pub fn new(tier: MembershipTier, is_authenticated: bool) -> Self {
        MembershipContext {
            tier,
            is_authenticated,
        }
    }

    pub fn visitor() -> Self {
        MembershipContext::new(MembershipTier::Visitor, false)
    }

    /// An authenticated member; a `visitor` tier here still counts as a visitor.
    pub fn member(tier: MembershipTier) -> Self {
        MembershipContext::new(tier, tier != MembershipTier::Visitor)
    }

    pub fn is_visitor(&self) -> bool {
        !self.is_authenticated
    }
}

impl Default for MembershipContext {
    fn default() -> Self {
        MembershipContext::visitor()
    }
}
