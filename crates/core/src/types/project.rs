//! Crowdfunding projects run by vineyards.
//!
//! Projects sit next to the wine catalog: investors browse them, back them
//! and get rewards in bottles or visits. Funding amounts use [`Price`] so
//! they share the cart's non-negative decimal arithmetic.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Price, ProjectId};

/// A backer reward tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Minimum pledge for this tier.
    pub amount: Price,
    pub title: String,
    pub description: String,
}

/// A vineyard project seeking funding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub funding_goal: Price,
    pub current_funding: Price,
    pub days_left: u32,
    /// Display location, e.g. "Bordeaux, France".
    pub location: String,
    pub owner_name: String,
    pub owner_avatar_url: String,
    /// Lowercase region key used by the listing filter.
    pub region: String,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl Project {
    /// Share of the goal raised so far, as a whole percentage in `0..=100`.
    ///
    /// Rounds half away from zero and caps at 100 for overfunded projects.
    /// A zero goal counts as fully funded once anything has been raised.
    #[must_use]
    pub fn funding_percentage(&self) -> u8 {
        let goal = self.funding_goal.amount();
        let raised = self.current_funding.amount();
        if goal.is_zero() {
            return if raised.is_zero() { 0 } else { 100 };
        }

        raised
            .checked_div(goal)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .min(Decimal::ONE_HUNDRED)
            .to_u8()
            .unwrap_or(100)
    }

    /// Whether the goal has been reached.
    #[must_use]
    pub fn is_funded(&self) -> bool {
        self.current_funding >= self.funding_goal
    }
}
