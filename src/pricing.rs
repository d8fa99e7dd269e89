//! Subscription plan selection: a plan catalog with monthly/yearly pricing,
//! the billing toggle, and the checkout summary. Pure state, no payment rail
//! integration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("no plan selected")]
    NoPlanSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BillingCadence {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCadence {
    pub fn label(self) -> &'static str {
        match self {
            BillingCadence::Monthly => "Monthly",
            BillingCadence::Yearly => "Yearly",
        }
    }
}

/// One subscription tier. Both prices are per-month; `yearly` is the
/// discounted rate charged when billed annually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub monthly: f64,
    pub yearly: f64,
}

impl Plan {
    pub fn new(name: impl Into<String>, monthly: f64, yearly: f64) -> Self {
        Self {
            name: name.into(),
            monthly,
            yearly,
        }
    }

    pub fn price_for(&self, cadence: BillingCadence) -> f64 {
        match cadence {
            BillingCadence::Monthly => self.monthly,
            BillingCadence::Yearly => self.yearly,
        }
    }
}

/// Summary block shown next to the payment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub label: String,
    pub price: String,
}

/// Locked-in subscription produced by a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub plan: String,
    pub cadence: &'static str,
    pub payment_rail: String,
    pub company: String,
    pub contact: String,
}

/// Selection state for the plans page: which cadence is toggled and which
/// card, if any, is picked.
pub struct PlanBoard {
    plans: Vec<Plan>,
    cadence: BillingCadence,
    selected: Option<usize>,
}

impl PlanBoard {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self {
            plans,
            cadence: BillingCadence::Monthly,
            selected: None,
        }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn cadence(&self) -> BillingCadence {
        self.cadence
    }

    /// Flip the monthly/yearly toggle. The selected plan stays selected; its
    /// effective price follows the cadence.
    pub fn set_yearly(&mut self, yearly: bool) {
        self.cadence = if yearly {
            BillingCadence::Yearly
        } else {
            BillingCadence::Monthly
        };
    }

    /// Pick a plan card by name. Unknown names leave the selection untouched.
    pub fn select(&mut self, name: &str) -> Option<&Plan> {
        let index = self.plans.iter().position(|plan| plan.name == name)?;
        self.selected = Some(index);
        Some(&self.plans[index])
    }

    pub fn selected_plan(&self) -> Option<&Plan> {
        self.selected.map(|index| &self.plans[index])
    }

    pub fn summary(&self) -> PlanSummary {
        match self.selected_plan() {
            Some(plan) => PlanSummary {
                label: format!("{} ({})", plan.name, self.cadence.label()),
                price: format_monthly_price(plan.price_for(self.cadence)),
            },
            None => PlanSummary {
                label: "None".to_string(),
                price: "$0".to_string(),
            },
        }
    }

    /// Lock in the selected plan. Fails if nothing is selected; on success
    /// the selection is cleared for the next visitor.
    pub fn checkout(
        &mut self,
        payment_rail: &str,
        company: &str,
        contact: &str,
    ) -> Result<CheckoutSummary, PricingError> {
        let plan = self.selected_plan().ok_or(PricingError::NoPlanSelected)?;

        let summary = CheckoutSummary {
            plan: plan.name.clone(),
            cadence: self.cadence.label(),
            payment_rail: payment_rail.to_string(),
            company: company.to_string(),
            contact: contact.to_string(),
        };

        self.selected = None;
        Ok(summary)
    }
}

/// "$39 / mo" style price tag; whole dollars only.
pub fn format_monthly_price(amount: f64) -> String {
    format!("${:.0} / mo", amount)
}
