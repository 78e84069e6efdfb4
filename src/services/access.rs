//! Tier gating.
//!
//! Plan membership is supplied by the caller through [`PlanMembership`]; nothing here
//! reads ambient request state. A membership that cannot be determined counts as not
//! held, so every check fails closed.

use crate::models::{Tier, User};
use std::collections::HashSet;

/// Answers "does the caller hold plan P". `None` means the answer is unknown.
pub trait PlanMembership {
    fn holds(&self, plan: Tier) -> Option<bool>;
}

impl PlanMembership for User {
    fn holds(&self, plan: Tier) -> Option<bool> {
        self.plans.as_ref().map(|plans| plans.contains(&plan))
    }
}

impl PlanMembership for [Tier] {
    fn holds(&self, plan: Tier) -> Option<bool> {
        Some(self.contains(&plan))
    }
}

impl PlanMembership for HashSet<Tier> {
    fn holds(&self, plan: Tier) -> Option<bool> {
        Some(self.contains(&plan))
    }
}

impl<T: PlanMembership + ?Sized> PlanMembership for &T {
    fn holds(&self, plan: Tier) -> Option<bool> {
        (**self).holds(plan)
    }
}

/// An anonymous caller holds no plan.
impl<T: PlanMembership> PlanMembership for Option<T> {
    fn holds(&self, plan: Tier) -> Option<bool> {
        match self {
            Some(inner) => inner.holds(plan),
            None => Some(false),
        }
    }
}

/// Adapter for an externally supplied `has(plan)` check.
pub struct PlanCheck<F>(pub F);

impl<F> PlanMembership for PlanCheck<F>
where
    F: Fn(Tier) -> Option<bool>,
{
    fn holds(&self, plan: Tier) -> Option<bool> {
        (self.0)(plan)
    }
}

fn held<P: PlanMembership + ?Sized>(plans: &P, plan: Tier) -> bool {
    plans.holds(plan).unwrap_or(false)
}

/// True when the caller's plan is at least as privileged as `required`.
pub fn has_access<P: PlanMembership + ?Sized>(required: Option<Tier>, plans: &P) -> bool {
    match required {
        None | Some(Tier::Free) => true,
        Some(required) => Tier::DESCENDING
            .into_iter()
            .take_while(|tier| *tier >= required)
            .any(|tier| held(plans, tier)),
    }
}

/// Highest tier the caller holds; `Free` when no paid plan is held.
pub fn resolve_tier<P: PlanMembership + ?Sized>(plans: &P) -> Tier {
    Tier::DESCENDING
        .into_iter()
        .find(|tier| *tier == Tier::Free || held(plans, *tier))
        .unwrap_or_default()
}
