//! Amount representations, one per numeric domain.
//!
//! [`Amount`] is the payload of a quantity. The per-domain submodules hold the planning
//! rules (what a request means, whether it is allowed, what remains afterwards); this
//! module dispatches to them and applies a plan only once it has been fully validated.
//! [`Shadow`] replays the same plans against a scratch copy for dry runs.

pub(crate) mod integer;
pub(crate) mod items;
pub(crate) mod real;

pub(crate) use items::ItemSet;

use crate::error::{Result, StuffError};
use crate::item::ItemId;
use crate::kind::Kind;
use crate::measure::{Measure, Portion};
use crate::policy::UnitPolicy;
use std::collections::BTreeSet;

#[derive(Debug)]
pub(crate) enum Amount {
    Integer(u64),
    Real(f64),
    Items(ItemSet),
}

impl Amount {
    pub(crate) fn measure(&self) -> Measure {
        match self {
            Amount::Integer(n) => Measure::Count(*n),
            Amount::Real(x) => Measure::Real(*x),
            Amount::Items(set) => Measure::Items(set.len()),
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.measure().is_zero()
    }

    /// Empty amount of the same domain (and item restriction).
    pub(crate) fn emptied(&self) -> Amount {
        match self {
            Amount::Integer(_) => Amount::Integer(0),
            Amount::Real(_) => Amount::Real(0.0),
            Amount::Items(set) => Amount::Items(set.emptied()),
        }
    }

    /// Exact copy of a scalar amount; `None` for item sets.
    pub(crate) fn snapshot(&self) -> Option<Amount> {
        match self {
            Amount::Integer(n) => Some(Amount::Integer(*n)),
            Amount::Real(x) => Some(Amount::Real(*x)),
            Amount::Items(_) => None,
        }
    }

    /// Removes `portion` and returns it. Nothing changes unless the whole request is valid.
    pub(crate) fn take(&mut self, kind: &Kind, portion: &Portion) -> Result<Amount> {
        let rule = kind.minimum_rule();
        match (self, kind.policy()) {
            (
                Amount::Integer(held),
                UnitPolicy::Integer {
                    min_amount,
                    unit_size,
                },
            ) => {
                let n = integer::requested(portion, *unit_size)
                    .ok_or_else(|| kind.domain_mismatch(portion))??;
                *held = integer::plan_take(*held, n, *min_amount, *unit_size, rule)?;
                Ok(Amount::Integer(n))
            }
            (Amount::Real(held), UnitPolicy::Real { min_amount, .. }) => {
                let x = real::requested(portion).ok_or_else(|| kind.domain_mismatch(portion))??;
                let (taken, remainder) = real::plan_take(*held, x, *min_amount, rule)?;
                *held = remainder;
                Ok(Amount::Real(taken))
            }
            (Amount::Items(set), UnitPolicy::IdentitySet { min_items, .. }) => {
                let Portion::Items(ids) = portion else {
                    return Err(kind.domain_mismatch(portion));
                };
                items::plan_take(set.len(), |id| set.contains(id), ids, *min_items, rule)?;
                Ok(Amount::Items(set.remove(ids)))
            }
            _ => Err(kind.domain_mismatch(portion)),
        }
    }

    /// Removes everything, leaving an empty amount behind.
    pub(crate) fn take_all(&mut self) -> Amount {
        let empty = self.emptied();
        std::mem::replace(self, empty)
    }

    /// Checks that `other` can be added to this amount.
    pub(crate) fn check_absorb(&self, kind: &Kind, other: &Amount) -> Result<()> {
        match (self, other) {
            (Amount::Integer(a), Amount::Integer(b)) => integer::checked_sum(*a, *b).map(drop),
            (Amount::Real(a), Amount::Real(b)) => real::checked_sum(*a, *b).map(drop),
            (Amount::Items(a), Amount::Items(b)) => a.check_absorb(b),
            _ => Err(cross_domain(kind)),
        }
    }

    /// Checks that `self` and `other` can be merged, and returns the empty amount that
    /// will receive both.
    pub(crate) fn combined(&self, kind: &Kind, other: &Amount) -> Result<Amount> {
        match (self, other) {
            (Amount::Items(a), Amount::Items(b)) => a.combined(b).map(Amount::Items),
            _ => {
                self.check_absorb(kind, other)?;
                Ok(self.emptied())
            }
        }
    }

    /// Adds `other`, which must have passed [`Amount::check_absorb`].
    pub(crate) fn absorb(&mut self, other: Amount) {
        match (self, other) {
            (Amount::Integer(a), Amount::Integer(b)) => *a = a.saturating_add(b),
            (Amount::Real(a), Amount::Real(b)) => *a += b,
            (Amount::Items(a), Amount::Items(b)) => a.absorb(b),
            _ => unreachable!("quantities of one kind share a domain"),
        }
    }

    pub(crate) fn shadow(&self) -> Shadow<'_> {
        match self {
            Amount::Integer(n) => Shadow::Integer(*n),
            Amount::Real(x) => Shadow::Real(*x),
            Amount::Items(set) => Shadow::Items {
                set,
                removed: BTreeSet::new(),
            },
        }
    }

    /// Requests for all but the last part of a division into `pieces` parts.
    ///
    /// The last part is whatever remains once these have been taken.
    pub(crate) fn plan_divide(&self, kind: &Kind, pieces: usize) -> Result<Vec<Portion>> {
        if pieces == 0 {
            return Err(StuffError::InvalidAmount(
                "cannot divide into zero pieces".into(),
            ));
        }
        let parts: Vec<Portion> = match (self, kind.policy()) {
            (
                Amount::Integer(held),
                UnitPolicy::Integer {
                    min_amount,
                    unit_size,
                },
            ) => integer::plan_divide(*held, *min_amount, *unit_size, pieces)?
                .into_iter()
                .map(Portion::from)
                .collect(),
            (Amount::Real(held), UnitPolicy::Real { min_amount, .. }) => {
                return Ok(real::plan_divide(*held, *min_amount, pieces)?
                    .into_iter()
                    .map(Portion::from)
                    .collect())
            }
            (Amount::Items(set), UnitPolicy::IdentitySet { min_items, .. }) => {
                items::plan_divide(set.ids().collect(), *min_items, pieces)?
                    .into_iter()
                    .map(Portion::from)
                    .collect()
            }
            _ => return Err(cross_domain(kind)),
        };
        Ok(parts.into_iter().take(pieces - 1).collect())
    }
}

fn cross_domain(kind: &Kind) -> StuffError {
    StuffError::DomainMismatch {
        kind: kind.name().to_string(),
        domain: kind.domain(),
        requested: "an amount of another domain",
    }
}

/// Scratch copy of an amount used to validate a sequence of takes without mutating it.
pub(crate) enum Shadow<'a> {
    Integer(u64),
    Real(f64),
    Items {
        set: &'a ItemSet,
        removed: BTreeSet<ItemId>,
    },
}

impl Shadow<'_> {
    /// Applies `portion` to the scratch copy under the same rules as [`Amount::take`].
    pub(crate) fn take(&mut self, kind: &Kind, portion: &Portion) -> Result<()> {
        let rule = kind.minimum_rule();
        match (self, kind.policy()) {
            (
                Shadow::Integer(held),
                UnitPolicy::Integer {
                    min_amount,
                    unit_size,
                },
            ) => {
                let n = integer::requested(portion, *unit_size)
                    .ok_or_else(|| kind.domain_mismatch(portion))??;
                *held = integer::plan_take(*held, n, *min_amount, *unit_size, rule)?;
            }
            (Shadow::Real(held), UnitPolicy::Real { min_amount, .. }) => {
                let x = real::requested(portion).ok_or_else(|| kind.domain_mismatch(portion))??;
                *held = real::plan_take(*held, x, *min_amount, rule)?.1;
            }
            (Shadow::Items { set, removed }, UnitPolicy::IdentitySet { min_items, .. }) => {
                let Portion::Items(ids) = portion else {
                    return Err(kind.domain_mismatch(portion));
                };
                let held = set.len() - removed.len();
                let present = |id| set.contains(id) && !removed.contains(&id);
                items::plan_take(held, present, ids, *min_items, rule)?;
                removed.extend(ids.iter().copied());
            }
            _ => return Err(kind.domain_mismatch(portion)),
        }
        Ok(())
    }
}
