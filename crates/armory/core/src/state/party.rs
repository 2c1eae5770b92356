//! Shared party stock of unequipped equipment.

use std::collections::BTreeMap;

use crate::state::items::EquipRef;

/// Count of each owned-but-unequipped item, keyed by [`EquipRef`].
///
/// Ordinary equipment stacks under its template id; individuated instances
/// are counted under their own id, always 0 or 1. Equipping trades a unit
/// out of this pool, unequipping trades it back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyState {
    counts: BTreeMap<EquipRef, u32>,
}

impl PartyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of `item` currently in stock. Absent entries read as zero.
    pub fn count(&self, item: EquipRef) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: EquipRef) -> bool {
        self.count(item) > 0
    }

    pub fn gain(&mut self, item: EquipRef, amount: u32) {
        if amount == 0 {
            return;
        }
        let entry = self.counts.entry(item).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Removes up to `amount` units; at zero the entry disappears.
    pub fn lose(&mut self, item: EquipRef, amount: u32) {
        let Some(entry) = self.counts.get_mut(&item) else {
            return;
        };
        *entry = entry.saturating_sub(amount);
        if *entry == 0 {
            self.counts.remove(&item);
        }
    }

    /// Drops the entry entirely, whatever its count. Used on retirement.
    pub(crate) fn clear(&mut self, item: EquipRef) {
        self.counts.remove(&item);
    }

    /// Iterates over every stocked item and its count, in key order.
    pub fn stocked(&self) -> impl Iterator<Item = (EquipRef, u32)> + '_ {
        self.counts.iter().map(|(item, count)| (*item, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateId;

    #[test]
    fn counts_default_to_zero_and_drop_at_zero() {
        let sword = EquipRef::Template(TemplateId(7));
        let mut party = PartyState::new();
        assert_eq!(party.count(sword), 0);

        party.gain(sword, 3);
        assert_eq!(party.count(sword), 3);

        party.lose(sword, 5);
        assert_eq!(party.count(sword), 0);
        assert!(party.is_empty());
    }

    #[test]
    fn gain_of_zero_creates_no_entry() {
        let mut party = PartyState::new();
        party.gain(EquipRef::Template(TemplateId(1)), 0);
        assert!(party.is_empty());
    }
}
