//! Instance registry operations: individuation, resolution, stock transfer.
//!
//! Individuation turns a catalog template into a uniquely identified
//! [`ItemInstance`] the moment one copy needs its own fate (durability,
//! upgrades). Templates without the `unique` tag never individuate and keep
//! stacking by template id.

use crate::catalog::{TemplateId, TemplateItem};
use crate::env::{ArmoryEnv, OracleError};
use crate::error::{ArmoryError, ErrorSeverity};
use crate::ledger::initial_durability;
use crate::state::{ArmoryState, EquipRef, InstanceId, ItemInstance, StateError};

/// Errors from instance registry operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// Referenced template does not exist in the catalog.
    #[error("template {0} not found in catalog")]
    UnknownTemplate(TemplateId),

    /// Referenced instance is not registered. Dangling references indicate
    /// a bug in the caller's bookkeeping, not a normal miss.
    #[error("instance {0} is not registered")]
    UnknownInstance(InstanceId),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ArmoryError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownTemplate(_) => ErrorSeverity::Validation,
            Self::UnknownInstance(_) => ErrorSeverity::Internal,
            Self::State(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTemplate(_) => "REGISTRY_UNKNOWN_TEMPLATE",
            Self::UnknownInstance(_) => "REGISTRY_UNKNOWN_INSTANCE",
            Self::State(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
        }
    }
}

impl ArmoryState {
    /// Ensures `item` is backed by a unique instance, minting one if needed.
    ///
    /// Returns `Ok(None)` when the resolved template is not individuated;
    /// asking is always legal and the answer is simply "not applicable".
    /// Passing a live instance back in returns its id unchanged, so the
    /// operation is idempotent over things that already individuated.
    ///
    /// # Errors
    ///
    /// - `UnknownTemplate` when the template is missing from the catalog
    /// - `UnknownInstance` for a dangling instance reference
    pub fn request_instance(
        &mut self,
        env: &ArmoryEnv<'_>,
        item: EquipRef,
    ) -> Result<Option<InstanceId>, RegistryError> {
        match item {
            EquipRef::Instance(id) => {
                if self.registry.contains(id) {
                    Ok(Some(id))
                } else {
                    Err(RegistryError::UnknownInstance(id))
                }
            }
            EquipRef::Template(id) => {
                let template = env
                    .catalog()?
                    .template(id)
                    .ok_or(RegistryError::UnknownTemplate(id))?;
                if !template.is_individuated() {
                    return Ok(None);
                }
                Ok(Some(self.mint_instance(env, &template)?))
            }
        }
    }

    /// Mints and registers a fresh instance of `template`.
    ///
    /// Copies the template fields, initializes durability from tags and
    /// config defaults, and hands out the next id in the instance namespace.
    pub(crate) fn mint_instance(
        &mut self,
        env: &ArmoryEnv<'_>,
        template: &TemplateItem,
    ) -> Result<InstanceId, RegistryError> {
        let defaults = env.defaults()?;
        let id = self.registry.allocate_instance_id()?;
        let (durability, maximum) = initial_durability(&template.tags, &defaults);
        self.registry.insert(ItemInstance {
            id,
            template: template.id,
            kind: template.kind,
            name: template.name.clone(),
            tags: template.tags.clone(),
            durability,
            maximum,
            upgrade_level: 0,
        });
        Ok(id)
    }

    /// Looks a live instance up by id.
    pub fn resolve_instance(&self, id: InstanceId) -> Option<&ItemInstance> {
        self.registry.get(id)
    }

    /// Resolves the catalog template behind `item`.
    ///
    /// Instances resolve through their back-reference; the template must
    /// still exist in the catalog.
    pub fn resolve_base(
        &self,
        env: &ArmoryEnv<'_>,
        item: EquipRef,
    ) -> Result<TemplateItem, RegistryError> {
        let template_id = match item {
            EquipRef::Template(id) => id,
            EquipRef::Instance(id) => {
                self.registry
                    .get(id)
                    .ok_or(RegistryError::UnknownInstance(id))?
                    .template
            }
        };
        env.catalog()?
            .template(template_id)
            .ok_or(RegistryError::UnknownTemplate(template_id))
    }

    /// True when `item` is a live instance or a template that individuates.
    ///
    /// Lookup misses degrade to `false`; this query never fails.
    pub fn is_individuated(&self, env: &ArmoryEnv<'_>, item: EquipRef) -> bool {
        match item {
            EquipRef::Instance(id) => self.registry.contains(id),
            EquipRef::Template(id) => env
                .catalog()
                .ok()
                .and_then(|catalog| catalog.template(id))
                .is_some_and(|template| template.is_individuated()),
        }
    }

    /// Removes `id` from the registry and drops its stock entry.
    ///
    /// Loadout seats are not touched here; the breakage flow clears them
    /// before retiring. Returns the removed instance, `None` if it was
    /// already gone.
    pub fn retire(&mut self, id: InstanceId) -> Option<ItemInstance> {
        let removed = self.registry.remove(id);
        if removed.is_some() {
            self.party.clear(EquipRef::Instance(id));
        }
        removed
    }

    /// Adds `amount` units of `item` to the party stock.
    ///
    /// Individuated templates mint one fresh instance per unit, each
    /// stocked under its own id with count one. Ordinary templates stack
    /// under the template id. Returns the refs actually stocked.
    pub fn acquire(
        &mut self,
        env: &ArmoryEnv<'_>,
        item: EquipRef,
        amount: u32,
    ) -> Result<Vec<EquipRef>, RegistryError> {
        if amount == 0 {
            return Ok(Vec::new());
        }
        match item {
            EquipRef::Instance(id) => {
                if !self.registry.contains(id) {
                    return Err(RegistryError::UnknownInstance(id));
                }
                // An instance is one physical object: count stays at one
                // no matter how many times it re-enters the pool.
                if !self.party.has(item) {
                    self.party.gain(item, 1);
                }
                Ok(vec![item])
            }
            EquipRef::Template(id) => {
                let template = env
                    .catalog()?
                    .template(id)
                    .ok_or(RegistryError::UnknownTemplate(id))?;
                if template.is_individuated() {
                    let mut stocked = Vec::with_capacity(amount as usize);
                    for _ in 0..amount {
                        let instance = self.mint_instance(env, &template)?;
                        let item = EquipRef::Instance(instance);
                        self.party.gain(item, 1);
                        stocked.push(item);
                    }
                    Ok(stocked)
                } else {
                    self.party.gain(item, amount);
                    Ok(vec![item])
                }
            }
        }
    }

    /// Removes up to `amount` units of `item` from stock.
    ///
    /// An instance whose stock hits zero is retired once no loadout seat
    /// references it anymore; a seated instance stays registered.
    pub fn discard(&mut self, item: EquipRef, amount: u32) {
        if amount == 0 {
            return;
        }
        self.party.lose(item, amount);
        if let EquipRef::Instance(id) = item {
            if self.party.count(item) == 0 && self.roster.holders_of(id).is_empty() {
                self.registry.remove(id);
            }
        }
    }

    /// Bumps the reserved enhancement counter, returning the new level.
    /// `None` when the instance is not registered.
    pub fn upgrade_instance(&mut self, id: InstanceId, levels: u32) -> Option<u32> {
        let instance = self.registry.get_mut(id)?;
        instance.upgrade_level = instance.upgrade_level.saturating_add(levels);
        Some(instance.upgrade_level)
    }

    /// Resolved display name for messages.
    ///
    /// Falls back to the raw reference when nothing resolves, so callers
    /// can always print something.
    pub fn display_name(&self, env: &ArmoryEnv<'_>, item: EquipRef) -> String {
        match item {
            EquipRef::Instance(id) => {
                if let Some(instance) = self.registry.get(id) {
                    return instance.name.clone();
                }
            }
            EquipRef::Template(id) => {
                if let Some(template) =
                    env.catalog().ok().and_then(|catalog| catalog.template(id))
                {
                    return template.name;
                }
            }
        }
        item.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EquipKind;
    use crate::state::Durability;
    use crate::testutil::{TestWorld, template};

    fn world() -> TestWorld {
        TestWorld::new()
            .with_template(template(
                1,
                EquipKind::Weapon,
                "Iron Sword",
                &[("unique", ""), ("durability", "10"), ("attack", "5")],
            ))
            .with_template(template(4, EquipKind::Armor, "Traveler Cloak", &[("defense", "1")]))
    }

    #[test]
    fn ordinary_templates_do_not_individuate() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let issued = state
            .request_instance(&env, EquipRef::Template(TemplateId(4)))
            .unwrap();
        assert_eq!(issued, None);
        assert!(state.registry.is_empty());
    }

    #[test]
    fn unique_templates_mint_monotonic_ids() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let first = state
            .request_instance(&env, EquipRef::Template(TemplateId(1)))
            .unwrap()
            .unwrap();
        let second = state
            .request_instance(&env, EquipRef::Template(TemplateId(1)))
            .unwrap()
            .unwrap();

        assert_eq!(first, InstanceId::FLOOR);
        assert!(second > first);
        assert!(first.0 >= InstanceId::FLOOR.0 && second.0 >= InstanceId::FLOOR.0);
    }

    #[test]
    fn requesting_a_live_instance_is_idempotent() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let id = state
            .request_instance(&env, EquipRef::Template(TemplateId(1)))
            .unwrap()
            .unwrap();
        let again = state
            .request_instance(&env, EquipRef::Instance(id))
            .unwrap();

        assert_eq!(again, Some(id));
        assert_eq!(state.registry.len(), 1);
    }

    #[test]
    fn dangling_instance_refs_are_rejected() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let err = state
            .request_instance(&env, EquipRef::Instance(InstanceId(10_500)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownInstance(_)));
        assert_eq!(err.severity(), ErrorSeverity::Internal);
    }

    #[test]
    fn unknown_templates_are_rejected() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let err = state
            .request_instance(&env, EquipRef::Template(TemplateId(99)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownTemplate(TemplateId(99))));
    }

    #[test]
    fn minted_instances_deep_copy_template_fields() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let id = state
            .request_instance(&env, EquipRef::Template(TemplateId(1)))
            .unwrap()
            .unwrap();
        let instance = state.resolve_instance(id).unwrap();

        assert_eq!(instance.template, TemplateId(1));
        assert_eq!(instance.kind, EquipKind::Weapon);
        assert_eq!(instance.name, "Iron Sword");
        assert_eq!(instance.durability, Durability::Finite(10));
        assert_eq!(instance.maximum, Durability::Finite(10));
        assert_eq!(instance.upgrade_level, 0);
    }

    #[test]
    fn acquiring_unique_items_mints_one_instance_per_unit() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let stocked = state
            .acquire(&env, EquipRef::Template(TemplateId(1)), 3)
            .unwrap();

        assert_eq!(stocked.len(), 3);
        assert_eq!(state.registry.len(), 3);
        for item in &stocked {
            assert_eq!(state.party.count(*item), 1);
        }
    }

    #[test]
    fn acquiring_ordinary_items_stacks() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let cloak = EquipRef::Template(TemplateId(4));
        state.acquire(&env, cloak, 3).unwrap();
        state.acquire(&env, cloak, 2).unwrap();

        assert_eq!(state.party.count(cloak), 5);
        assert!(state.registry.is_empty());
    }

    #[test]
    fn discard_retires_unreferenced_instances() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let stocked = state
            .acquire(&env, EquipRef::Template(TemplateId(1)), 1)
            .unwrap();
        let item = stocked[0];

        state.discard(item, 1);
        assert_eq!(state.party.count(item), 0);
        assert!(state.registry.is_empty());
    }

    #[test]
    fn retire_clears_registry_and_stock() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let id = state
            .request_instance(&env, EquipRef::Template(TemplateId(1)))
            .unwrap()
            .unwrap();
        state.party.gain(EquipRef::Instance(id), 1);

        assert!(state.retire(id).is_some());
        assert!(state.resolve_instance(id).is_none());
        assert_eq!(state.party.count(EquipRef::Instance(id)), 0);
        // A second retire is a no-op.
        assert!(state.retire(id).is_none());
    }

    #[test]
    fn upgrade_bumps_the_reserved_counter() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let id = state
            .request_instance(&env, EquipRef::Template(TemplateId(1)))
            .unwrap()
            .unwrap();

        assert_eq!(state.upgrade_instance(id, 2), Some(2));
        assert_eq!(state.upgrade_instance(id, 1), Some(3));
        assert_eq!(state.upgrade_instance(InstanceId(10_999), 1), None);
    }

    #[test]
    fn display_name_resolves_and_degrades() {
        let world = world();
        let env = world.env();
        let mut state = ArmoryState::new();

        let id = state
            .request_instance(&env, EquipRef::Template(TemplateId(1)))
            .unwrap()
            .unwrap();

        assert_eq!(state.display_name(&env, EquipRef::Instance(id)), "Iron Sword");
        assert_eq!(
            state.display_name(&env, EquipRef::Template(TemplateId(4))),
            "Traveler Cloak"
        );
        assert_eq!(
            state.display_name(&env, EquipRef::Template(TemplateId(99))),
            "99"
        );
    }
}
