use std::fs;
use std::sync::Arc;

use armory_core::{
    ActorId, ActorLoadout, ArmoryState, Durability, EquipError, EquipKind, EquipRef, InstanceId,
    SkillId, TemplateId,
};
use runtime::{BufferSink, CombatEvent, InMemorySaveRepo, OracleManager, RuntimeError, Session};

const EQUIPMENT_RON: &str = r#"
(
    templates: [
        (
            id: 1,
            kind: Weapon,
            name: "Iron Sword",
            tags: {
                "unique": "true",
                "durability": "2",
                "use_loss": "1",
                "attack": "5",
            },
        ),
        (
            id: 2,
            kind: Armor,
            name: "Oak Shield",
            tags: {
                "unique": "true",
                "durability": "1",
                "damage_loss": "1",
                "replacement": "Cracked Shield",
                "defense": "3",
            },
        ),
        (
            id: 3,
            kind: Armor,
            name: "Cracked Shield",
            tags: {
                "defense": "1",
            },
        ),
    ],
)
"#;

const SKILLS_RON: &str = r#"
(
    skills: [
        (
            id: 5,
            name: "Fireblast",
        ),
    ],
)
"#;

fn session_fixture() -> (Session, Arc<BufferSink>, Arc<InMemorySaveRepo>) {
    let content_dir = tempfile::tempdir().expect("tempdir should create");
    fs::write(content_dir.path().join("equipment.ron"), EQUIPMENT_RON).unwrap();
    fs::write(content_dir.path().join("skills.ron"), SKILLS_RON).unwrap();

    let oracles =
        OracleManager::from_content_dir(content_dir.path()).expect("content should load");

    let mut state = ArmoryState::new();
    state
        .roster
        .add(
            ActorLoadout::with_kinds(
                ActorId(1),
                "Rei",
                &[EquipKind::Weapon, EquipKind::Armor],
            )
            .unwrap(),
        )
        .unwrap();

    let sink = Arc::new(BufferSink::new());
    let saves = Arc::new(InMemorySaveRepo::new());

    let session = Session::builder()
        .initial_state(state)
        .oracles(oracles)
        .sink(sink.clone())
        .repository(saves.clone())
        .build()
        .expect("session should build");

    (session, sink, saves)
}

/// End-to-End Durability Lifecycle Test
///
/// This test drives a complete equipment lifecycle through the session:
/// 1. Session starts with content-loaded oracles (catalog, skills, defaults)
/// 2. A unique sword is acquired and individuated into an instance
/// 3. The sword is equipped and contributes its stat bonuses
/// 4. Two skill uses wear it from durability 2 to 0
/// 5. Breakage empties the seat, retires the instance, zeroes the stock
/// 6. A shield with a replacement tag degrades instead of vanishing
/// 7. Save and restore preserve instance identity and the id allocator
#[test]
fn test_complete_durability_lifecycle() {
    println!("\n════════════════════════════════════════════════════════");
    println!("  ARMORY - Complete Durability Lifecycle Test");
    println!("════════════════════════════════════════════════════════\n");

    // ================================================================
    // PHASE 1: Session Initialization
    // ================================================================
    println!("📦 PHASE 1: Initializing Session");
    println!("─────────────────────────────────────────────────────\n");

    let (mut session, sink, _saves) = session_fixture();
    let rei = ActorId(1);

    println!("✓ Session built");
    println!("✓ Content loaded from RON/TOML fixtures:");
    println!("  • Iron Sword (unique, durability 2, use_loss 1, attack 5)");
    println!("  • Oak Shield (unique, durability 1, replacement: Cracked Shield)");
    println!("  • Cracked Shield (ordinary, defense 1)");
    println!("  • Skill 5 = Fireblast");
    println!("✓ Roster: Rei with one weapon and one armor slot\n");

    // ================================================================
    // PHASE 2: Acquisition and Individuation
    // ================================================================
    println!("⚒️  PHASE 2: Acquisition");
    println!("─────────────────────────────────────────────────────\n");

    let granted = session
        .acquire(EquipRef::Template(TemplateId(1)), 1)
        .expect("acquire should succeed");
    assert_eq!(granted.len(), 1);
    let sword = granted[0];
    assert_eq!(sword, EquipRef::Instance(InstanceId(10_000)));
    let sword_id = sword.as_instance().unwrap();

    println!("✓ Iron Sword acquired and individuated");
    println!("  • Instance id: {} (allocation starts at the floor)", sword_id);
    println!("  • Stock count: {}\n", session.state().party.count(sword));

    session.equip(rei, 0, Some(sword)).expect("equip should succeed");
    let member = session.state().roster.actor(rei).unwrap();
    assert!(member.has_equipped(sword));
    assert_eq!(member.bonuses.attack, 5);
    assert_eq!(session.state().party.count(sword), 0);

    println!("✓ Iron Sword equipped in weapon slot");
    println!("  • Attack bonus: +5");
    println!("  • Stock count back to 0 (unit moved to the seat)\n");

    // ================================================================
    // PHASE 3: Wear Through Use
    // ================================================================
    println!("⚔️  PHASE 3: Combat Wear (durability 2 → 0)");
    println!("─────────────────────────────────────────────────────\n");

    session.begin_encounter();

    session
        .dispatch(&CombatEvent::ActionUsed {
            actor: rei,
            skill: SkillId(5),
        })
        .expect("dispatch should succeed");
    assert_eq!(
        session.state().durability(sword_id),
        Some(Durability::Finite(1))
    );
    assert!(sink.messages().is_empty());

    println!("Use 1: Fireblast");
    println!("  ✓ Durability 2 → 1, no breakage\n");

    session
        .dispatch(&CombatEvent::ActionUsed {
            actor: rei,
            skill: SkillId(5),
        })
        .expect("dispatch should succeed");

    println!("Use 2: Fireblast");
    println!("  ✓ Durability 1 → 0, sword breaks\n");

    // No replacement tag: the seat empties and the instance retires.
    assert_eq!(session.state().durability(sword_id), None);
    assert!(session.state().registry.is_empty());
    let member = session.state().roster.actor(rei).unwrap();
    assert!(member.equipped().next().is_none());
    assert_eq!(member.bonuses.attack, 0);
    assert_eq!(session.state().party.count(sword), 0);
    assert_eq!(sink.drain(), vec!["Rei's Iron Sword broke!"]);

    println!("✓ Breakage resolved:");
    println!("  • Weapon slot emptied (no replacement tag)");
    println!("  • Instance retired from the registry");
    println!("  • Attack bonus back to 0");
    println!("  • Message: \"Rei's Iron Sword broke!\"\n");

    session.end_encounter();

    // ================================================================
    // PHASE 4: Breakage With Replacement, Mid-Encounter
    // ================================================================
    println!("🛡️  PHASE 4: Replacement Swap Mid-Encounter");
    println!("─────────────────────────────────────────────────────\n");

    let granted = session
        .acquire(EquipRef::Template(TemplateId(2)), 1)
        .expect("acquire should succeed");
    let shield = granted[0];
    // The allocator never reuses ids, even after a retirement.
    assert_eq!(shield, EquipRef::Instance(InstanceId(10_001)));

    session.equip(rei, 1, Some(shield)).expect("equip should succeed");
    assert_eq!(session.state().roster.actor(rei).unwrap().bonuses.defense, 3);

    println!("✓ Oak Shield acquired as instance {} and equipped", InstanceId(10_001));
    println!("  • Defense bonus: +3\n");

    session.begin_encounter();

    // The ordinary path is locked during an encounter.
    let err = session.equip(rei, 1, None).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Equip(EquipError::EncounterLocked)
    ));
    println!("✓ Ordinary unequip rejected mid-encounter (EncounterLocked)\n");

    // One hit wears the 1-durability shield to 0; the forced swap bypasses
    // the encounter lock.
    session
        .dispatch(&CombatEvent::DamageTaken {
            actor: rei,
            amount: 6,
            source: None,
        })
        .expect("dispatch should succeed");

    let member = session.state().roster.actor(rei).unwrap();
    assert_eq!(
        member.slot(1).unwrap().item,
        Some(EquipRef::Template(TemplateId(3)))
    );
    assert_eq!(member.bonuses.defense, 1);
    assert!(session.state().registry.is_empty());
    assert_eq!(sink.drain(), vec!["Rei's Oak Shield broke!"]);

    println!("✓ Shield broke on the hit and degraded:");
    println!("  • Cracked Shield seated in its place (forced swap)");
    println!("  • Defense bonus 3 → 1");
    println!("  • Message: \"Rei's Oak Shield broke!\"\n");

    session.end_encounter();

    // ================================================================
    // PHASE 5: Save / Restore Identity
    // ================================================================
    println!("💾 PHASE 5: Save and Restore");
    println!("─────────────────────────────────────────────────────\n");

    session.save(1).expect("save should succeed");

    let granted = session
        .acquire(EquipRef::Template(TemplateId(1)), 1)
        .expect("acquire should succeed");
    assert_eq!(granted[0], EquipRef::Instance(InstanceId(10_002)));
    println!("✓ Post-save acquisition minted instance {}", InstanceId(10_002));

    session.restore(1).expect("restore should succeed");
    assert!(session.state().registry.is_empty());
    assert!(!session.in_encounter());

    // The allocator position came back with the snapshot: the next mint
    // reuses nothing from before the save and nothing after it.
    let granted = session
        .acquire(EquipRef::Template(TemplateId(1)), 1)
        .expect("acquire should succeed");
    assert_eq!(granted[0], EquipRef::Instance(InstanceId(10_002)));

    println!("✓ Restore replaced the state wholesale");
    println!("✓ Allocator restored with the snapshot: next mint is {} again\n", InstanceId(10_002));

    // ================================================================
    // PHASE 6: Test Summary
    // ================================================================
    println!("════════════════════════════════════════════════════════");
    println!("  TEST COMPLETE - All Phases Successful!");
    println!("════════════════════════════════════════════════════════\n");

    println!("✅ Verified Systems:");
    println!("  • Content loading (RON catalogs through the oracle manager)");
    println!("  • Individuation on acquire (ids from the 10000 floor)");
    println!("  • Equip bonuses and stock bookkeeping");
    println!("  • Wear through ActionUsed and DamageTaken events");
    println!("  • Breakage without replacement (seat emptied, instance retired)");
    println!("  • Breakage with replacement (forced swap past the encounter lock)");
    println!("  • Player-facing breakage messages through the sink");
    println!("  • Save/restore with a stable id allocator");
    println!("\n════════════════════════════════════════════════════════\n");
}

/// Ordinary equipment stacks and never individuates.
#[test]
fn test_ordinary_stock_stays_stacked() {
    let (mut session, _sink, _saves) = session_fixture();

    let granted = session
        .acquire(EquipRef::Template(TemplateId(3)), 5)
        .expect("acquire should succeed");
    assert_eq!(granted, vec![EquipRef::Template(TemplateId(3))]);
    assert_eq!(
        session.state().party.count(EquipRef::Template(TemplateId(3))),
        5
    );
    assert!(session.state().registry.is_empty());

    session.discard(EquipRef::Template(TemplateId(3)), 2);
    assert_eq!(
        session.state().party.count(EquipRef::Template(TemplateId(3))),
        3
    );

    println!("✓ Ordinary templates stack by count without minting instances");
}

/// Wear from damage only applies while something breakable is seated.
#[test]
fn test_unknown_actor_dispatch_is_harmless() {
    let (mut session, sink, _saves) = session_fixture();

    session
        .dispatch(&CombatEvent::DamageTaken {
            actor: ActorId(42),
            amount: 10,
            source: Some(ActorId(1)),
        })
        .expect("dispatch should succeed");

    assert!(sink.messages().is_empty());
    assert!(session.state().registry.is_empty());

    println!("✓ Events for unknown actors fall through without effect");
}
