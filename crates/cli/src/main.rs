//! Scripted battle demo.
//!
//! Loads the content under `BATTLE_DATA_DIR`, spawns the enemy named by
//! `BATTLE_ENEMY` (default `goblin`) and walks it through one full turn and
//! the start of the next, printing every log the engine returns. The session
//! autosaves to `BATTLE_SAVE_DIR` as it goes.
//!
//! ```bash
//! BATTLE_ENEMY=orc BATTLE_SEED=7 cargo run -p battle-cli
//! ```

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use battle_content::ContentFactory;
use battle_core::{Catalog, CombatLog, Combatant, InstanceId, TurnHookLog};
use battle_runtime::{
    AttackRequest, BattleSession, FileSaveRepository, RuntimeConfig, SessionHandle,
    SessionRuntime,
};

const ATTACK_DAMAGE: i32 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    let enemy = std::env::var("BATTLE_ENEMY").unwrap_or_else(|_| "goblin".to_owned());

    let factory = ContentFactory::new(&config.data_dir);
    let battle_config = factory.load_config()?;
    let catalog = Arc::new(factory.load_catalog(&battle_config)?);

    if catalog.template(&enemy).is_none() {
        let known: Vec<&str> = catalog.templates().map(|t| t.id.as_str()).collect();
        bail!("unknown enemy id '{enemy}'. Available: {known:?}");
    }

    let seed = config.seed.unwrap_or(battle_config.seed);
    let session = BattleSession::new(config.session_id.clone(), catalog.clone(), seed);
    let repository = FileSaveRepository::new(&config.save_dir)
        .with_context(|| format!("Failed to open save dir {}", config.save_dir.display()))?;
    tracing::info!("Autosaving to {}", repository.base_dir().display());

    let runtime = SessionRuntime::builder()
        .config(config)
        .session(session)
        .repository(Arc::new(repository))
        .build()
        .await?;

    run_demo(&runtime.handle(), &catalog, &enemy).await?;

    runtime.shutdown().await?;
    println!("\nOK");
    Ok(())
}

async fn run_demo(handle: &SessionHandle, catalog: &Catalog, enemy: &str) -> Result<()> {
    let id = handle.add_enemy(enemy).await?;
    let spawned = combatant(handle, &id).await?;

    println!("=== SPAWNED ===");
    println!(
        "template_id={} name={} image={}",
        spawned.template_id,
        spawned.name,
        spawned.image.as_deref().unwrap_or("-")
    );
    println!("{}", vitals(&spawned));

    println!("\n=== ENEMY TURN (guard reset, draw, auto-guard) ===");
    let report = handle.enemy_turn(id.clone()).await?;
    print_hook(&report.turn.start);
    println!("drawn ids: {:?}", report.turn.draw.drawn);
    println!("drawn text: {}", catalog.hand_text(&report.turn.draw.drawn, 6));
    let guard_added: u32 = report
        .guard_applied
        .iter()
        .map(|log| log.guard_after - log.guard_before)
        .sum();
    println!("auto-guard added from draw: {guard_added}");
    println!("after draw: {}", vitals(&combatant(handle, &id).await?));

    println!("\n=== APPLY ATTACK ({ATTACK_DAMAGE}) ===");
    let log = handle
        .apply_attack(id.clone(), AttackRequest::new(ATTACK_DAMAGE))
        .await?;
    print_attack(&log);

    println!("\n=== END TURN ===");
    let ended = handle.end_turn(id.clone()).await?;
    let after = combatant(handle, &id).await?;
    println!(
        "discarded={} hand={} discard={} draw={}",
        ended.discarded,
        after.deck_state.hand.len(),
        after.deck_state.discard_pile.len(),
        after.deck_state.draw_pile.len()
    );

    println!("\n=== NEXT TURN START ===");
    let report = handle.enemy_turn(id.clone()).await?;
    print_hook(&report.turn.start);
    println!("drawn text: {}", catalog.hand_text(&report.turn.draw.drawn, 6));
    handle.next().await?;

    Ok(())
}

async fn combatant(handle: &SessionHandle, id: &InstanceId) -> Result<Combatant> {
    handle
        .snapshot()
        .await?
        .enemies
        .into_iter()
        .find(|c| c.instance_id == *id)
        .with_context(|| format!("combatant {id} vanished from the session"))
}

fn vitals(c: &Combatant) -> String {
    format!(
        "HP {}/{} | Armor {}/{} | Magic {}/{} | Guard {} (base {}) | Move {} | Statuses {}",
        c.hp_current,
        c.hp_max,
        c.armor_current,
        c.armor_max,
        c.magic_armor_current,
        c.magic_armor_max,
        c.guard_current,
        c.guard_base,
        c.effective_movement(),
        c.statuses
    )
}

fn print_hook(log: &TurnHookLog) {
    println!(
        "guard: {} -> {} | hp: {} -> {} | dot={}",
        log.guard_before, log.guard_after, log.hp_before, log.hp_after, log.dot_damage
    );
}

fn print_attack(log: &CombatLog) {
    println!(
        "in={} guarded_total={} damage_to_hp={} HP {}->{} | Guard {}->{} | Armor {}->{} | Magic {}->{}",
        log.input_damage,
        log.guarded_total,
        log.damage_to_hp,
        log.hp_before,
        log.hp_after,
        log.guard_before,
        log.guard_after,
        log.armor_before,
        log.armor_after,
        log.magic_armor_before,
        log.magic_armor_after
    );
}
