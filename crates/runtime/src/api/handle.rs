//! Cloneable façade for issuing commands to the session worker.
//!
//! [`SessionHandle`] hides channel plumbing and offers one async method per
//! session command. Commands from every clone share one queue.
use tokio::sync::{mpsc, oneshot};

use battle_core::{
    CombatLog, Combatant, CustomEnemy, Heal, InstanceId, RolledLoot, SkippedTurn, TurnEnd,
};

use super::errors::{Result, RuntimeError};
use crate::repository::{SavePayload, SaveSlot};
use crate::session::{AttackRequest, NextTurn, OrderMove, TurnReport};
use crate::workers::Command;

/// Client-facing handle to a running battle session.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>) -> Self {
        Self { command_tx }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Spawn an enemy from a template; returns its instance id.
    pub async fn add_enemy(&self, template_id: impl Into<String>) -> Result<InstanceId> {
        let template_id = template_id.into();
        self.request(|reply| Command::AddEnemy { template_id, reply })
            .await?
    }

    pub async fn add_player(&self) -> Result<InstanceId> {
        self.request(|reply| Command::AddPlayer { reply }).await?
    }

    pub async fn add_custom(&self, custom: CustomEnemy) -> Result<InstanceId> {
        self.request(|reply| Command::AddCustom { custom, reply })
            .await?
    }

    pub async fn delete(&self, id: InstanceId) -> Result<Combatant> {
        self.request(|reply| Command::Delete { id, reply }).await?
    }

    pub async fn select(&self, id: InstanceId) -> Result<()> {
        self.request(|reply| Command::Select { id, reply }).await?
    }

    /// Returns false when the combatant could not move further.
    pub async fn move_in_order(&self, id: InstanceId, direction: OrderMove) -> Result<bool> {
        self.request(|reply| Command::MoveInOrder {
            id,
            direction,
            reply,
        })
        .await
    }

    /// Start a combatant's turn: guard reset, DOT, draw, auto-guard.
    pub async fn enemy_turn(&self, id: InstanceId) -> Result<TurnReport> {
        self.request(|reply| Command::EnemyTurn { id, reply }).await?
    }

    pub async fn enemy_turn_no_draw(&self, id: InstanceId) -> Result<SkippedTurn> {
        self.request(|reply| Command::EnemyTurnNoDraw { id, reply })
            .await?
    }

    pub async fn end_turn(&self, id: InstanceId) -> Result<TurnEnd> {
        self.request(|reply| Command::EndTurn { id, reply }).await?
    }

    /// Close any open turn and advance the selection.
    pub async fn next(&self) -> Result<NextTurn> {
        self.request(|reply| Command::Next { reply }).await
    }

    pub async fn apply_attack(&self, id: InstanceId, request: AttackRequest) -> Result<CombatLog> {
        self.request(|reply| Command::Attack { id, request, reply })
            .await?
    }

    pub async fn apply_heal(&self, id: InstanceId, heal: Heal) -> Result<CombatLog> {
        self.request(|reply| Command::Heal { id, heal, reply })
            .await?
    }

    pub async fn set_loot(&self, id: InstanceId, loot: RolledLoot) -> Result<()> {
        self.request(|reply| Command::SetLoot { id, loot, reply })
            .await?
    }

    /// Query the current session state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SavePayload> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Write a timestamped manual save; returns the slot it landed in.
    pub async fn save_manual(&self, name: impl Into<String>) -> Result<SaveSlot> {
        let name = name.into();
        self.request(|reply| Command::SaveManual { name, reply })
            .await?
    }

    pub async fn list_saves(&self) -> Result<Vec<SaveSlot>> {
        self.request(|reply| Command::ListSaves { reply }).await?
    }

    /// Replace the session state with a stored save.
    pub async fn load_save(&self, slot: SaveSlot) -> Result<()> {
        self.request(|reply| Command::LoadSave { slot, reply })
            .await?
    }
}
