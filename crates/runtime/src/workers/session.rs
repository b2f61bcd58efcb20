//! Session worker that owns the authoritative [`BattleSession`].
//!
//! Receives commands from [`crate::SessionHandle`], applies them to the
//! session, and autosaves the result to the session's current slot.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use battle_core::{
    CombatLog, Combatant, CustomEnemy, Heal, InstanceId, RolledLoot, SkippedTurn, TurnEnd,
};

use crate::api::{Result, RuntimeError};
use crate::repository::{SavePayload, SaveRepository, SaveSlot};
use crate::session::{AttackRequest, BattleSession, NextTurn, OrderMove, TurnReport};

/// Commands that can be sent to the session worker.
pub enum Command {
    AddEnemy {
        template_id: String,
        reply: oneshot::Sender<Result<InstanceId>>,
    },
    AddPlayer {
        reply: oneshot::Sender<Result<InstanceId>>,
    },
    AddCustom {
        custom: CustomEnemy,
        reply: oneshot::Sender<Result<InstanceId>>,
    },
    Delete {
        id: InstanceId,
        reply: oneshot::Sender<Result<Combatant>>,
    },
    Select {
        id: InstanceId,
        reply: oneshot::Sender<Result<()>>,
    },
    MoveInOrder {
        id: InstanceId,
        direction: OrderMove,
        reply: oneshot::Sender<bool>,
    },
    EnemyTurn {
        id: InstanceId,
        reply: oneshot::Sender<Result<TurnReport>>,
    },
    EnemyTurnNoDraw {
        id: InstanceId,
        reply: oneshot::Sender<Result<SkippedTurn>>,
    },
    EndTurn {
        id: InstanceId,
        reply: oneshot::Sender<Result<TurnEnd>>,
    },
    Next {
        reply: oneshot::Sender<NextTurn>,
    },
    Attack {
        id: InstanceId,
        request: AttackRequest,
        reply: oneshot::Sender<Result<CombatLog>>,
    },
    Heal {
        id: InstanceId,
        heal: Heal,
        reply: oneshot::Sender<Result<CombatLog>>,
    },
    SetLoot {
        id: InstanceId,
        loot: RolledLoot,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current session state (read-only).
    Snapshot {
        reply: oneshot::Sender<SavePayload>,
    },
    SaveManual {
        name: String,
        reply: oneshot::Sender<Result<SaveSlot>>,
    },
    ListSaves {
        reply: oneshot::Sender<Result<Vec<SaveSlot>>>,
    },
    LoadSave {
        slot: SaveSlot,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Background task that processes session commands.
pub struct SessionWorker {
    session: BattleSession,
    repository: Option<Arc<dyn SaveRepository>>,
    command_rx: mpsc::Receiver<Command>,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(
        session: BattleSession,
        repository: Option<Arc<dyn SaveRepository>>,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            session,
            repository,
            command_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("Session worker for {} stopped", self.session.sid());
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::AddEnemy { template_id, reply } => {
                let result = self.session.add_enemy(&template_id);
                self.reply(reply, result);
            }
            Command::AddPlayer { reply } => {
                let result = self.session.add_player();
                self.reply(reply, result);
            }
            Command::AddCustom { custom, reply } => {
                let result = self.session.add_custom(&custom);
                self.reply(reply, result);
            }
            Command::Delete { id, reply } => {
                let result = self.session.delete(id.as_str());
                self.reply(reply, result);
            }
            Command::Select { id, reply } => {
                let result = self.session.select(id.as_str());
                self.reply(reply, result);
            }
            Command::MoveInOrder {
                id,
                direction,
                reply,
            } => {
                if self.session.move_in_order(id.as_str(), direction) {
                    self.autosave();
                    let _ = reply.send(true);
                } else {
                    let _ = reply.send(false);
                }
            }
            Command::EnemyTurn { id, reply } => {
                let result = self.session.enemy_turn(id.as_str());
                self.reply(reply, result);
            }
            Command::EnemyTurnNoDraw { id, reply } => {
                let result = self.session.enemy_turn_no_draw(id.as_str());
                self.reply(reply, result);
            }
            Command::EndTurn { id, reply } => {
                let result = self.session.end_turn(id.as_str());
                self.reply(reply, result);
            }
            Command::Next { reply } => {
                let next = self.session.next();
                self.autosave();
                let _ = reply.send(next);
            }
            Command::Attack { id, request, reply } => {
                let result = self.session.apply_attack(id.as_str(), request);
                self.reply(reply, result);
            }
            Command::Heal { id, heal, reply } => {
                let result = self.session.apply_heal(id.as_str(), heal);
                self.reply(reply, result);
            }
            Command::SetLoot { id, loot, reply } => {
                let result = self.session.set_loot(id.as_str(), loot);
                self.reply(reply, result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.session.to_payload());
            }
            Command::SaveManual { name, reply } => {
                let _ = reply.send(self.save_manual(&name));
            }
            Command::ListSaves { reply } => {
                let result = self
                    .repository()
                    .and_then(|repository| repository.list_manual());
                let _ = reply.send(result);
            }
            Command::LoadSave { slot, reply } => {
                let result = self.load_save(slot);
                self.reply(reply, result);
            }
        }
    }

    /// Autosaves after a successful mutation and logs rejected ones.
    fn reply<T>(&self, reply: oneshot::Sender<Result<T>>, result: Result<T>) {
        match &result {
            Ok(_) => self.autosave(),
            Err(error) => warn!("Rejected command: {}", error),
        }
        let _ = reply.send(result);
    }

    fn repository(&self) -> Result<&Arc<dyn SaveRepository>> {
        self.repository.as_ref().ok_or(RuntimeError::NoRepository)
    }

    fn autosave(&self) {
        let Some(repository) = &self.repository else {
            return;
        };
        let slot = SaveSlot::Current(self.session.sid().to_owned());
        if let Err(error) = repository.save(&slot, &self.session.to_payload()) {
            warn!("Autosave to {} failed: {}", slot, error);
        }
    }

    fn save_manual(&self, name: &str) -> Result<SaveSlot> {
        let repository = self.repository()?;
        let slot = SaveSlot::manual_now(name);
        repository.save(&slot, &self.session.to_payload())?;
        tracing::info!("Saved session {} to {}", self.session.sid(), slot);
        Ok(slot)
    }

    fn load_save(&mut self, slot: SaveSlot) -> Result<()> {
        let payload = self
            .repository()?
            .load(&slot)?
            .ok_or_else(|| RuntimeError::SaveNotFound(slot.clone()))?;
        self.session.restore(payload)?;
        tracing::info!("Loaded {} into session {}", slot, self.session.sid());
        Ok(())
    }
}
