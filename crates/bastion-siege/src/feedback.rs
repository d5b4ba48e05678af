//! Fire-and-forget feedback cues for presentation layers.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use bastion_common::{EntityId, Vec2};

/// Cue kinds raised by the siege core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeedbackCue {
    /// A hostile began an attack windup (animation trigger).
    WindupStarted {
        /// Attacking hostile
        attacker: EntityId,
        /// Attacker position
        position: Vec2,
    },
    /// The home structure took damage.
    StructureHit {
        /// Damaged structure
        structure: EntityId,
        /// Attacking hostile
        attacker: EntityId,
        /// Structure position
        position: Vec2,
        /// Damage applied
        amount: f32,
    },
    /// The player took damage.
    PlayerHit {
        /// Damaged player
        player: EntityId,
        /// Attacking hostile
        attacker: EntityId,
        /// Player position
        position: Vec2,
        /// Damage applied
        amount: f32,
    },
    /// The home structure broke.
    StructureBroken {
        /// Broken structure
        structure: EntityId,
        /// Structure position
        position: Vec2,
    },
}

impl FeedbackCue {
    /// Short label for logs and reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::WindupStarted { .. } => "windup_started",
            Self::StructureHit { .. } => "structure_hit",
            Self::PlayerHit { .. } => "player_hit",
            Self::StructureBroken { .. } => "structure_broken",
        }
    }
}

/// Anything that accepts cues. No return value, no delivery guarantee.
pub trait FeedbackSink {
    /// Raises a cue.
    fn raise(&self, cue: FeedbackCue);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn raise(&self, _cue: FeedbackCue) {}
}

/// Receives dispatched cues.
pub trait FeedbackListener: Send {
    /// Handles a cue.
    fn on_cue(&mut self, cue: &FeedbackCue);
}

impl<F: FnMut(&FeedbackCue) + Send> FeedbackListener for F {
    fn on_cue(&mut self, cue: &FeedbackCue) {
        self(cue);
    }
}

/// Queued feedback channel with fan-out to listeners.
pub struct FeedbackBus {
    sender: Sender<FeedbackCue>,
    receiver: Receiver<FeedbackCue>,
    capacity: usize,
    listeners: Vec<Box<dyn FeedbackListener>>,
}

impl std::fmt::Debug for FeedbackBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackBus")
            .field("pending", &self.receiver.len())
            .field("capacity", &self.capacity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for FeedbackBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl FeedbackBus {
    /// Creates a bus with the given queue capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for `dispatch`.
    pub fn subscribe<L: FeedbackListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Drains pending cues and hands each to every listener.
    ///
    /// Returns the number of cues dispatched.
    pub fn dispatch(&mut self) -> usize {
        let mut count = 0;
        while let Ok(cue) = self.receiver.try_recv() {
            for listener in &mut self.listeners {
                listener.on_cue(&cue);
            }
            count += 1;
        }
        count
    }

    /// Drains pending cues without dispatching.
    pub fn drain(&self) -> Vec<FeedbackCue> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending cues.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the queue capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl FeedbackSink for FeedbackBus {
    fn raise(&self, cue: FeedbackCue) {
        // Non-blocking send - if full, the cue is dropped
        let _ = self.sender.try_send(cue);
    }
}
