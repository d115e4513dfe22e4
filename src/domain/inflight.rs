use super::task::TaskId;
use std::collections::HashMap;

/// Sequencing token handed out when a request is dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    Load(u64),
    Create(u64),
    Task { id: TaskId, seq: u64 },
}

/// Tracks outstanding requests so overlapping ones resolve deterministically.
///
/// Only the most recently issued ticket for a task (or the most recent load) is
/// honoured when its response comes back; older responses are stale.
#[derive(Debug, Default)]
pub struct InFlight {
    next_seq: u64,
    latest_load: Option<u64>,
    latest_by_task: HashMap<TaskId, u64>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    pub fn begin_load(&mut self) -> Ticket {
        let seq = self.bump();
        self.latest_load = Some(seq);
        Ticket::Load(seq)
    }

    /// Creates never go stale; the ticket only tells submissions apart
    pub fn begin_create(&mut self) -> Ticket {
        Ticket::Create(self.bump())
    }

    pub fn begin_task(&mut self, id: &TaskId) -> Ticket {
        let seq = self.bump();
        self.latest_by_task.insert(id.clone(), seq);
        Ticket::Task { id: id.clone(), seq }
    }

    /// Retire a ticket. Returns true if its response should be applied.
    pub fn settle(&mut self, ticket: &Ticket) -> bool {
        match ticket {
            Ticket::Load(seq) => {
                if self.latest_load == Some(*seq) {
                    self.latest_load = None;
                    true
                } else {
                    false
                }
            }
            Ticket::Create(_) => true,
            Ticket::Task { id, seq } => {
                if self.latest_by_task.get(id) == Some(seq) {
                    self.latest_by_task.remove(id);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Drop any outstanding ticket for a task, so its responses read as stale
    pub fn forget(&mut self, id: &TaskId) {
        self.latest_by_task.remove(id);
    }

    pub fn is_loading(&self) -> bool {
        self.latest_load.is_some()
    }

    pub fn is_pending(&self, id: &TaskId) -> bool {
        self.latest_by_task.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.latest_by_task.len()
    }
}
