//! The waiting line -- clients, priority classes, and the rotation policy.
//!
//! Priority clients advance at a fixed 2:1 interleave over normal clients;
//! a client is served once rotation carries it to position 0.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum client name length, in Unicode code points.
pub const MAX_NAME_LEN: usize = 20;

/// Priority clients dequeued per normal client in one rotation pass.
const PRIORITY_RATIO: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("name exceeds maximum allowed length of {max} characters")]
    NameTooLong { max: usize },
    #[error("no client found at position {position}")]
    PositionOutOfRange { position: i64 },
}

/// Service class of a waiting client. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityClass {
    #[serde(rename = "N")]
    Normal,
    #[serde(rename = "P")]
    Priority,
}

/// One person waiting for service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    pub priority_class: PriorityClass,
    pub served: bool,
    /// 1-based place among not-yet-served clients, in queue order.
    pub position: Option<u32>,
    pub arrival_timestamp: DateTime<Utc>,
}

/// Owner of the ordered waiting line.
///
/// Positions are renumbered 1..N after every structural change, and served
/// clients are purged before `rotate` returns, so the stored list only
/// holds waiting clients between calls.
#[derive(Debug, Default)]
pub struct QueueManager {
    clients: Vec<Client>,
}

impl QueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clients in the stored list.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Append a new client at the tail of the line.
    pub fn add(
        &mut self,
        name: &str,
        priority_class: PriorityClass,
    ) -> Result<Client, QueueError> {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(QueueError::NameTooLong { max: MAX_NAME_LEN });
        }
        let client = Client {
            name: name.to_owned(),
            priority_class,
            served: false,
            position: Some(self.clients.len() as u32 + 1),
            arrival_timestamp: Utc::now(),
        };
        self.clients.push(client.clone());
        Ok(client)
    }

    /// Waiting clients in queue order, positions renumbered 1..N.
    ///
    /// Renumbering is a side effect; calling this twice without an
    /// intervening mutation returns identical results.
    pub fn list_waiting(&mut self) -> Vec<Client> {
        self.renumber();
        self.clients.iter().filter(|c| !c.served).cloned().collect()
    }

    /// Look up a client by 1-based position in the stored list.
    pub fn get_by_position(&self, position: i64) -> Result<Client, QueueError> {
        self.index_of(position).map(|i| self.clients[i].clone())
    }

    /// Remove the client at a 1-based position and renumber the rest.
    pub fn remove_by_position(&mut self, position: i64) -> Result<Client, QueueError> {
        let idx = self.index_of(position)?;
        let removed = self.clients.remove(idx);
        self.renumber();
        Ok(removed)
    }

    /// Advance the line by one service cycle.
    ///
    /// Waiting clients are reordered at the 2:1 priority-to-normal
    /// interleave, every position drops by one, and clients reaching
    /// position 0 leave the line as served. Returns the retained waiting
    /// sequence, renumbered.
    pub fn rotate(&mut self) -> Vec<Client> {
        let mut priority: VecDeque<Client> = VecDeque::new();
        let mut normal: VecDeque<Client> = VecDeque::new();
        for client in self.clients.drain(..).filter(|c| !c.served) {
            match client.priority_class {
                PriorityClass::Priority => priority.push_back(client),
                PriorityClass::Normal => normal.push_back(client),
            }
        }

        let mut rotated = Vec::with_capacity(priority.len() + normal.len());
        let mut priority_streak = 0;
        loop {
            let next = if priority_streak < PRIORITY_RATIO && !priority.is_empty() {
                priority_streak += 1;
                priority.pop_front()
            } else if priority_streak == PRIORITY_RATIO && !normal.is_empty() {
                priority_streak = 0;
                normal.pop_front()
            } else if !priority.is_empty() {
                // Normal lane is empty but the streak hit its cap; keep
                // draining priority rather than stalling.
                priority_streak += 1;
                priority.pop_front()
            } else {
                normal.pop_front()
            };
            match next {
                Some(client) => rotated.push(client),
                None => break,
            }
        }

        for client in &mut rotated {
            if let Some(place) = client.position.as_mut() {
                // Positions are 1..N on entry, so this never hits zero twice.
                *place = place.saturating_sub(1);
                if *place == 0 {
                    client.served = true;
                }
            }
        }

        self.clients = rotated.into_iter().filter(|c| !c.served).collect();
        self.renumber();
        self.clients.clone()
    }

    fn index_of(&self, position: i64) -> Result<usize, QueueError> {
        if position <= 0 || position as usize > self.clients.len() {
            return Err(QueueError::PositionOutOfRange { position });
        }
        Ok(position as usize - 1)
    }

    fn renumber(&mut self) {
        for (idx, client) in self.clients.iter_mut().filter(|c| !c.served).enumerate() {
            client.position = Some(idx as u32 + 1);
        }
    }
}
