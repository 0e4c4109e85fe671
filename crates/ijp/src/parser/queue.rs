use alloc::collections::VecDeque;

use crate::{error::ResourceLimit, event::ParseEvent};

/// FIFO of events waiting to be drained by the consumer.
#[derive(Debug)]
pub(crate) struct EventQueue {
    events: VecDeque<ParseEvent>,
    limit: Option<usize>,
}

impl EventQueue {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            events: VecDeque::new(),
            limit,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn pop(&mut self) -> Option<ParseEvent> {
        self.events.pop_front()
    }

    pub(crate) fn push(&mut self, event: ParseEvent) -> Result<(), ResourceLimit> {
        if let Some(limit) = self.limit {
            if self.events.len() >= limit {
                return Err(ResourceLimit::QueueFull { limit });
            }
        }
        self.events.push_back(event);
        Ok(())
    }

    pub(crate) fn drain(&mut self) -> alloc::collections::vec_deque::Drain<'_, ParseEvent> {
        self.events.drain(..)
    }
}
