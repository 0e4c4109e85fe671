use alloc::{sync::Arc, vec::Vec};

use crate::{
    error::ResourceLimit,
    path::{Path, PathComponent},
};

/// Stack entry – one per open container
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Frame {
    Array {
        next_index: usize, // slot for the next element
    },
    Object {
        pending_key: Option<Arc<str>>, // key waiting for its value
    },
}

impl Frame {
    pub(crate) fn new_array_frame() -> Self {
        Frame::Array { next_index: 0 }
    }

    pub(crate) fn new_object_frame() -> Self {
        Frame::Object { pending_key: None }
    }

    /// The bracket that closes this container.
    pub(crate) fn close_char(&self) -> char {
        match self {
            Frame::Array { .. } => ']',
            Frame::Object { .. } => '}',
        }
    }

    /// The path component of the slot currently being filled, if any.
    fn path_component(&self) -> Option<PathComponent> {
        match self {
            Frame::Array { next_index } => Some(PathComponent::Index(*next_index)),
            Frame::Object { pending_key } => pending_key.clone().map(PathComponent::Key),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    stack: Vec<Frame>,
    max_depth: Option<usize>,
}

impl FrameStack {
    pub(crate) fn new(max_depth: Option<usize>) -> Self {
        Self {
            stack: Vec::with_capacity(16),
            max_depth,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn last(&self) -> Option<&Frame> {
        self.stack.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Frame> {
        self.stack.last_mut()
    }

    pub(crate) fn push(&mut self, frame: Frame) -> Result<(), ResourceLimit> {
        if let Some(limit) = self.max_depth {
            if self.stack.len() >= limit {
                return Err(ResourceLimit::DepthExceeded { limit });
            }
        }
        self.stack.push(frame);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.stack.pop()
    }

    /// Path of the slot being filled. Stops at an object still waiting for
    /// its key, so between members the path names the object itself.
    pub(crate) fn path(&self) -> Path {
        self.stack
            .iter()
            .map_while(Frame::path_component)
            .collect()
    }
}
