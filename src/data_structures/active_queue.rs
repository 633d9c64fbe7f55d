use std::collections::VecDeque;

/// FIFO queue of active nodes for the label-correcting loop.
///
/// Pushing a node that is already queued is a no-op, so a node waits in the
/// queue at most once no matter how many labels arrive at it meanwhile.
#[derive(Debug, Clone)]
pub struct ActiveQueue {
    /// Nodes in activation order
    queue: VecDeque<usize>,

    /// Membership flag per node
    queued: Vec<bool>,
}

impl ActiveQueue {
    /// Creates an empty queue for `nodes` nodes
    pub fn new(nodes: usize) -> Self {
        ActiveQueue {
            queue: VecDeque::new(),
            queued: vec![false; nodes],
        }
    }

    /// Returns true if no node is active
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of active nodes
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Marks `node` active; returns false if it already was
    pub fn push(&mut self, node: usize) -> bool {
        match self.queued.get_mut(node) {
            Some(flag) if !*flag => {
                *flag = true;
                self.queue.push_back(node);
                true
            }
            _ => false,
        }
    }

    /// Removes the oldest active node
    pub fn pop(&mut self) -> Option<usize> {
        let node = self.queue.pop_front()?;
        self.queued[node] = false;
        Some(node)
    }

    /// Returns true if `node` is waiting in the queue
    pub fn contains(&self, node: usize) -> bool {
        self.queued.get(node).copied().unwrap_or(false)
    }
}
