//! Strongly connected components of a relation graph.
//!
//! Nodes are dense indices `0..n`. Components are found with Tarjan's
//! algorithm driven by an explicit frame stack, so arbitrarily long paths do
//! not grow the call stack. Roots are tried in index order and components are
//! emitted as they complete; nodes within a component are listed in the
//! order they were first reached.

use smallvec::SmallVec;

/// Successor lists of a directed graph over `0..n`.
#[derive(Debug, Clone)]
pub(crate) struct RelationGraph {
    adjacency: Vec<SmallVec<[usize; 4]>>,
}

impl RelationGraph {
    /// Records an edge `u -> v` for every ordered pair `(u, v)` of `nodes`,
    /// self-pairs included, for which `related(u, v)` holds.
    pub(crate) fn from_relation<T, F>(nodes: &[&T], mut related: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut adjacency = Vec::with_capacity(nodes.len());
        for source in nodes {
            let mut successors = SmallVec::new();
            for (target_index, target) in nodes.iter().enumerate() {
                if related(*source, *target) {
                    successors.push(target_index);
                }
            }
            adjacency.push(successors);
        }
        Self { adjacency }
    }

    #[cfg(test)]
    fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![SmallVec::new(); node_count];
        for &(source, target) in edges {
            adjacency[source].push(target);
        }
        Self { adjacency }
    }

    /// Number of nodes.
    pub(crate) fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Partitions the nodes into strongly connected components.
    pub(crate) fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let mut walk = Walk::new(self);
        for root in 0..self.len() {
            if matches!(walk.marks[root], Mark::Unvisited) {
                walk.run(root);
            }
        }
        walk.components
    }
}

// =============================================================================
// Tarjan Walk
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Mark {
    Unvisited,
    /// On the component stack, with its discovery number.
    Active(usize),
    /// Assigned to an emitted component.
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    /// Next successor to look at.
    cursor: usize,
    node_id: usize,
    /// Lowest discovery number reachable from this node so far.
    minimum: usize,
    /// Component stack height when this node was pushed.
    stack_length: usize,
}

struct Walk<'g> {
    graph: &'g RelationGraph,
    marks: Vec<Mark>,
    next_id: usize,
    stack: Vec<usize>,
    frames: Vec<Frame>,
    components: Vec<Vec<usize>>,
}

impl<'g> Walk<'g> {
    fn new(graph: &'g RelationGraph) -> Self {
        Self {
            graph,
            marks: vec![Mark::Unvisited; graph.len()],
            next_id: 0,
            stack: Vec::new(),
            frames: Vec::new(),
            components: Vec::new(),
        }
    }

    fn enter(&mut self, node: usize) {
        let node_id = self.next_id;
        self.next_id += 1;
        self.marks[node] = Mark::Active(node_id);
        self.frames.push(Frame {
            node,
            cursor: 0,
            node_id,
            minimum: node_id,
            stack_length: self.stack.len(),
        });
        self.stack.push(node);
    }

    fn run(&mut self, root: usize) {
        self.enter(root);
        while let Some(frame) = self.frames.last_mut() {
            let successors = &self.graph.adjacency[frame.node];
            if let Some(&successor) = successors.get(frame.cursor) {
                frame.cursor += 1;
                match self.marks[successor] {
                    Mark::Unvisited => self.enter(successor),
                    Mark::Active(successor_id) => frame.minimum = frame.minimum.min(successor_id),
                    Mark::Done => {}
                }
            } else {
                let finished = *frame;
                self.frames.pop();
                self.finish(finished);
            }
        }
    }

    fn finish(&mut self, finished: Frame) {
        if finished.node_id == finished.minimum {
            let component = self.stack.split_off(finished.stack_length);
            for &node in &component {
                self.marks[node] = Mark::Done;
            }
            self.components.push(component);
        }
        if let Some(parent) = self.frames.last_mut() {
            parent.minimum = parent.minimum.min(finished.minimum);
        }
    }
}
