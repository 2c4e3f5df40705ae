//! Per-node bookkeeping.

use std::fmt;

use tritium_core::Operation;

use crate::ir::BlockId;

/// Where a candidate node stands.
///
/// Every candidate starts `Unvisited`, is `Visiting` while its operands are
/// lowered, and ends in exactly one of the three terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    Unvisited,
    Visiting,
    /// Replaced by a constant or by one of its operands
    Folded,
    /// Replaced by a helper call
    LoweredToCall,
    /// Kept as is
    LeftUnresolved,
}

impl NodeState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            NodeState::Folded | NodeState::LoweredToCall | NodeState::LeftUnresolved
        )
    }
}

/// The statement a candidate was found in, counted before any insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub block: BlockId,
    pub statement: usize,
}

/// One candidate node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub function: String,
    pub location: Location,
    pub op: Operation,
    pub state: NodeState,
}

/// Records candidate sites in detection order.
#[derive(Debug, Default, Clone)]
pub struct SiteTracker {
    sites: Vec<Site>,
}

impl SiteTracker {
    /// Register a candidate and mark it as being visited.
    pub fn begin(&mut self, function: &str, location: Location, op: Operation) -> usize {
        self.sites.push(Site {
            function: function.to_string(),
            location,
            op,
            state: NodeState::Unvisited,
        });
        let id = self.sites.len() - 1;
        self.transition(id, NodeState::Visiting);
        id
    }

    pub fn finish(&mut self, id: usize, state: NodeState) {
        debug_assert!(state.is_terminal());
        self.transition(id, state);
    }

    fn transition(&mut self, id: usize, state: NodeState) {
        if let Some(site) = self.sites.get_mut(id) {
            debug_assert!(
                matches!(
                    (site.state, state),
                    (NodeState::Unvisited, NodeState::Visiting) | (NodeState::Visiting, _)
                ),
                "invalid transition {} -> {state} for site {id}",
                site.state
            );
            site.state = state;
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Sites that never reached a terminal state.
    pub fn pending(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter().filter(|site| !site.state.is_terminal())
    }

    pub fn clear(&mut self) {
        self.sites.clear();
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeState::Unvisited => "unvisited",
            NodeState::Visiting => "visiting",
            NodeState::Folded => "folded",
            NodeState::LoweredToCall => "lowered",
            NodeState::LeftUnresolved => "unresolved",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}[{}] {} {}",
            self.function, self.location.block, self.location.statement, self.op, self.state
        )
    }
}
