//! In-place statement editing.

use super::expr::LocalId;
use super::function::{BlockId, Function};
use super::statement::Statement;
use super::types::TypeKind;

/// The mutation primitives the rewrite pass needs from a host IR.
///
/// A sink is positioned at one statement. Inserted statements go before it;
/// replacing or removing affects only it.
pub trait StatementSink {
    /// Declare a fresh temporary of type `ty`.
    fn create_temp(&mut self, ty: TypeKind) -> LocalId;

    fn local_type(&self, local: LocalId) -> Option<&TypeKind>;

    /// Insert `statement` immediately before the current statement.
    fn insert_before(&mut self, statement: Statement);

    fn replace(&mut self, statement: Statement);

    fn remove(&mut self);
}

/// Walks the statements of one block of a [`Function`].
pub struct BlockCursor<'f> {
    function: &'f mut Function,
    block: usize,
    index: usize,
    removed: bool,
}

impl<'f> BlockCursor<'f> {
    pub fn new(function: &'f mut Function, block: BlockId) -> Option<Self> {
        let block = block.0 as usize;
        if block >= function.blocks.len() {
            return None;
        }
        Some(Self {
            function,
            block,
            index: 0,
            removed: false,
        })
    }

    pub fn current(&self) -> Option<&Statement> {
        if self.removed {
            return None;
        }
        self.function.blocks[self.block].statements.get(self.index)
    }

    /// Move to the next statement.
    pub fn advance(&mut self) {
        if self.removed {
            self.removed = false;
        } else {
            self.index += 1;
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function.name
    }
}

impl StatementSink for BlockCursor<'_> {
    fn create_temp(&mut self, ty: TypeKind) -> LocalId {
        self.function.new_temp(ty)
    }

    fn local_type(&self, local: LocalId) -> Option<&TypeKind> {
        self.function.local_type(local)
    }

    fn insert_before(&mut self, statement: Statement) {
        self.function.blocks[self.block]
            .statements
            .insert(self.index, statement);
        self.index += 1;
    }

    fn replace(&mut self, statement: Statement) {
        if let Some(slot) = self.function.blocks[self.block].statements.get_mut(self.index) {
            *slot = statement;
        }
    }

    fn remove(&mut self) {
        let statements = &mut self.function.blocks[self.block].statements;
        if self.index < statements.len() {
            statements.remove(self.index);
            self.removed = true;
        }
    }
}
