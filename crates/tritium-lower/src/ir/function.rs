//! Functions, locals and basic blocks.

use std::fmt;

use super::expr::LocalId;
use super::statement::Statement;
use super::types::TypeKind;

/// Index of a basic block in its function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// Declaration of a local
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDecl {
    /// Type of the local
    pub ty: TypeKind,
    /// Source name, if any
    pub name: Option<String>,
    /// Created by the lowering pass
    pub is_temp: bool,
}

/// A basic block: a straight-line list of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicBlock {
    pub statements: Vec<Statement>,
}

/// A function body
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Name of the function
    pub name: String,
    /// Parameters, as locals
    pub params: Vec<LocalId>,
    /// Return type
    pub ret: TypeKind,
    /// All locals, indexed by [`LocalId`]
    pub locals: Vec<LocalDecl>,
    /// Basic blocks, indexed by [`BlockId`]
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(name: impl Into<String>, ret: TypeKind) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            ret,
            locals: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn add_param(&mut self, name: &str, ty: TypeKind) -> LocalId {
        let local = self.add_local(name, ty);
        self.params.push(local);
        local
    }

    pub fn add_local(&mut self, name: &str, ty: TypeKind) -> LocalId {
        self.push_local(LocalDecl {
            ty,
            name: Some(name.to_string()),
            is_temp: false,
        })
    }

    /// A fresh unnamed temporary.
    pub fn new_temp(&mut self, ty: TypeKind) -> LocalId {
        self.push_local(LocalDecl {
            ty,
            name: None,
            is_temp: true,
        })
    }

    fn push_local(&mut self, decl: LocalDecl) -> LocalId {
        let local = LocalId(self.locals.len() as u32);
        self.locals.push(decl);
        local
    }

    pub fn local_type(&self, local: LocalId) -> Option<&TypeKind> {
        self.locals.get(local.0 as usize).map(|decl| &decl.ty)
    }

    pub fn add_block(&mut self) -> BlockId {
        let block = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::default());
        block
    }

    pub fn block(&self, block: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(block.0 as usize)
    }

    pub fn block_mut(&mut self, block: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(block.0 as usize)
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> {
        (0..self.blocks.len() as u32).map(BlockId)
    }

    /// Append a statement to `block`.
    ///
    /// # Panics
    ///
    /// Panics if `block` was not created by [`Function::add_block`].
    pub fn push(&mut self, block: BlockId, statement: Statement) {
        self.blocks[block.0 as usize].statements.push(statement);
    }

    pub fn temp_count(&self) -> usize {
        self.locals.iter().filter(|decl| decl.is_temp).count()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}: {}", self.locals[param.0 as usize].ty)?;
        }
        writeln!(f, ") -> {} {{", self.ret)?;

        for (index, decl) in self.locals.iter().enumerate() {
            let local = LocalId(index as u32);
            if self.params.contains(&local) {
                continue;
            }
            write!(f, "    let {local}: {};", decl.ty)?;
            if let Some(name) = &decl.name {
                write!(f, " // {name}")?;
            }
            writeln!(f)?;
        }

        for (index, block) in self.blocks.iter().enumerate() {
            writeln!(f, "    {}: {{", BlockId(index as u32))?;
            for statement in &block.statements {
                writeln!(f, "        {statement};")?;
            }
            writeln!(f, "    }}")?;
        }
        write!(f, "}}")
    }
}
