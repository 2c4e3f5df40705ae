//! The closed set of recognised ternary operations.

use std::fmt;

/// Feature category an operation belongs to. Each category can be switched
/// off independently in the lowering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Arith,
    Logic,
    Cmp,
    Shift,
    Conv,
    Mem,
}

/// What an operation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// A packed ternary value of the operation's width.
    Ternary,
    /// A plain signed integer.
    Integer,
    /// A floating point value.
    Float,
    /// The same type as the operand at this index.
    Operand(usize),
    /// The pointee type of the first operand.
    Pointee,
    /// Nothing.
    Unit,
}

/// Prefix of the builtin functions the lowering pass recognises by name.
pub const BUILTIN_PREFIX: &str = "__builtin_ternary_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Neg,
    Not,
    And,
    Or,
    Xor,
    Cmp,
    CmpLt,
    CmpEq,
    CmpGt,
    CmpNeq,
    Shl,
    Shr,
    Rol,
    Ror,
    Select,
    Tb2t,
    Tt2b,
    T2f,
    F2t,
    Tmin,
    Tmax,
    Tmaj,
    Tlimp,
    Tquant,
    Tnot,
    Tinv,
    Tmuladd,
    Tround,
    Tnormalize,
    Tbias,
    Tmux,
    Tequiv,
    Txor,
    Tnet,
    Tbranch,
    Tsignjmp,
    Load,
    Store,
}

impl Operation {
    pub const ALL: &'static [Operation] = &[
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Mod,
        Operation::Neg,
        Operation::Not,
        Operation::And,
        Operation::Or,
        Operation::Xor,
        Operation::Cmp,
        Operation::CmpLt,
        Operation::CmpEq,
        Operation::CmpGt,
        Operation::CmpNeq,
        Operation::Shl,
        Operation::Shr,
        Operation::Rol,
        Operation::Ror,
        Operation::Select,
        Operation::Tb2t,
        Operation::Tt2b,
        Operation::T2f,
        Operation::F2t,
        Operation::Tmin,
        Operation::Tmax,
        Operation::Tmaj,
        Operation::Tlimp,
        Operation::Tquant,
        Operation::Tnot,
        Operation::Tinv,
        Operation::Tmuladd,
        Operation::Tround,
        Operation::Tnormalize,
        Operation::Tbias,
        Operation::Tmux,
        Operation::Tequiv,
        Operation::Txor,
        Operation::Tnet,
        Operation::Tbranch,
        Operation::Tsignjmp,
        Operation::Load,
        Operation::Store,
    ];

    /// The name used in helper symbols and builtin names.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
            Operation::Mod => "mod",
            Operation::Neg => "neg",
            Operation::Not => "not",
            Operation::And => "and",
            Operation::Or => "or",
            Operation::Xor => "xor",
            Operation::Cmp => "cmp",
            Operation::CmpLt => "cmplt",
            Operation::CmpEq => "cmpeq",
            Operation::CmpGt => "cmpgt",
            Operation::CmpNeq => "cmpneq",
            Operation::Shl => "shl",
            Operation::Shr => "shr",
            Operation::Rol => "rol",
            Operation::Ror => "ror",
            Operation::Select => "select",
            Operation::Tb2t => "tb2t",
            Operation::Tt2b => "tt2b",
            Operation::T2f => "t2f",
            Operation::F2t => "f2t",
            Operation::Tmin => "tmin",
            Operation::Tmax => "tmax",
            Operation::Tmaj => "tmaj",
            Operation::Tlimp => "tlimp",
            Operation::Tquant => "tquant",
            Operation::Tnot => "tnot",
            Operation::Tinv => "tinv",
            Operation::Tmuladd => "tmuladd",
            Operation::Tround => "tround",
            Operation::Tnormalize => "tnormalize",
            Operation::Tbias => "tbias",
            Operation::Tmux => "tmux",
            Operation::Tequiv => "tequiv",
            Operation::Txor => "txor",
            Operation::Tnet => "tnet",
            Operation::Tbranch => "tbranch",
            Operation::Tsignjmp => "tsignjmp",
            Operation::Load => "load",
            Operation::Store => "store",
        }
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// Look up a builtin such as `__builtin_ternary_add`.
    pub fn from_builtin_name(name: &str) -> Option<Operation> {
        name.strip_prefix(BUILTIN_PREFIX)
            .and_then(Operation::from_name)
    }

    pub fn builtin_name(self) -> String {
        format!("{BUILTIN_PREFIX}{}", self.name())
    }

    pub fn arity(self) -> usize {
        match self {
            Operation::Neg
            | Operation::Not
            | Operation::Tnot
            | Operation::Tinv
            | Operation::Tnormalize
            | Operation::Tnet
            | Operation::Tb2t
            | Operation::Tt2b
            | Operation::T2f
            | Operation::F2t
            | Operation::Load => 1,
            Operation::Select | Operation::Tmaj | Operation::Tmuladd => 3,
            Operation::Tmux | Operation::Tbranch | Operation::Tsignjmp => 4,
            _ => 2,
        }
    }

    pub fn category(self) -> Category {
        match self {
            Operation::Add
            | Operation::Sub
            | Operation::Mul
            | Operation::Div
            | Operation::Mod
            | Operation::Neg
            | Operation::Select
            | Operation::Tmuladd
            | Operation::Tround
            | Operation::Tnormalize
            | Operation::Tbias
            | Operation::Tnet => Category::Arith,
            Operation::Not
            | Operation::And
            | Operation::Or
            | Operation::Xor
            | Operation::Tmin
            | Operation::Tmax
            | Operation::Tmaj
            | Operation::Tlimp
            | Operation::Tnot
            | Operation::Tinv
            | Operation::Tequiv
            | Operation::Txor
            | Operation::Tmux => Category::Logic,
            Operation::Cmp
            | Operation::CmpLt
            | Operation::CmpEq
            | Operation::CmpGt
            | Operation::CmpNeq
            | Operation::Tbranch
            | Operation::Tsignjmp => Category::Cmp,
            Operation::Shl | Operation::Shr | Operation::Rol | Operation::Ror => Category::Shift,
            Operation::Tb2t
            | Operation::Tt2b
            | Operation::T2f
            | Operation::F2t
            | Operation::Tquant => Category::Conv,
            Operation::Load | Operation::Store => Category::Mem,
        }
    }

    pub fn result_shape(self) -> ResultShape {
        match self {
            Operation::Cmp | Operation::Tt2b | Operation::Tnet => ResultShape::Integer,
            Operation::Tbranch | Operation::Tsignjmp => ResultShape::Integer,
            Operation::T2f => ResultShape::Float,
            Operation::Select => ResultShape::Operand(1),
            Operation::Load => ResultShape::Pointee,
            Operation::Store => ResultShape::Unit,
            _ => ResultShape::Ternary,
        }
    }

    /// Whether the operation can be applied lane by lane to a vector.
    pub fn is_lane_wise(self) -> bool {
        matches!(
            self.result_shape(),
            ResultShape::Ternary | ResultShape::Operand(_)
        )
    }

    /// Index of the operand that carries a plain shift or drop count.
    pub fn count_operand(self) -> Option<usize> {
        match self {
            Operation::Shl
            | Operation::Shr
            | Operation::Rol
            | Operation::Ror
            | Operation::Tround
            | Operation::Tbias => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
