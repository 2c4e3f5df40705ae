//! Helper symbol resolution.
//!
//! Maps an operation and the kind of operand it works on to the runtime helper
//! implementing it. Declarations are memoised: one resolver lives for one
//! compilation run, and every query with the same key returns the same
//! `Arc<HelperDecl>`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace};
use rustc_hash::FxBuildHasher;
use tritium_core::{Operation, ResultShape, Width};

use crate::config::{PassConfig, DEFAULT_PREFIX, DEFAULT_WIDTHS};
use crate::error::ConfigError;
use crate::ir::{ScalarKind, TypeKind};

/// The value type condition arguments of select helpers are passed as.
pub const CONDITION_TYPE: TypeKind = TypeKind::Scalar(ScalarKind::Signed(64));

/// What kind of value an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Ternary(Width),
    TernaryVector(Width),
    Scalar(ScalarKind),
}

impl OperandKind {
    pub fn of(ty: &TypeKind) -> Option<Self> {
        match ty {
            TypeKind::Ternary(width) => Some(OperandKind::Ternary(*width)),
            TypeKind::TernaryVector(width) => Some(OperandKind::TernaryVector(*width)),
            TypeKind::Scalar(kind) => Some(OperandKind::Scalar(*kind)),
            TypeKind::Bool => Some(OperandKind::Scalar(ScalarKind::Signed(32))),
            _ => None,
        }
    }

    pub fn ty(self) -> TypeKind {
        match self {
            OperandKind::Ternary(width) => TypeKind::Ternary(width),
            OperandKind::TernaryVector(width) => TypeKind::TernaryVector(width),
            OperandKind::Scalar(kind) => TypeKind::Scalar(kind),
        }
    }
}

/// Memo key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HelperKey {
    pub op: Operation,
    pub operand: OperandKind,
    /// The plain scalar on the other side of a conversion (`tb2t`, `t2f`,
    /// `f2t`), if any
    pub companion: Option<ScalarKind>,
}

impl HelperKey {
    pub fn new(op: Operation, operand: OperandKind) -> Self {
        Self {
            op,
            operand,
            companion: None,
        }
    }

    pub fn with_companion(mut self, companion: ScalarKind) -> Self {
        self.companion = Some(companion);
        self
    }
}

/// An external helper function
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HelperDecl {
    pub name: String,
    pub params: Vec<TypeKind>,
    pub ret: TypeKind,
}

impl fmt::Display for HelperDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "declare {} {}(", self.ret, self.name)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ")")
    }
}

pub struct Resolver {
    prefix: String,
    widths: Vec<Width>,
    table: IndexMap<HelperKey, Arc<HelperDecl>, FxBuildHasher>,
    hits: usize,
    misses: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        let widths = DEFAULT_WIDTHS
            .iter()
            .filter_map(|&trits| Width::new(trits).ok())
            .collect();
        Self::new(DEFAULT_PREFIX, widths)
    }
}

impl Resolver {
    pub fn new(prefix: impl Into<String>, widths: Vec<Width>) -> Self {
        Self {
            prefix: prefix.into(),
            widths,
            table: IndexMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn from_config(config: &PassConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.helper_prefix.clone(), config.helper_widths()?))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn supports_width(&self, width: Width) -> bool {
        self.widths.contains(&width)
    }

    /// The helper for `key`, or `None` if the runtime has no such helper.
    pub fn resolve(&mut self, key: HelperKey) -> Option<Arc<HelperDecl>> {
        if let Some(decl) = self.table.get(&key) {
            self.hits += 1;
            trace!("helper cache hit for {:?}: {}", key, decl.name);
            return Some(Arc::clone(decl));
        }

        let decl = Arc::new(self.declare(key)?);
        debug!("declaring helper {decl}");
        self.misses += 1;
        self.table.insert(key, Arc::clone(&decl));
        Some(decl)
    }

    /// Declared helpers in first-use order.
    pub fn declarations(&self) -> impl Iterator<Item = &Arc<HelperDecl>> {
        self.table.values()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    fn declare(&self, key: HelperKey) -> Option<HelperDecl> {
        match key.operand {
            OperandKind::Ternary(width) | OperandKind::TernaryVector(width) => {
                if !self.supports_width(width) {
                    return None;
                }
                self.declare_ternary(key)
            }
            OperandKind::Scalar(kind) => self.declare_scalar(key.op, kind),
        }
    }

    fn declare_ternary(&self, key: HelperKey) -> Option<HelperDecl> {
        let (suffix, value) = match key.operand {
            OperandKind::Ternary(width) => (format!("t{}", width.trits()), TypeKind::Ternary(width)),
            OperandKind::TernaryVector(width) => {
                let per_lane = key.op.result_shape() == ResultShape::Ternary
                    && !matches!(key.op, Operation::Tb2t | Operation::F2t);
                if !per_lane {
                    return None;
                }
                (format!("tv{}", width.trits()), TypeKind::TernaryVector(width))
            }
            OperandKind::Scalar(_) => return None,
        };
        let op = key.op;
        let int = TypeKind::signed(32);
        let long = TypeKind::signed(64);

        let (name, params, ret) = match op {
            Operation::Add
            | Operation::Sub
            | Operation::Mul
            | Operation::Div
            | Operation::Mod
            | Operation::And
            | Operation::Or
            | Operation::Xor
            | Operation::Tmin
            | Operation::Tmax
            | Operation::Tlimp
            | Operation::Tequiv
            | Operation::Txor
            | Operation::CmpLt
            | Operation::CmpEq
            | Operation::CmpGt
            | Operation::CmpNeq => (self.name(op, &suffix), vec![value.clone(); 2], value),
            Operation::Neg | Operation::Not | Operation::Tnot | Operation::Tinv | Operation::Tnormalize => {
                (self.name(op, &suffix), vec![value.clone()], value)
            }
            Operation::Cmp => (self.name(op, &suffix), vec![value.clone(); 2], int),
            Operation::Tnet => (self.name(op, &suffix), vec![value], int),
            Operation::Shl | Operation::Shr | Operation::Rol | Operation::Ror => {
                (self.name(op, &suffix), vec![value.clone(), int], value)
            }
            Operation::Tround => (
                self.name(op, &suffix),
                vec![value.clone(), TypeKind::unsigned(32)],
                value,
            ),
            Operation::Tbias => (self.name(op, &suffix), vec![value.clone(), long], value),
            Operation::Tmaj | Operation::Tmuladd => {
                (self.name(op, &suffix), vec![value.clone(); 3], value)
            }
            Operation::Tmux => (self.name(op, &suffix), vec![value.clone(); 4], value),
            Operation::Select => (
                self.name(op, &suffix),
                vec![CONDITION_TYPE, value.clone(), value.clone()],
                value,
            ),
            Operation::Tsignjmp => (
                self.name(op, &suffix),
                vec![value, int.clone(), int.clone(), int.clone()],
                int,
            ),
            Operation::Tb2t => match key.companion {
                Some(kind) if !kind.is_integer() => return None,
                _ => (self.name(op, &suffix), vec![long], value),
            },
            Operation::Tt2b => (self.name(op, &suffix), vec![value], long),
            Operation::T2f => {
                let bits = float_bits(key.companion?)?;
                (
                    format!("{}_t2f{bits}_{suffix}", self.prefix),
                    vec![value],
                    TypeKind::float(bits),
                )
            }
            Operation::F2t => {
                let bits = float_bits(key.companion?)?;
                (
                    format!("{}_f2t{bits}_{suffix}", self.prefix),
                    vec![TypeKind::float(bits)],
                    value,
                )
            }
            Operation::Tquant => {
                let real = TypeKind::float(quant_bits(&value));
                (self.name(op, &suffix), vec![real.clone(), real], value)
            }
            // Memory is accessed directly, and tbranch has no per-width form.
            Operation::Load | Operation::Store | Operation::Tbranch => return None,
        };
        Some(HelperDecl { name, params, ret })
    }

    fn declare_scalar(&self, op: Operation, kind: ScalarKind) -> Option<HelperDecl> {
        let int = TypeKind::signed(32);
        match op {
            Operation::Select => {
                let bits = kind.bits();
                let supported = match kind {
                    ScalarKind::Float(_) => float_bits(kind).is_some(),
                    _ => matches!(bits, 8 | 16 | 32 | 64),
                };
                if !supported {
                    return None;
                }
                let value = TypeKind::Scalar(kind);
                Some(HelperDecl {
                    name: format!("{}_select_{}{bits}", self.prefix, kind.letter()),
                    params: vec![CONDITION_TYPE, value.clone(), value.clone()],
                    ret: value,
                })
            }
            Operation::Tbranch => Some(HelperDecl {
                name: format!("{}_tbranch", self.prefix),
                params: vec![CONDITION_TYPE, int.clone(), int.clone(), int.clone()],
                ret: int,
            }),
            _ if !kind.is_integer() => None,
            Operation::Neg | Operation::Not => Some(HelperDecl {
                name: format!("{}_{}", self.prefix, op.name()),
                params: vec![int.clone()],
                ret: int,
            }),
            Operation::Add
            | Operation::Sub
            | Operation::Mul
            | Operation::Div
            | Operation::Mod
            | Operation::And
            | Operation::Or
            | Operation::Xor
            | Operation::Shl
            | Operation::Shr
            | Operation::Rol
            | Operation::Ror
            | Operation::Cmp => Some(HelperDecl {
                name: format!("{}_{}", self.prefix, op.name()),
                params: vec![int.clone(), int.clone()],
                ret: int,
            }),
            _ => None,
        }
    }

    fn name(&self, op: Operation, suffix: &str) -> String {
        format!("{}_{}_{suffix}", self.prefix, op.name())
    }
}

/// `tquant` samples are single precision up to 32 trits and double beyond.
fn quant_bits(value: &TypeKind) -> u32 {
    match value.ternary_width() {
        Some(width) if width.trits() > 32 => 64,
        _ => 32,
    }
}

fn float_bits(kind: ScalarKind) -> Option<u32> {
    match kind {
        ScalarKind::Float(bits @ (32 | 64)) => Some(bits),
        _ => None,
    }
}
