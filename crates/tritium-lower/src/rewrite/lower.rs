//! Bottom-up lowering of one statement.
//!
//! Operands are lowered before the node that uses them. A node that turns
//! into a helper call is handed back to its parent unmaterialised; the parent
//! then stores it in a fresh temporary defined just before the current
//! statement, unless the node is the whole right-hand side of an assignment,
//! in which case the assignment itself becomes the call.

use std::mem;
use std::sync::Arc;

use log::{debug, trace, warn};
use tritium_core::{checked_decode, encode, Operation, ResultShape, Width};

use super::builtins::{builtin_operation, builtin_result_type, classify, key_type};
use super::state::{Location, NodeState, SiteTracker};
use super::stats::RewriteStats;
use crate::config::PassConfig;
use crate::fold::{
    fold_operation, is_value_operand, simplify_binary, simplify_select, try_pack_logical, try_unpack,
};
use crate::ir::{
    BinOp, Callee, Constant, Expr, ExprKind, LocalId, Place, Statement, StatementSink, TypeKind,
    UnOp,
};
use crate::resolver::{HelperDecl, HelperKey, OperandKind, Resolver, CONDITION_TYPE};

pub(super) struct Lowerer<'a, S: StatementSink> {
    pub sink: &'a mut S,
    pub resolver: &'a mut Resolver,
    pub config: &'a PassConfig,
    pub tracker: &'a mut SiteTracker,
    pub stats: &'a mut RewriteStats,
    pub function: &'a str,
    pub location: Location,
}

/// A node taken apart into its operands, with the means to put it back.
struct Parts {
    args: Vec<Expr>,
    ty: TypeKind,
    shape: Shape,
}

/// How a select condition reaches the helper's condition parameter.
enum Condition {
    Unpack(Arc<HelperDecl>),
    Plain(Expr),
}

enum Shape {
    Unary(UnOp),
    Binary(BinOp),
    Cast,
    Cond,
    Call(Callee),
}

impl Parts {
    fn of(expr: Expr) -> Result<Parts, Expr> {
        let Expr { kind, ty } = expr;
        let (shape, args) = match kind {
            ExprKind::Unary { op, operand } => (Shape::Unary(op), vec![*operand]),
            ExprKind::Binary { op, lhs, rhs } => (Shape::Binary(op), vec![*lhs, *rhs]),
            ExprKind::Cast(operand) => (Shape::Cast, vec![*operand]),
            ExprKind::Cond {
                cond,
                then,
                otherwise,
            } => (Shape::Cond, vec![*cond, *then, *otherwise]),
            ExprKind::Call { callee, args } => (Shape::Call(callee), args),
            kind => return Err(Expr::new(kind, ty)),
        };
        Ok(Parts { args, ty, shape })
    }

    fn rebuild(self) -> Expr {
        let Parts { args, ty, shape } = self;
        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_else(placeholder);
        match shape {
            Shape::Unary(op) => Expr::unary(op, next(), ty),
            Shape::Binary(op) => {
                let lhs = next();
                Expr::binary(op, lhs, next(), ty)
            }
            Shape::Cast => Expr::cast(next(), ty),
            Shape::Cond => {
                let cond = next();
                let then = next();
                Expr::cond(cond, then, next(), ty)
            }
            Shape::Call(callee) => Expr::call(callee, args.collect(), ty),
        }
    }
}

impl<S: StatementSink> Lowerer<'_, S> {
    /// Rewrite the statement the sink is positioned at.
    pub fn rewrite(&mut self, statement: Statement) {
        match statement {
            Statement::Assign { dest, value } => {
                let value = self.lower(value);
                self.sink.replace(assign_or_call(dest, value));
            }
            Statement::Call { callee, args, dest } => match builtin_operation(&callee) {
                Some(op) => self.rewrite_builtin(op, callee, args, dest),
                None => {
                    let mut args = args;
                    self.lower_operands(args.iter_mut().collect());
                    self.sink.replace(Statement::Call { callee, args, dest });
                }
            },
            Statement::Branch {
                predicate,
                then_block,
                else_block,
            } => {
                let predicate = self.lower_value(predicate);
                self.sink.replace(Statement::Branch {
                    predicate,
                    then_block,
                    else_block,
                });
            }
            Statement::Return(value) => {
                let value = value.map(|value| self.lower_value(value));
                self.sink.replace(Statement::Return(value));
            }
        }
    }

    /// A builtin called as a statement. The result type comes from the
    /// destination when there is one.
    fn rewrite_builtin(&mut self, op: Operation, callee: Callee, args: Vec<Expr>, dest: Option<Place>) {
        let ty = match dest {
            Some(place) => self.place_type(place),
            None => builtin_result_type(op, &args),
        }
        .unwrap_or(TypeKind::Void);

        let lowered = self.lower(Expr::call(callee, args, ty));
        match (lowered.kind, dest) {
            (ExprKind::Call { callee, args }, dest) if !callee.is_helper() || dest.is_none() => {
                self.sink.replace(Statement::Call { callee, args, dest });
            }
            (kind, Some(dest)) => {
                let value = Expr::new(kind, lowered.ty);
                self.sink.replace(assign_or_call(dest, value));
            }
            (kind, None) => {
                let value = Expr::new(kind, lowered.ty);
                if value.has_side_effects() {
                    let temp = self.sink.create_temp(value.ty.clone());
                    self.sink.replace(Statement::assign(temp, value));
                } else {
                    debug!("removing builtin statement `{value}` in `{}`", self.function);
                    self.sink.remove();
                }
            }
        }
    }

    fn place_type(&self, place: Place) -> Option<TypeKind> {
        let ty = self.sink.local_type(place.local)?;
        if place.deref {
            ty.pointee().cloned()
        } else {
            Some(ty.clone())
        }
    }

    /// Lower `expr` and materialise it if it became a helper call.
    fn lower_value(&mut self, expr: Expr) -> Expr {
        let lowered = self.lower(expr);
        if lowered.is_helper_call() {
            self.materialize(lowered)
        } else {
            lowered
        }
    }

    /// Lower `expr` bottom-up. The result may be an unmaterialised helper call.
    fn lower(&mut self, expr: Expr) -> Expr {
        let op = classify(&expr).filter(|&op| self.enabled(op, &expr));
        let site = op.map(|op| self.begin(op));
        let expr = self.lower_children(expr);

        let (Some(op), Some(site)) = (op, site) else {
            return self.lower_resize(expr);
        };

        let (lowered, state) = match Parts::of(expr) {
            Ok(parts) => self.lower_node(op, parts),
            Err(expr) => (expr, NodeState::LeftUnresolved),
        };
        self.finish(site, op, state);
        lowered
    }

    fn enabled(&self, op: Operation, expr: &Expr) -> bool {
        let vector = expr.ty.is_vector() || expr.children().iter().any(|child| child.ty.is_vector());
        if vector && !self.config.features.vector {
            return false;
        }
        match expr.kind {
            ExprKind::Cond { .. } => self.config.lower,
            _ => self.config.features.enabled(op.category()),
        }
    }

    fn begin(&mut self, op: Operation) -> usize {
        trace!("candidate `{op}` in `{}` at {:?}", self.function, self.location);
        if self.config.warn {
            warn!("ternary operation `{op}` in function `{}`", self.function);
        }
        self.stats.candidates += 1;
        self.tracker.begin(self.function, self.location, op)
    }

    fn finish(&mut self, site: usize, op: Operation, state: NodeState) {
        match state {
            NodeState::Folded => self.stats.folded += 1,
            NodeState::LoweredToCall => self.stats.lowered += 1,
            _ => {
                debug!("leaving `{op}` in `{}` unresolved", self.function);
                self.stats.unresolved += 1;
            }
        }
        self.tracker.finish(site, state);
    }

    /// Casts between ternary types of different widths.
    ///
    /// Widening keeps the value: constants are re-encoded at the new width and
    /// anything else is left to the host. Narrowing is a width mismatch.
    fn lower_resize(&mut self, expr: Expr) -> Expr {
        let ExprKind::Cast(operand) = &expr.kind else {
            return expr;
        };
        let (TypeKind::Ternary(from), TypeKind::Ternary(to)) = (&operand.ty, &expr.ty) else {
            return expr;
        };
        let (from, to) = (*from, *to);
        if from.trits() > to.trits() {
            self.mismatch("cast", from, to);
            return expr;
        }
        if from == to || !self.config.fold {
            return expr;
        }
        let widened = match operand.as_constant() {
            Some(Constant::Ternary(value)) => checked_decode(value).ok().map(|value| encode(value, to)),
            _ => None,
        };
        match widened {
            Some(value) => {
                debug!("widened constant from {from} to {to} trits");
                Expr::ternary(value)
            }
            None => expr,
        }
    }

    fn mismatch(&mut self, what: &str, expected: Width, found: Width) {
        self.stats.width_mismatches += 1;
        warn!(
            "width mismatch in `{what}` in function `{}`: expected {expected}, found {found}",
            self.function
        );
    }

    fn lower_children(&mut self, mut expr: Expr) -> Expr {
        match &mut expr.kind {
            ExprKind::Unary { operand, .. } | ExprKind::Cast(operand) => {
                self.lower_operands(vec![&mut **operand])
            }
            ExprKind::Binary { lhs, rhs, .. } => self.lower_operands(vec![&mut **lhs, &mut **rhs]),
            ExprKind::Cond {
                cond,
                then,
                otherwise,
            } => self.lower_operands(vec![&mut **cond, &mut **then, &mut **otherwise]),
            ExprKind::Call { args, .. } => self.lower_operands(args.iter_mut().collect()),
            ExprKind::Const(_) | ExprKind::Local(_) | ExprKind::Load(_) => {}
        }
        expr
    }

    /// Lower sibling operands left to right.
    ///
    /// Helper calls are materialised in order. An operand with side effects
    /// is materialised too when a later sibling may insert statements, so it
    /// still runs first.
    fn lower_operands(&mut self, operands: Vec<&mut Expr>) {
        let may_insert: Vec<bool> = operands.iter().map(|operand| contains_candidate(operand)).collect();
        for (index, operand) in operands.into_iter().enumerate() {
            let lowered = self.lower(take(operand));
            let keep_order = lowered.has_side_effects() && may_insert[index + 1..].iter().any(|&b| b);
            *operand = if lowered.is_helper_call() || keep_order {
                self.materialize(lowered)
            } else {
                lowered
            };
        }
    }

    fn materialize(&mut self, expr: Expr) -> Expr {
        let ty = expr.ty.clone();
        Expr::local(self.temp_for(expr), ty)
    }

    fn temp_for(&mut self, expr: Expr) -> LocalId {
        let temp = self.sink.create_temp(expr.ty.clone());
        self.sink.insert_before(assign_or_call(Place::local(temp), expr));
        temp
    }

    fn lower_node(&mut self, op: Operation, parts: Parts) -> (Expr, NodeState) {
        match parts.shape {
            Shape::Binary(cmp) if cmp.is_comparison() => self.lower_compare(cmp, parts),
            Shape::Cond => self.lower_select(parts),
            _ => self.lower_operation(op, parts),
        }
    }

    fn fold(&self, op: Operation, args: &[Expr], ty: &TypeKind) -> Option<Expr> {
        if !self.config.fold {
            return None;
        }
        if let Some(folded) = fold_operation(op, args, ty) {
            debug!("folded `{op}` to {folded}");
            return Some(folded);
        }
        if let [lhs, rhs] = args {
            if let Some(simplified) = simplify_binary(op, lhs, rhs, ty) {
                debug!("simplified `{op}` to {simplified}");
                return Some(simplified);
            }
        }
        None
    }

    /// Whether the ternary operands and result of `op` share one width.
    fn widths_agree(&mut self, op: Operation, args: &[Expr], ty: &TypeKind) -> bool {
        let operand_widths = args
            .iter()
            .enumerate()
            .filter(|(index, _)| is_value_operand(op, *index))
            .filter_map(|(_, arg)| {
                arg.ty
                    .ternary_width()
                    .or_else(|| arg.ty.pointee().and_then(TypeKind::ternary_width))
            });
        let result_width = match op.result_shape() {
            ResultShape::Ternary | ResultShape::Operand(_) | ResultShape::Pointee => ty.ternary_width(),
            _ => None,
        };

        let mut widths = operand_widths.chain(result_width);
        let Some(expected) = widths.next() else {
            return true;
        };
        match widths.find(|&width| width != expected) {
            Some(found) => {
                self.mismatch(op.name(), expected, found);
                false
            }
            None => true,
        }
    }

    fn helper_key(&self, op: Operation, args: &[Expr], ty: &TypeKind) -> Option<HelperKey> {
        let operand = OperandKind::of(key_type(op, args, ty))?;
        let key = HelperKey::new(op, operand);
        let companion = match op {
            Operation::Tb2t | Operation::F2t => args.first().and_then(|arg| arg.ty.scalar()),
            Operation::T2f => ty.scalar(),
            _ => None,
        };
        Some(match companion {
            Some(kind) => key.with_companion(kind),
            None => key,
        })
    }

    fn resolve(&mut self, op: Operation, args: &[Expr], ty: &TypeKind) -> Option<Arc<HelperDecl>> {
        let key = self.helper_key(op, args, ty)?;
        let decl = self.resolver.resolve(key);
        if decl.is_none() {
            debug!("no helper for `{op}` on {ty} in `{}`", self.function);
        }
        decl
    }

    /// Arithmetic, logic, shift, conversion and builtin nodes.
    fn lower_operation(&mut self, op: Operation, parts: Parts) -> (Expr, NodeState) {
        if !self.widths_agree(op, &parts.args, &parts.ty) {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        }
        if matches!(op, Operation::Load | Operation::Store) {
            return self.lower_memory(op, parts);
        }
        if let Some(folded) = self.fold(op, &parts.args, &parts.ty) {
            return (folded, NodeState::Folded);
        }
        let Some(decl) = self.resolve(op, &parts.args, &parts.ty) else {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        };
        let Some(args) = coerce_args(&decl.params, &parts.args) else {
            debug!("operands of `{op}` do not match {decl}");
            return (parts.rebuild(), NodeState::LeftUnresolved);
        };
        (self.helper_call(decl, args, parts.ty), NodeState::LoweredToCall)
    }

    /// Ternary memory is read and written through the pointer directly: the
    /// packed value needs no conversion on the way.
    ///
    /// `load(p)` becomes `*p`. `store(p, v)` becomes `*p = v` inserted before
    /// the current statement, and the node itself turns into a unit value.
    fn lower_memory(&mut self, op: Operation, parts: Parts) -> (Expr, NodeState) {
        let pointee = parts
            .args
            .first()
            .and_then(|pointer| pointer.ty.pointee())
            .filter(|pointee| pointee.is_ternary_like())
            .cloned();
        let Some(pointee) = pointee.filter(|_| parts.args.len() == op.arity()) else {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        };
        let stored = match parts.args.get(1).map(|value| coerce(value, &pointee)) {
            Some(None) => return (parts.rebuild(), NodeState::LeftUnresolved),
            stored => stored.flatten(),
        };

        let Parts { mut args, .. } = parts;
        let pointer = take(&mut args[0]);
        let pointer = match pointer.kind {
            ExprKind::Local(local) => local,
            _ => self.temp_for(pointer),
        };
        match stored {
            Some(value) => {
                debug!("storing through {pointer} in `{}`", self.function);
                self.sink.insert_before(Statement::Assign {
                    dest: Place::deref(pointer),
                    value,
                });
                (placeholder(), NodeState::LoweredToCall)
            }
            None => (Expr::load(pointer, pointee), NodeState::LoweredToCall),
        }
    }

    /// `a <op> b` becomes `cmp(a, b) <op> 0`.
    fn lower_compare(&mut self, cmp: BinOp, parts: Parts) -> (Expr, NodeState) {
        let int = TypeKind::signed(32);
        if !self.widths_agree(Operation::Cmp, &parts.args, &int) {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        }
        if let Some(folded) = self.fold(Operation::Cmp, &parts.args, &int) {
            if let Some(Constant::Int(order)) = folded.as_constant() {
                if let Some(holds) = cmp.compare_to_zero(*order) {
                    return (Expr::int(holds as i128, parts.ty), NodeState::Folded);
                }
            }
        }
        let Some(decl) = self.resolve(Operation::Cmp, &parts.args, &int) else {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        };
        let Some(args) = coerce_args(&decl.params, &parts.args) else {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        };

        let ret = decl.ret.clone();
        let order = self.materialize(Expr::call(Callee::Helper(decl), args, ret.clone()));
        let lowered = Expr::binary(cmp, order, Expr::int(0, ret), parts.ty);
        (lowered, NodeState::LoweredToCall)
    }

    /// `c ? a : b` becomes `select(c, a, b)`, with the condition converted to
    /// the helpers' condition type first.
    fn lower_select(&mut self, parts: Parts) -> (Expr, NodeState) {
        let op = Operation::Select;
        if !self.widths_agree(op, &parts.args, &parts.ty) {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        }
        if self.config.fold {
            if let [cond, then, otherwise] = &parts.args[..] {
                if let Some(simplified) = simplify_select(cond, then, otherwise, &parts.ty) {
                    debug!("simplified select to {simplified}");
                    return (simplified, NodeState::Folded);
                }
            }
        }
        if parts.args[1..].iter().any(Expr::has_side_effects) {
            debug!("select branches with side effects stay conditional");
            return (parts.rebuild(), NodeState::LeftUnresolved);
        }
        let Some(select) = self.resolve(op, &parts.args, &parts.ty) else {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        };

        // Resolve every helper before inserting anything.
        let cond = &parts.args[0];
        let condition = match &cond.ty {
            TypeKind::Ternary(width) => {
                let key = HelperKey::new(Operation::Tt2b, OperandKind::Ternary(*width));
                match self.resolver.resolve(key) {
                    Some(unpack) => Condition::Unpack(unpack),
                    None => return (parts.rebuild(), NodeState::LeftUnresolved),
                }
            }
            _ => match coerce(cond, &CONDITION_TYPE) {
                Some(cond) => Condition::Plain(cond),
                None => return (parts.rebuild(), NodeState::LeftUnresolved),
            },
        };
        let Some(branches) = coerce_args(&select.params[1..], &parts.args[1..]) else {
            return (parts.rebuild(), NodeState::LeftUnresolved);
        };

        let Parts { mut args, ty, .. } = parts;
        let cond = match condition {
            Condition::Unpack(unpack) => {
                let ret = unpack.ret.clone();
                let raw = take(&mut args[0]);
                self.materialize(Expr::call(Callee::Helper(unpack), vec![raw], ret))
            }
            Condition::Plain(cond) => cond,
        };

        let mut call_args = Vec::with_capacity(3);
        call_args.push(cond);
        call_args.extend(branches);
        (self.helper_call(select, call_args, ty), NodeState::LoweredToCall)
    }

    /// A call to `decl`, converted to `ty` when the helper returns something
    /// else.
    fn helper_call(&mut self, decl: Arc<HelperDecl>, args: Vec<Expr>, ty: TypeKind) -> Expr {
        let ret = decl.ret.clone();
        let call = Expr::call(Callee::Helper(decl), args, ret.clone());
        if ret == ty || ty == TypeKind::Void {
            return call;
        }
        let value = self.materialize(call);
        Expr::cast(value, ty)
    }
}

fn placeholder() -> Expr {
    Expr::new(ExprKind::Const(Constant::Int(0)), TypeKind::Void)
}

fn take(expr: &mut Expr) -> Expr {
    mem::replace(expr, placeholder())
}

/// Whether lowering `expr` may insert statements.
fn contains_candidate(expr: &Expr) -> bool {
    classify(expr).is_some() || expr.children().into_iter().any(contains_candidate)
}

/// `dest = value`, or a call statement when `value` is a helper call.
fn assign_or_call(dest: Place, value: Expr) -> Statement {
    match value.kind {
        ExprKind::Call { callee, args } if callee.is_helper() => Statement::Call {
            callee,
            args,
            dest: Some(dest),
        },
        kind => Statement::Assign {
            dest,
            value: Expr::new(kind, value.ty),
        },
    }
}

fn coerce_args(params: &[TypeKind], args: &[Expr]) -> Option<Vec<Expr>> {
    if params.len() != args.len() {
        return None;
    }
    params.iter().zip(args).map(|(param, arg)| coerce(arg, param)).collect()
}

/// Convert `arg` to a helper parameter type.
///
/// Literals are retyped in place. Other plain scalars get a cast. Nothing
/// converts a non-constant between plain and ternary types here: that takes
/// a helper call of its own.
fn coerce(arg: &Expr, param: &TypeKind) -> Option<Expr> {
    if arg.ty == *param {
        return Some(arg.clone());
    }
    match param {
        TypeKind::Ternary(width) if arg.ty.is_integer() => {
            try_pack_logical(arg, *width).ok().map(Expr::ternary)
        }
        TypeKind::Scalar(kind) => match (&arg.ty, arg.as_constant()) {
            (TypeKind::Ternary(_), Some(_)) if kind.is_integer() => {
                try_unpack(arg).ok().map(|value| Expr::int(kind.wrap(value), param.clone()))
            }
            (TypeKind::Ternary(_) | TypeKind::TernaryVector(_), _) => None,
            (_, Some(Constant::Int(value))) if kind.is_integer() => {
                Some(Expr::int(kind.wrap(*value), param.clone()))
            }
            (_, Some(Constant::Int(value))) => Some(Expr::float(*value as f64, param.clone())),
            (_, Some(Constant::Float(value))) if !kind.is_integer() => {
                Some(Expr::float(*value, param.clone()))
            }
            (TypeKind::Scalar(_) | TypeKind::Bool, _) => Some(Expr::cast(arg.clone(), param.clone())),
            _ => None,
        },
        _ => None,
    }
}
