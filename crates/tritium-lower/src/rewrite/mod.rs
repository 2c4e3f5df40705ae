//! The rewrite pass.
//!
//! Walks every statement of a function once, recognises ternary operations,
//! folds what is statically known and replaces the rest with calls to the
//! runtime helpers handed out by the [`Resolver`].

pub mod builtins;
mod lower;
pub mod state;
pub mod stats;

pub use state::{Location, NodeState, Site, SiteTracker};
pub use stats::{RewriteStats, SurvivorScan};

use log::{info, warn};
use rustc_hash::FxHashSet;

use crate::config::PassConfig;
use crate::error::{ConfigError, LowerError};
use crate::ir::{BlockCursor, Expr, ExprKind, Function, IrVisitor, LocalId, Place, Statement, StatementSink};
use crate::resolver::Resolver;
use lower::Lowerer;

pub struct RewritePass {
    config: PassConfig,
    resolver: Resolver,
    tracker: SiteTracker,
    totals: RewriteStats,
}

impl RewritePass {
    pub fn new(config: PassConfig) -> Result<Self, ConfigError> {
        let resolver = Resolver::from_config(&config)?;
        Ok(Self::with_resolver(config, resolver))
    }

    /// A pass sharing an existing resolver, for instance across several
    /// translation units of one run.
    pub fn with_resolver(config: PassConfig, resolver: Resolver) -> Self {
        Self {
            config,
            resolver,
            tracker: SiteTracker::default(),
            totals: RewriteStats::default(),
        }
    }

    pub fn config(&self) -> &PassConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn into_resolver(self) -> Resolver {
        self.resolver
    }

    /// Every candidate seen so far, in detection order.
    pub fn sites(&self) -> &[Site] {
        self.tracker.sites()
    }

    /// Counters summed over every function rewritten so far.
    pub fn totals(&self) -> RewriteStats {
        self.totals
    }

    /// Rewrite `function` in place.
    pub fn run_on_function(&mut self, function: &mut Function) -> Result<RewriteStats, LowerError> {
        check_locals(function)?;

        let name = function.name.clone();
        let mut stats = RewriteStats::default();
        let blocks: Vec<_> = function.block_ids().collect();
        for block in blocks {
            let mut cursor = BlockCursor::new(function, block)
                .ok_or_else(|| LowerError::UnknownBlock(block, name.clone()))?;
            let mut ordinal = 0;
            while let Some(statement) = cursor.current().cloned() {
                let location = Location {
                    block,
                    statement: ordinal,
                };
                self.rewrite_statement(&mut cursor, statement, &name, location, &mut stats);
                cursor.advance();
                ordinal += 1;
            }
        }

        if self.config.warn {
            let mut scan = SurvivorScan::default();
            scan.visit_function(function);
            for (op, node) in &scan.survivors {
                warn!("`{op}` survives lowering in function `{name}`: {node}");
            }
        }
        if self.config.stats {
            info!(
                "ternary lowering of `{name}`: {stats}; helpers: {} declared, {} cache hits",
                self.resolver.misses(),
                self.resolver.hits()
            );
        }

        self.totals += stats;
        Ok(stats)
    }

    /// Rewrite one statement through an arbitrary sink.
    ///
    /// `statement` is the statement the sink is positioned at.
    pub fn rewrite_statement<S: StatementSink>(
        &mut self,
        sink: &mut S,
        statement: Statement,
        function: &str,
        location: Location,
        stats: &mut RewriteStats,
    ) {
        let mut lowerer = Lowerer {
            sink,
            resolver: &mut self.resolver,
            config: &self.config,
            tracker: &mut self.tracker,
            stats,
            function,
            location,
        };
        lowerer.rewrite(statement);
    }
}

/// Rewrite `function` with a one-off pass.
pub fn lower_function(function: &mut Function, config: &PassConfig) -> Result<RewriteStats, LowerError> {
    let mut pass = RewritePass::new(config.clone())?;
    pass.run_on_function(function)
}

/// Every local a function mentions must be declared.
fn check_locals(function: &Function) -> Result<(), LowerError> {
    let mut uses = LocalUses::default();
    uses.visit_function(function);
    let mut unknown: Vec<_> = uses
        .locals
        .into_iter()
        .filter(|&local| function.local_type(local).is_none())
        .collect();
    unknown.sort();
    match unknown.first() {
        Some(&local) => Err(LowerError::UnknownLocal(local, function.name.clone())),
        None => Ok(()),
    }
}

#[derive(Default)]
struct LocalUses {
    locals: FxHashSet<LocalId>,
}

impl IrVisitor for LocalUses {
    fn visit_place(&mut self, place: &Place) {
        self.locals.insert(place.local);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let ExprKind::Local(local) | ExprKind::Load(local) = &expr.kind {
            self.locals.insert(*local);
        }
        for child in expr.children() {
            self.visit_expr(child);
        }
    }
}
