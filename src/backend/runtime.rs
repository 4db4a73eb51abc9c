//! Top-level driver for running node trees.
//!
//! The runtime applies a `Config` to every evaluation it starts. Evaluation
//! never runs on the caller's thread: each runtime owns a rayon pool whose
//! workers get a native stack sized for `max_call_depth`
//! (`depth::stack_size_for`), so deep non-tail recursion ends in
//! `EvalError::CallStackOverflow` instead of a native stack overflow.
//! Trees are shared read-only, so `run_batch` can evaluate many argument
//! lists against the same target on that pool.

use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::backend::call::{depth, Callee, IndirectCallSite};
use crate::backend::config::Config;
use crate::backend::eval::{EvalError, EvalResult, Expr};
use crate::backend::frame::{Args, Frame};
use crate::backend::models::Value;
use crate::backend::root::{CallTarget, RootBuilder};

#[derive(Debug, Clone, Default)]
pub struct Runtime {
    config: Config,
    pool: OnceLock<Arc<ThreadPool>>,
}

impl Runtime {
    pub fn new(config: Config) -> Self {
        Runtime {
            config,
            pool: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Root builder following this runtime's tail call setting
    pub fn builder(&self, name: impl Into<String>, arity: usize) -> RootBuilder {
        RootBuilder::new(name, arity).tail_calls(self.config.tail_calls)
    }

    /// Define a declared target following this runtime's tail call setting
    pub fn define(&self, target: &CallTarget, body: Box<dyn Expr>) -> EvalResult<()> {
        target.define(body, self.config.tail_calls)
    }

    /// Call `target` with `args` and wait for its value
    pub fn run(&self, target: &CallTarget, args: Args) -> EvalResult<Value> {
        self.apply(&Callee::Target(target.clone()), args)
    }

    /// Like `run`, also returning the deepest call nesting the run reached
    pub fn run_with_peak(&self, target: &CallTarget, args: Args) -> EvalResult<(Value, usize)> {
        let callee = Callee::Target(target.clone());
        self.pool()?.install(|| {
            let value = self.apply_here(&callee, args)?;
            Ok((value, depth::peak()))
        })
    }

    /// Apply any callee (target or closure) to `args`
    pub fn apply(&self, callee: &Callee, args: Args) -> EvalResult<Value> {
        self.pool()?.install(|| self.apply_here(callee, args))
    }

    /// Evaluate a free-standing expression in an empty frame
    pub fn eval(&self, expr: &dyn Expr) -> EvalResult<Value> {
        self.pool()?.install(|| {
            let _limit = depth::with_limit(self.config.max_call_depth);
            let mut frame = Frame::empty();
            expr.execute_value(&mut frame)
        })
    }

    /// Run `target` once per argument list, in parallel.
    /// Results are returned in input order.
    pub fn run_batch(&self, target: &CallTarget, inputs: Vec<Args>) -> Vec<EvalResult<Value>> {
        info!(target: "tailwalk::runtime", callee = target.name(), runs = inputs.len(), "batch");
        let pool = match self.pool() {
            Ok(pool) => pool,
            Err(err) => return inputs.iter().map(|_| Err(err.clone())).collect(),
        };
        let callee = Callee::Target(target.clone());
        pool.install(|| {
            inputs
                .into_par_iter()
                .map(|args| self.apply_here(&callee, args))
                .collect()
        })
    }

    /// Evaluate on the current thread, which must be a worker of `pool`
    fn apply_here(&self, callee: &Callee, args: Args) -> EvalResult<Value> {
        let _limit = depth::with_limit(self.config.max_call_depth);
        depth::reset_peak();
        info!(target: "tailwalk::runtime", callee = callee.name(), arity = args.len(), "run");

        let result = IndirectCallSite::new()
            .call(callee, args)
            .and_then(|completion| completion.into_value());

        debug!(
            target: "tailwalk::runtime",
            callee = callee.name(),
            ok = result.is_ok(),
            peak_depth = depth::peak(),
            "run finished"
        );
        result
    }

    fn pool(&self) -> EvalResult<&ThreadPool> {
        if let Some(pool) = self.pool.get() {
            return Ok(&**pool);
        }
        let stack_size = depth::stack_size_for(self.config.max_call_depth);
        let pool = ThreadPoolBuilder::new()
            .thread_name(|i| format!("tailwalk-eval-{}", i))
            .stack_size(stack_size)
            .build()
            .map_err(|e| EvalError::Runtime(format!("failed to start evaluation threads: {}", e)))?;
        debug!(target: "tailwalk::runtime", stack_size, "evaluation pool started");
        // a concurrent first call may have won the race; either pool will do
        Ok(&**self.pool.get_or_init(|| Arc::new(pool)))
    }
}
