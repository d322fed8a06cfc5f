//! A configurable front end over construction and evaluation.
//!
//! An [`Engine`] bundles an [`EngineConfig`] with the [`SymbolTable`] its symbols are interned
//! in. Every construction goes through the canonicalization strategy selected by the config, so
//! callers never pick the `create` routines themselves.
//!
//! ```
//! use cas_canon::engine::{Engine, EngineConfig};
//! use std::collections::HashMap;
//!
//! let engine = Engine::new(EngineConfig::default());
//! let x = engine.symbol("x");
//!
//! // x + x + 1
//! let expr = engine.add(&[x.clone(), x, engine.number(1.0)]);
//! assert_eq!(engine.render(&expr), "(1+(2*x))");
//!
//! let subs = HashMap::from([("x", 4.0)]);
//! assert_eq!(engine.evaluate(&expr, &subs).unwrap(), 9.0);
//! ```

use crate::{
    canon::{add, multiply, power},
    expr::Expr,
    numerical::{self, error::Error, Substitutions},
    symbol::SymbolTable,
};
use std::{collections::BTreeSet, io, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The strategy used to bring expressions into canonical form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum Backend {
    /// Flatten operands and collect like terms and bases in maps keyed by structural hash.
    #[default]
    Hashed,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Hashed => write!(f, "hashed"),
        }
    }
}

/// Configuration of an [`Engine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// The canonicalization strategy.
    pub backend: Backend,
}

/// Builds, renders, and evaluates expressions with a fixed configuration and symbol table.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    symbols: Arc<SymbolTable>,
}

impl Engine {
    /// Creates an engine that interns symbols in the [global symbol table](SymbolTable::global).
    pub fn new(config: EngineConfig) -> Self {
        Self::with_symbol_table(config, Arc::clone(SymbolTable::global()))
    }

    /// Creates an engine that interns symbols in the given table.
    ///
    /// Symbols from different tables never compare equal, even if their names match.
    pub fn with_symbol_table(config: EngineConfig, symbols: Arc<SymbolTable>) -> Self {
        tracing::debug!(backend = %config.backend, "created engine");
        Self { config, symbols }
    }

    /// Returns the configuration of this engine.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the symbol table of this engine.
    pub fn symbol_table(&self) -> &Arc<SymbolTable> {
        &self.symbols
    }

    /// Creates a number.
    pub fn number(&self, value: f64) -> Expr {
        Expr::number(value)
    }

    /// Creates a symbol, interned in this engine's symbol table.
    pub fn symbol(&self, name: &str) -> Expr {
        Expr::symbol_in(&self.symbols, name)
    }

    /// Returns the canonical sum of the given terms.
    pub fn add(&self, terms: &[Expr]) -> Expr {
        match self.config.backend {
            Backend::Hashed => add::create(terms),
        }
    }

    /// Returns the canonical product of the given factors.
    pub fn mul(&self, factors: &[Expr]) -> Expr {
        match self.config.backend {
            Backend::Hashed => multiply::create(factors),
        }
    }

    /// Returns the canonical form of `base^exponent`.
    pub fn pow(&self, base: &Expr, exponent: &Expr) -> Expr {
        match self.config.backend {
            Backend::Hashed => power::create(base, exponent),
        }
    }

    /// Evaluates the expression, using `subs` for the values of its symbols.
    pub fn evaluate<S>(&self, expr: &Expr, subs: &S) -> Result<f64, Error>
    where
        S: Substitutions + ?Sized,
    {
        numerical::eval(expr, subs)
    }

    /// Renders the expression to text.
    pub fn render(&self, expr: &Expr) -> String {
        expr.to_string()
    }

    /// Returns the names of all symbols in the expression.
    pub fn symbols<'a>(&self, expr: &'a Expr) -> BTreeSet<&'a str> {
        expr.symbols()
    }

    /// Renders the report for an error that occurred while evaluating `expr`.
    ///
    /// The report quotes the rendered expression and highlights the spans of the error. It
    /// contains ANSI color codes.
    pub fn report(&self, expr: &Expr, err: &Error) -> io::Result<String> {
        cas_error::Error::from(err.clone()).render_report("expr", &self.render(expr))
    }
}
