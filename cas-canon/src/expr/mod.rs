//! The canonical representation of symbolic expressions.
//!
//! An [`Expr`] is a cheap-to-clone, immutable handle to a node in an expression tree. Nodes are
//! one of: the numbers `0`, `1`, and `-1` (which have dedicated [`Kind`]s), any other number, a
//! symbol, or a power, product, or sum of other expressions.
//!
//! Composite expressions are never built directly. They are produced by the routines in
//! [`crate::canon`] (also reachable through [`Expr::sum`], [`Expr::product`], [`Expr::pow`], and
//! the arithmetic operators), which flatten nested sums and products, collect like terms and like
//! bases, absorb identity elements, and sort operands. The result is a **canonical form**: two
//! mathematically identical constructions, such as `x + x + 1` and `1 + 2x`, produce structurally
//! identical trees.
//!
//! # Structural equality
//!
//! Since operands are stored in canonical order, two expressions are equal if they have the same
//! kind and pairwise equal operands, **in order**. Every node caches a 32-bit structural hash
//! computed from its kind and the hashes of its operands (see [`crate::hash`]), which lets most
//! comparisons of unequal expressions bail out immediately.
//!
//! Structural equality is not semantic equality. `(x + 1)^2` and `1 + 2x + x^2` are equal
//! mathematically, but no expansion is done, so they are different expressions.
//!
//! # Canonical order
//!
//! [`Ord`] sorts expressions by [`Kind`] first, in the order `0 < 1 < -1 < number < symbol <
//! power < product < sum`. Numbers of the same kind compare by value, symbols by name, powers by
//! base then exponent, and products and sums compare their operands lexicographically, with the
//! operand count as the final tiebreak.

mod fmt;
mod iter;

use crate::canon::{add, multiply, power};
use crate::hash::{combine_hash, fast_hash};
use crate::symbol::{Symbol, SymbolTable};
pub use iter::ExprIter;
use once_cell::sync::Lazy;
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    hash::{Hash, Hasher},
    iter::once,
    ops::{Add, Div, Mul, Neg, Sub},
    sync::Arc,
};

/// The shared `0`.
static ZERO: Lazy<Expr> = Lazy::new(|| Expr::from_node(Node::Zero));

/// The shared `1`.
static ONE: Lazy<Expr> = Lazy::new(|| Expr::from_node(Node::One));

/// The shared `-1`.
static NEGATIVE_ONE: Lazy<Expr> = Lazy::new(|| Expr::from_node(Node::NegativeOne));

/// The kind of an expression.
///
/// The declaration order of the variants is the canonical order of kinds, so the derived [`Ord`]
/// is the first step of comparing two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Zero,
    One,
    NegativeOne,
    Number,
    Symbol,
    Pow,
    Mul,
    Add,
}

impl Kind {
    /// Returns the tag used when hashing expressions of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Zero => "Zero",
            Self::One => "One",
            Self::NegativeOne => "NegativeOne",
            Self::Number => "Number",
            Self::Symbol => "Symbol",
            Self::Pow => "Pow",
            Self::Mul => "Mul",
            Self::Add => "Add",
        }
    }

    /// Returns true if expressions of this kind are numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Zero | Self::One | Self::NegativeOne | Self::Number)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// The contents of an expression node.
#[derive(Debug, Clone)]
pub enum Node {
    /// The number `0`.
    Zero,

    /// The number `1`.
    One,

    /// The number `-1`.
    NegativeOne,

    /// Any number other than `0`, `1`, and `-1`.
    Number(f64),

    /// A variable, such as `x` or `y`.
    Symbol(Symbol),

    /// A base raised to an exponent, stored as `[base, exponent]`.
    Pow([Expr; 2]),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// Multiple terms added together.
    Add(Vec<Expr>),
}

impl Node {
    /// Returns the kind of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Zero => Kind::Zero,
            Self::One => Kind::One,
            Self::NegativeOne => Kind::NegativeOne,
            Self::Number(_) => Kind::Number,
            Self::Symbol(_) => Kind::Symbol,
            Self::Pow(_) => Kind::Pow,
            Self::Mul(_) => Kind::Mul,
            Self::Add(_) => Kind::Add,
        }
    }

    /// Computes the structural hash of this node.
    fn compute_hash(&self) -> u32 {
        let kind = self.kind();
        match self {
            Self::Zero => fast_hash(&format!("{}:0", kind.tag())),
            Self::One => fast_hash(&format!("{}:1", kind.tag())),
            Self::NegativeOne => fast_hash(&format!("{}:-1", kind.tag())),
            Self::Number(n) => fast_hash(&format!("{}:{}", kind.tag(), n)),
            Self::Symbol(sym) => fast_hash(&format!("{}:{}", kind.tag(), sym.name())),
            Self::Pow(operands) => combine_operands(kind, operands),
            Self::Mul(operands) | Self::Add(operands) => combine_operands(kind, operands),
        }
    }
}

/// Hashes a composite node from its kind and the hashes of its operands, in order.
fn combine_operands(kind: Kind, operands: &[Expr]) -> u32 {
    combine_hash(once(fast_hash(kind.tag())).chain(operands.iter().map(Expr::structural_hash)))
}

/// The allocation behind an [`Expr`].
struct Inner {
    hash: u32,
    node: Node,
}

/// An immutable, canonical expression.
///
/// Cloning an [`Expr`] is cheap; clones share the same node. For more information, see the
/// [module-level documentation](self).
#[derive(Clone)]
pub struct Expr(Arc<Inner>);

impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.node(), f)
    }
}

impl Expr {
    /// Wraps the node in a new allocation, computing its hash.
    fn from_node(node: Node) -> Self {
        let hash = node.compute_hash();
        Self(Arc::new(Inner { hash, node }))
    }

    /// Returns the shared `0`.
    pub fn zero() -> Self {
        ZERO.clone()
    }

    /// Returns the shared `1`.
    pub fn one() -> Self {
        ONE.clone()
    }

    /// Returns the shared `-1`.
    pub fn neg_one() -> Self {
        NEGATIVE_ONE.clone()
    }

    /// Creates a number. The values `0`, `1`, and `-1` (including `-0.0`) return the shared
    /// singletons.
    pub fn number(value: f64) -> Self {
        if value == 0.0 {
            Self::zero()
        } else if value == 1.0 {
            Self::one()
        } else if value == -1.0 {
            Self::neg_one()
        } else {
            Self::from_node(Node::Number(value))
        }
    }

    /// Creates a symbol, interned in the [global symbol table](SymbolTable::global).
    pub fn symbol(name: &str) -> Self {
        Self::symbol_in(SymbolTable::global(), name)
    }

    /// Creates a symbol interned in the given table.
    pub fn symbol_in(table: &SymbolTable, name: &str) -> Self {
        Self::from_symbol(table.intern(name))
    }

    /// Creates an expression from an already interned symbol.
    pub fn from_symbol(symbol: Symbol) -> Self {
        Self::from_node(Node::Symbol(symbol))
    }

    /// Builds a sum node over operands that are already in canonical form and order.
    pub(crate) fn new_add(terms: Vec<Self>) -> Self {
        Self::from_node(Node::Add(terms))
    }

    /// Builds a product node over operands that are already in canonical form and order.
    pub(crate) fn new_mul(factors: Vec<Self>) -> Self {
        Self::from_node(Node::Mul(factors))
    }

    /// Builds a power node without any absorption.
    pub(crate) fn new_pow(base: Self, exponent: Self) -> Self {
        Self::from_node(Node::Pow([base, exponent]))
    }

    /// Returns the canonical sum of the given terms.
    pub fn sum(terms: &[Self]) -> Self {
        add::create(terms)
    }

    /// Returns the canonical product of the given factors.
    pub fn product(factors: &[Self]) -> Self {
        multiply::create(factors)
    }

    /// Returns this expression raised to the given exponent, in canonical form.
    pub fn pow(&self, exponent: &Self) -> Self {
        power::create(self, exponent)
    }

    /// Returns the node of this expression.
    pub fn node(&self) -> &Node {
        &self.0.node
    }

    /// Returns the kind of this expression.
    pub fn kind(&self) -> Kind {
        self.0.node.kind()
    }

    /// Returns the structural hash of this expression.
    pub fn structural_hash(&self) -> u32 {
        self.0.hash
    }

    /// Returns the operands of this expression, in canonical order. A power has two operands, the
    /// base and the exponent. Numbers and symbols have none.
    pub fn operands(&self) -> &[Self] {
        match self.node() {
            Node::Pow(operands) => &operands[..],
            Node::Mul(operands) | Node::Add(operands) => operands.as_slice(),
            Node::Zero | Node::One | Node::NegativeOne | Node::Number(_) | Node::Symbol(_) => &[],
        }
    }

    /// If the expression is a number, returns its value.
    pub fn as_number(&self) -> Option<f64> {
        match self.node() {
            Node::Zero => Some(0.0),
            Node::One => Some(1.0),
            Node::NegativeOne => Some(-1.0),
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the expression is a number.
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// If the expression is a symbol, returns a reference to it.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self.node() {
            Node::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if both handles point to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the names of all symbols in this expression.
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Self::as_symbol)
            .map(Symbol::name)
            .collect()
    }
}

/// Numbers are equal if their values are; all NaNs are equal to each other.
fn eq_number(lhs: f64, rhs: f64) -> bool {
    lhs == rhs || (lhs.is_nan() && rhs.is_nan())
}

/// Orders numbers by value, with NaN after every other number.
fn cmp_number(lhs: f64, rhs: f64) -> Ordering {
    lhs.partial_cmp(&rhs)
        .unwrap_or_else(|| lhs.is_nan().cmp(&rhs.is_nan()))
}

/// Checks if two expressions are structurally equal.
///
/// Two handles to the same node are trivially equal. Otherwise, the hashes and kinds must match,
/// then numbers compare by value, symbols by id, and composite expressions compare their operands
/// pairwise, in order.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.structural_hash() != other.structural_hash() || self.kind() != other.kind() {
            return false;
        }

        match (self.node(), other.node()) {
            (Node::Number(lhs), Node::Number(rhs)) => eq_number(*lhs, *rhs),
            (Node::Symbol(lhs), Node::Symbol(rhs)) => lhs == rhs,
            (Node::Pow(lhs), Node::Pow(rhs)) => lhs == rhs,
            (Node::Mul(lhs), Node::Mul(rhs)) | (Node::Add(lhs), Node::Add(rhs)) => lhs == rhs,
            // same kind, and the remaining kinds carry no data
            _ => true,
        }
    }
}

impl Eq for Expr {}

/// Feeds the cached structural hash, so hashing an expression is O(1).
impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.structural_hash());
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares expressions in canonical order. See the [module-level documentation](self).
impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }

        self.kind().cmp(&other.kind()).then_with(|| match (self.node(), other.node()) {
            (Node::Number(lhs), Node::Number(rhs)) => cmp_number(*lhs, *rhs),
            (Node::Symbol(lhs), Node::Symbol(rhs)) => lhs.cmp(rhs),
            (Node::Pow([lhs_base, lhs_exp]), Node::Pow([rhs_base, rhs_exp])) => {
                lhs_base.cmp(rhs_base).then_with(|| lhs_exp.cmp(rhs_exp))
            },
            (Node::Mul(lhs), Node::Mul(rhs)) | (Node::Add(lhs), Node::Add(rhs)) => {
                lhs.iter().cmp(rhs.iter())
            },
            _ => Ordering::Equal,
        })
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Self::from_symbol(symbol)
    }
}

/// Adds two expressions, producing their canonical sum.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        add::create(&[self, rhs])
    }
}

/// Subtracts two expressions, treated as `lhs + -1 * rhs`.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        add::create(&[self, -rhs])
    }
}

/// Multiplies two expressions, producing their canonical product.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        multiply::create(&[self, rhs])
    }
}

/// Divides two expressions, treated as `lhs * rhs^-1`.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let recip = power::create(&rhs, &Self::neg_one());
        multiply::create(&[self, recip])
    }
}

/// Multiplies this expression by -1.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        multiply::create(&[Self::neg_one(), self])
    }
}
