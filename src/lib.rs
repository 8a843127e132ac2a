//! # boolexpr-rs: Boolean expressions in Rust
//!
//! **`boolexpr-rs`** is a manager-centric library for building, canonicalizing and rewriting
//! **propositional Boolean expressions**, and for deciding their satisfiability.
//!
//! ## Expressions as DAGs
//!
//! Every expression lives in a [`Context`][crate::context::Context] and is addressed by a
//! copyable [`Bx`][crate::reference::Bx] handle. The context hash-conses its node table,
//! so structurally identical subexpressions are shared and structural equality is handle equality.
//!
//! Nodes come in three shapes:
//!
//! - **constants**: `0`, `1`, and the unknowns `X` (logical) and `?` (illogical),
//! - **literals**: a variable `x` or its complement `~x`,
//! - **operators**: `Or`, `And`, `Xor`, `Equal` (n-ary), `Implies`, `IfThenElse`, and their negations.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolexpr_rs::context::Context;
//!
//! // 1. Initialize the context
//! let ctx = Context::default();
//!
//! // 2. Create variables by name
//! let a = ctx.get_var("a");
//! let b = ctx.get_var("b");
//!
//! // 3. Build a formula: f = a => b
//! let f = ctx.impl_(a, b);
//! assert_eq!(ctx.to_expr_string(f), "Implies(a, b)");
//!
//! // 4. Rewrite it
//! let g = ctx.to_nnf(f);
//! assert_eq!(ctx.to_expr_string(g), "Or(~a, b)");
//!
//! // 5. Check properties
//! assert!(ctx.sat(f).is_some());
//! assert!(ctx.equiv(f, g));
//! ```
//!
//! ## Core Components
//!
//! - **[`context`]**: The [`Context`][crate::context::Context] manager, variables and node access.
//! - **[`build`]**: Raw and reduced constructors.
//! - **[`rewrite`]**: Simplification and normal forms (NNF, CNF, DNF).
//! - **[`subst`]**: Composition, restriction, cofactors and quantification.
//! - **[`tseytin`]**: Equisatisfiable CNF encoding.
//! - **[`sat`]**: Satisfiability, equivalence and model counting.

pub mod argset;
pub mod build;
pub mod cache;
pub mod context;
pub mod display;
pub mod error;
pub mod eval;
pub mod inspect;
pub mod iter;
pub mod kind;
pub mod node;
pub mod order;
pub mod reference;
pub mod rewrite;
pub mod sat;
pub mod subst;
pub mod table;
pub mod tseytin;
pub mod types;
pub mod utils;
