//! Integer programming by discrete-gradient ascent.
//!
//! Given non-negative integer variables, an objective expression to
//! maximize and linear inequality constraints, searches for a feasible
//! assignment that locally maximizes the objective. No LP solver is
//! involved:
//!
//! - **Expressions** ([`expr`]): a restricted arithmetic/relational
//!   language, parsed to a typed tree and evaluated over variable
//!   bindings only.
//! - **Model** ([`model`]): ordered variables, objective and constraints.
//! - **Ascent** ([`ascent`]): discrete gradient and the iterative solver
//!   that keeps every committed binding feasible.
//!
//! # Example
//!
//! ```
//! use u_discrete_ascent::ascent::AscentConfig;
//! use u_discrete_ascent::model::Model;
//!
//! let mut model = Model::new("integer maximization");
//! model.integer_var("x1", 0);
//! model.integer_var("x2", 0);
//! model.integer_var("x3", 0);
//! model.maximize("4*x1 + x2 + 100*x3");
//! model.add_constraint("9*x1 + x2 + 180*x3 <= 360");
//! model.add_constraint("3*x1 + x2 + 60*x3 <= 240");
//!
//! let report = model.solve(&AscentConfig::default())?;
//! assert!(report.value("x3").unwrap() > 0);
//! println!("{report}");
//! # Ok::<(), u_discrete_ascent::error::SolveError>(())
//! ```
//!
//! # Concurrency
//!
//! Solving is synchronous and mutates the model in place through
//! `&mut Model`. There is no cancellation other than the iteration cap.

pub mod ascent;
pub mod error;
pub mod expr;
pub mod model;
