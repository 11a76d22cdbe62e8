//! Solver-agnostic linear program and the max-min fair division formulation.
//!
//! Variables are addressed by index. For an `n x m` valuation matrix the
//! allocation entry `(i, j)` lives at index `i * m + j` and the floor
//! variable at index `n * m`; [`ProgramLayout`] is the only place that knows this.

use crate::domain::matrix::ValuationMatrix;
use crate::domain::objective::compose_objective;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

/// A continuous decision variable with (possibly infinite) bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `sum(terms) == rhs`
    Equal,
    /// `sum(terms) <= rhs`
    LessOrEqual,
}

/// Sparse linear constraint over variable indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub kind: ConstraintKind,
    pub rhs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub terms: Vec<(usize, f64)>,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: Objective,
}

impl LinearProgram {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}

/// Where each quantity of the division lives in the program's variable vector,
/// and the factor the valuations were divided by before entering the program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramLayout {
    pub agents: usize,
    pub resources: usize,
    /// Largest valuation, or `1.0` when every valuation is zero. The floor
    /// variable is measured in units of this value.
    pub scale: f64,
}

impl ProgramLayout {
    pub fn allocation_index(&self, agent: usize, resource: usize) -> usize {
        agent * self.resources + resource
    }

    pub fn floor_index(&self) -> usize {
        self.agents * self.resources
    }

    pub fn num_variables(&self) -> usize {
        self.floor_index() + 1
    }
}

/// Build the egalitarian program for `valuations`:
///
/// - `allocation[i][j]` in `[0, 1]` for every agent/resource pair
/// - a free `floor` variable
/// - per resource `j`: `sum_i allocation[i][j] == 1`
/// - per agent `i`: `floor - sum_j valuation[i][j] / scale * allocation[i][j] <= 0`
/// - maximize `floor`
///
/// Dividing every valuation by the same `scale` leaves the optimal allocation
/// unchanged and keeps coefficients within `[0, 1]`, so backends see the same
/// program shape at any magnitude. The optimal floor is `scale` times the
/// floor variable.
///
/// Construction never fails; the matrix has already been validated.
pub fn build_program(valuations: &ValuationMatrix) -> (LinearProgram, ProgramLayout) {
    let largest = valuations.max_value();
    let layout = ProgramLayout {
        agents: valuations.agents(),
        resources: valuations.resources(),
        scale: if largest > 0.0 { largest } else { 1.0 },
    };

    let mut variables = Vec::with_capacity(layout.num_variables());
    for i in 0..layout.agents {
        for j in 0..layout.resources {
            variables.push(Variable {
                name: format!("allocation_{}_{}", i, j),
                lower: 0.0,
                upper: 1.0,
            });
        }
    }
    variables.push(Variable {
        name: "floor".to_string(),
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    });

    let mut constraints = Vec::with_capacity(layout.resources + layout.agents);

    // Every resource is handed out completely, no more and no less.
    for j in 0..layout.resources {
        constraints.push(Constraint {
            name: format!("resource_{}_fully_allocated", j),
            terms: (0..layout.agents)
                .map(|i| (layout.allocation_index(i, j), 1.0))
                .collect(),
            kind: ConstraintKind::Equal,
            rhs: 1.0,
        });
    }

    // Zero valuations contribute nothing, so they are left out of the row.
    for i in 0..layout.agents {
        let mut terms = Vec::with_capacity(layout.resources + 1);
        terms.push((layout.floor_index(), 1.0));
        for (j, &value) in valuations.row(i).iter().enumerate() {
            if value != 0.0 {
                terms.push((layout.allocation_index(i, j), -value / layout.scale));
            }
        }
        constraints.push(Constraint {
            name: format!("agent_{}_above_floor", i),
            terms,
            kind: ConstraintKind::LessOrEqual,
            rhs: 0.0,
        });
    }

    let program = LinearProgram {
        variables,
        constraints,
        objective: compose_objective(&layout),
    };

    log::debug!(
        "built egalitarian program: {} agents, {} resources, {} variables, {} constraints, scale {:e}",
        layout.agents,
        layout.resources,
        program.num_variables(),
        program.num_constraints(),
        layout.scale,
    );

    (program, layout)
}
