use crate::domain::program::{Direction, Objective, ProgramLayout};

/// Maximize the floor variable, i.e. the smallest utility any agent receives.
pub fn compose_objective(layout: &ProgramLayout) -> Objective {
    Objective {
        terms: vec![(layout.floor_index(), 1.0)],
        direction: Direction::Maximize,
    }
}
