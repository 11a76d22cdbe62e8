use crate::error::{DivisionError, Result};

/// Check that a row-based valuation grid is non-empty, rectangular,
/// and holds only finite, non-negative numbers.
///
/// Returns the `(agents, resources)` shape on success.
pub fn validate_valuations(rows: &[Vec<f64>]) -> Result<(usize, usize)> {
    if rows.is_empty() {
        return Err(DivisionError::Input(
            "at least one agent is required".to_string(),
        ));
    }

    let resources = rows[0].len();
    if resources == 0 {
        return Err(DivisionError::Input(
            "at least one resource is required".to_string(),
        ));
    }

    for (agent, row) in rows.iter().enumerate() {
        if row.len() != resources {
            return Err(DivisionError::Input(format!(
                "agent {} has {} valuations, expected {}",
                agent,
                row.len(),
                resources,
            )));
        }
        validate_entries(agent, row)?;
    }

    Ok((rows.len(), resources))
}

/// Check a single agent's valuations for finiteness and sign.
pub fn validate_entries(agent: usize, row: &[f64]) -> Result<()> {
    for (resource, &value) in row.iter().enumerate() {
        if !value.is_finite() {
            return Err(DivisionError::Input(format!(
                "valuation of agent {} for resource {} is not a finite number",
                agent, resource,
            )));
        }
        if value < 0.0 {
            return Err(DivisionError::Input(format!(
                "valuation of agent {} for resource {} is negative ({})",
                agent, resource, value,
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valuations_given_rectangular_input_should_return_shape() {
        let rows = vec![vec![80.0, 19.0, 1.0], vec![70.0, 1.0, 29.0]];
        assert_eq!(validate_valuations(&rows), Ok((2, 3)));
    }

    #[test]
    fn test_validate_valuations_given_zero_entries_should_return_ok() {
        let rows = vec![vec![0.0, 0.0], vec![0.0, 5.0]];
        assert!(validate_valuations(&rows).is_ok());
    }

    #[test]
    fn test_validate_valuations_given_no_agents_should_return_error() {
        let rows: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            validate_valuations(&rows),
            Err(DivisionError::Input(_))
        ));
    }

    #[test]
    fn test_validate_valuations_given_no_resources_should_return_error() {
        let rows = vec![vec![], vec![]];
        assert!(matches!(
            validate_valuations(&rows),
            Err(DivisionError::Input(_))
        ));
    }

    #[test]
    fn test_validate_valuations_given_ragged_rows_should_return_error() {
        let rows = vec![vec![1.0, 2.0], vec![1.0]];
        let err = validate_valuations(&rows).unwrap_err();
        assert_eq!(
            err,
            DivisionError::Input("agent 1 has 1 valuations, expected 2".to_string())
        );
    }

    #[test]
    fn test_validate_valuations_given_negative_entry_should_return_error() {
        let rows = vec![vec![1.0, -0.5]];
        assert!(validate_valuations(&rows).is_err());
    }

    #[test]
    fn test_validate_valuations_given_nan_or_infinity_should_return_error() {
        assert!(validate_valuations(&[vec![f64::NAN]]).is_err());
        assert!(validate_valuations(&[vec![f64::INFINITY]]).is_err());
    }
}
