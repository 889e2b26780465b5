use crate::utils::error::{Result, SolverError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_negative(field_name: &str, values: &[f64]) -> Result<()> {
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            return Err(SolverError::InvalidNumber {
                field: field_name.to_string(),
                row: 0,
                column: index,
                token: value.to_string(),
            });
        }
        if value < 0.0 {
            return Err(SolverError::NegativeValue {
                field: field_name.to_string(),
                index,
                value,
            });
        }
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, values: &[f64]) -> Result<()> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(SolverError::InvalidNumber {
                field: field_name.to_string(),
                row: 0,
                column: index,
                token: value.to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_not_empty<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(SolverError::EmptyInput {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_dimension(field_name: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(SolverError::DimensionMismatch {
            message: format!("{} has {} entries, expected {}", field_name, found, expected),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SolverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(SolverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("supply", &[0.0, 3.0, f64::INFINITY]).is_ok());
        assert!(matches!(
            validate_non_negative("supply", &[1.0, -2.0]),
            Err(SolverError::NegativeValue { index: 1, .. })
        ));
        assert!(validate_non_negative("supply", &[f64::NAN]).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("demand", &[1.0, 2.0]).is_ok());
        assert!(validate_finite("demand", &[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_validate_dimension() {
        assert!(validate_dimension("costs", 3, 3).is_ok());
        assert!(matches!(
            validate_dimension("costs", 3, 2),
            Err(SolverError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("on_failure", "stop", &["stop", "continue"]).is_ok());
        assert!(validate_one_of("on_failure", "retry", &["stop", "continue"]).is_err());
    }
}
