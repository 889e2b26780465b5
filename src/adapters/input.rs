use crate::domain::model::Problem;
use crate::utils::error::{Result, SolverError};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Tokens accepted in the cost matrix for a forbidden route.
pub const FORBIDDEN_TOKENS: [&str; 4] = ["inf", "infinity", "x", "-"];

/// Parses the textual request fields into a validated problem.
///
/// `supply` and `demand` are single comma-separated lines. `costs` holds one
/// comma-separated line per supply node; blank lines are ignored.
pub fn parse_problem(supply: &str, demand: &str, costs: &str) -> Result<Problem> {
    let supply = parse_quantities("supply", supply)?;
    let demand = parse_quantities("demand", demand)?;
    let costs = parse_costs(costs)?;

    tracing::debug!(
        supply_nodes = supply.len(),
        demand_nodes = demand.len(),
        cost_rows = costs.len(),
        "Parsed problem input"
    );

    Problem::from_rows(supply, demand, costs)
}

/// Parses one line of non-negative, finite numbers.
pub fn parse_quantities(field: &str, text: &str) -> Result<Vec<f64>> {
    let records = read_records(text)?;
    match records.len() {
        0 => Err(SolverError::EmptyInput {
            field: field.to_string(),
        }),
        1 => records[0]
            .iter()
            .enumerate()
            .map(|(column, token)| {
                let value = parse_number(field, 0, column, token)?;
                if !value.is_finite() {
                    return Err(invalid(field, 0, column, token));
                }
                if value < 0.0 {
                    return Err(SolverError::NegativeValue {
                        field: field.to_string(),
                        index: column,
                        value,
                    });
                }
                Ok(value)
            })
            .collect(),
        lines => Err(SolverError::DimensionMismatch {
            message: format!("{} spans {} lines, expected 1", field, lines),
        }),
    }
}

/// Parses the cost matrix rows. Forbidden-route tokens become `f64::INFINITY`.
pub fn parse_costs(text: &str) -> Result<Vec<Vec<f64>>> {
    let records = read_records(text)?;
    if records.is_empty() {
        return Err(SolverError::EmptyInput {
            field: "costs".to_string(),
        });
    }

    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            record
                .iter()
                .enumerate()
                .map(|(column, token)| parse_cost(row, column, token))
                .collect()
        })
        .collect()
}

fn parse_cost(row: usize, column: usize, token: &str) -> Result<f64> {
    if FORBIDDEN_TOKENS.contains(&token.to_ascii_lowercase().as_str()) {
        return Ok(f64::INFINITY);
    }
    let value = parse_number("costs", row, column, token)?;
    if !value.is_finite() {
        return Err(invalid("costs", row, column, token));
    }
    if value < 0.0 {
        return Err(SolverError::NegativeValue {
            field: "costs".to_string(),
            index: column,
            value,
        });
    }
    Ok(value)
}

fn parse_number(field: &str, row: usize, column: usize, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| invalid(field, row, column, token))
}

fn invalid(field: &str, row: usize, column: usize, token: &str) -> SolverError {
    SolverError::InvalidNumber {
        field: field.to_string(),
        row,
        column,
        token: token.to_string(),
    }
}

fn read_records(text: &str) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        // whitespace-only lines
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantities_trims_whitespace() {
        assert_eq!(
            parse_quantities("supply", " 20, 30 ,25 ").unwrap(),
            vec![20.0, 30.0, 25.0]
        );
    }

    #[test]
    fn test_parse_quantities_rejects_non_numeric_token() {
        let err = parse_quantities("demand", "10,abc,40").unwrap_err();
        match err {
            SolverError::InvalidNumber {
                field,
                column,
                token,
                ..
            } => {
                assert_eq!(field, "demand");
                assert_eq!(column, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_quantities_rejects_empty_and_infinite() {
        assert!(matches!(
            parse_quantities("supply", "   "),
            Err(SolverError::EmptyInput { .. })
        ));
        assert!(matches!(
            parse_quantities("supply", "1,inf"),
            Err(SolverError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_quantities("supply", "1,,2"),
            Err(SolverError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_quantities("supply", "4,-1"),
            Err(SolverError::NegativeValue { index: 1, .. })
        ));
    }

    #[test]
    fn test_parse_costs_skips_blank_lines_and_reads_forbidden_tokens() {
        let costs = parse_costs("8,6,10\n\n9,X,13\r\n14,9,-\n").unwrap();
        assert_eq!(costs.len(), 3);
        assert_eq!(costs[0], vec![8.0, 6.0, 10.0]);
        assert!(costs[1][1].is_infinite());
        assert!(costs[2][2].is_infinite());
    }

    #[test]
    fn test_parse_costs_rejects_nan() {
        assert!(matches!(
            parse_costs("1,NaN"),
            Err(SolverError::InvalidNumber { row: 0, column: 1, .. })
        ));
    }

    #[test]
    fn test_parse_problem_reports_ragged_rows() {
        let err = parse_problem("5,5", "5,5", "1,2\n3").unwrap_err();
        assert!(matches!(
            err,
            SolverError::RaggedMatrix {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_parse_problem_reports_dimension_mismatch() {
        let err = parse_problem("5,5,5", "5,5", "1,2\n3,4").unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_parse_problem() {
        let problem = parse_problem("20,30,25", "10,25,40", "8,6,10\n9,12,13\n14,9,16").unwrap();
        assert_eq!(problem.total_supply(), 75.0);
        assert_eq!(problem.costs.rows(), 3);
        assert_eq!(problem.costs[(2, 1)], 9.0);
    }
}
