use tracing::debug;

use super::{param, Handler, Parameters};
use crate::calc::{evaluate, format_number};
use crate::error::Error;
use crate::extract::spoken_to_expression;

const KEYWORDS: &[&str] = &[
    "calculate", "compute", "math", "plus", "minus", "times", "divided",
];

/// Evaluates the "expression" parameter with the arithmetic-only evaluator
#[derive(Debug, Default)]
pub struct CalculatorHandler;

impl CalculatorHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Handler for CalculatorHandler {
    fn name(&self) -> &'static str {
        "calculator"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, _command: &str, parameters: Option<&Parameters>) -> String {
        let Some(expression) = param(parameters, "expression") else {
            return "What would you like me to calculate?".to_string();
        };

        let expression = spoken_to_expression(expression);
        match evaluate(&expression).map_err(Error::from) {
            Ok(value) => format!("The result is {}.", format_number(value)),
            Err(e) => {
                debug!(expression = %expression, error = %e, "rejected expression");
                format!("I couldn't calculate that expression. Error: {}", e)
            }
        }
    }
}
