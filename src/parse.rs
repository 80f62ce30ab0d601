use pest::Parser;
use std::f64::consts::{E, PI};

use crate::errors::*;
use crate::normalize::normalize;
use crate::stack::{Stack, UNARY_MINUS};
use crate::value::{classify, CalcResult};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

/// Returns a constant value by its name. Names are matched lowercase.
fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

/// Evaluates an already normalized expression and returns the raw double:
/// a division by zero comes back as an infinity from here, not as an
/// error. Every error this function reports is a syntax failure.
pub fn eval_raw(expr: &str) -> CalcResult {
    let pairs = match CalcParser::parse(Rule::expr, expr) {
        Ok(p) => p,
        Err(..) => return Err(CalcError::ParseFailed("invalid expression".to_string())),
    };

    let mut stk = Stack::new();
    // one token of lookbehind decides between unary and binary minus and
    // rejects juxtaposed values - there is no implicit multiplication
    let mut last_value = false;
    let mut last_func = false;

    for pair in pairs {
        let rule = pair.as_rule();
        let val = pair.as_span().as_str().to_lowercase();
        match rule {
            Rule::num => {
                if last_value || last_func {
                    return Err(CalcError::UnexpectedToken(val));
                }
                let v = val
                    .parse::<f64>()
                    .map_err(|_| CalcError::StrToFloat(val.clone()))?;
                stk.push("", Some(v))?;
                last_value = true;
            }
            Rule::ident => {
                if last_value || last_func {
                    return Err(CalcError::UnexpectedToken(val));
                }
                if stk.is_func(&val) {
                    stk.push(&val, None)?;
                    last_func = true;
                } else if let Some(c) = constant(&val) {
                    stk.push("", Some(c))?;
                    last_value = true;
                } else {
                    return Err(CalcError::UnknownIdent(val));
                }
            }
            Rule::open_b => {
                if last_value {
                    return Err(CalcError::UnexpectedToken(val));
                }
                stk.push("(", None)?;
                last_func = false;
            }
            Rule::close_b => {
                if last_func {
                    return Err(CalcError::UnexpectedToken(val));
                }
                stk.push(")", None)?;
                last_value = true;
            }
            Rule::operator => {
                if last_func {
                    return Err(CalcError::UnexpectedToken(val));
                }
                if val == "-" && !last_value {
                    stk.push(UNARY_MINUS, None)?;
                } else if val == "+" && !last_value {
                    // unary plus is a no-op
                } else {
                    stk.push(&val, None)?;
                }
                last_value = false;
            }
            Rule::EOI => {}
            _ => return Err(CalcError::Unreachable),
        }
    }

    stk.calculate()
}

/// The full evaluator contract: normalizes the display notation, parses
/// and evaluates, then classifies the outcome so a non-finite result is a
/// domain error. Pure function of its argument; safe to call from
/// anywhere.
pub fn evaluate(expr: &str) -> CalcResult {
    classify(eval_raw(&normalize(expr))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::f64_equal;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("3+2×4"), Ok(11.0));
        assert_eq!(evaluate("(1+2)×3"), Ok(9.0));
        assert_eq!(evaluate("10−4−3"), Ok(3.0));
        assert_eq!(evaluate("12÷3÷2"), Ok(2.0));
        assert_eq!(evaluate("2^3^2"), Ok(512.0));
        assert_eq!(evaluate("2^−3"), Ok(0.125));
        // unary minus binds tighter than the power operator
        assert_eq!(evaluate("−2^2"), Ok(4.0));
        assert_eq!(evaluate("5"), Ok(5.0));
        assert_eq!(evaluate("−(2+3)"), Ok(-5.0));
    }

    #[test]
    fn test_functions() {
        assert_eq!(evaluate("sin(0)"), Ok(0.0));
        assert_eq!(evaluate("cos(0)"), Ok(1.0));
        assert_eq!(evaluate("tan(0)"), Ok(0.0));
        assert_eq!(evaluate("√(9)"), Ok(3.0));
        assert!(f64_equal(evaluate("√(2)").unwrap(), 2f64.sqrt()));
        assert!((evaluate("log(1000)").unwrap() - 3.0).abs() < 1e-12);
        assert!((evaluate("ln(e)").unwrap() - 1.0).abs() < 1e-12);
        assert!((evaluate("sin(π÷2)").unwrap() - 1.0).abs() < 1e-12);
        assert!(f64_equal(evaluate("√(9)^2").unwrap(), 9.0));
        assert!(f64_equal(evaluate("2×sin(cos(0))").unwrap(), 2.0 * 1f64.sin()));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(evaluate("2e3"), Ok(2000.0));
        assert_eq!(evaluate("1e+2"), Ok(100.0));
        assert_eq!(evaluate("2.5e−3"), Ok(0.0025));
        // a bare `e` is Euler's constant, not a truncated literal
        assert!(f64_equal(evaluate("e").unwrap(), E));
        assert!(f64_equal(evaluate("2×e").unwrap(), 2.0 * E));
        assert!(f64_equal(evaluate("e+2").unwrap(), E + 2.0));
        assert!(f64_equal(evaluate("π").unwrap(), PI));
        // `e` trailed by nothing numeric does not merge with the 2
        assert_eq!(evaluate("2e").unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(evaluate(""), Err(CalcError::EmptyExpression));
        assert_eq!(evaluate("("), Err(CalcError::OpenBracketMismatch));
        assert_eq!(evaluate(")"), Err(CalcError::ClosingBracketMismatch));
        assert_eq!(evaluate("5+"), Err(CalcError::TooManyOps));
        assert_eq!(evaluate("sin("), Err(CalcError::OpenBracketMismatch));
        assert_eq!(evaluate("2 3"), Err(CalcError::UnexpectedToken("3".to_string())));
        assert_eq!(evaluate("2(3)"), Err(CalcError::UnexpectedToken("(".to_string())));
        assert_eq!(evaluate("foo(2)"), Err(CalcError::UnknownIdent("foo".to_string())));
        for expr in &["", "(", "5+", "sin(", "1..2", "2π", "@", "sin()", "."] {
            assert_eq!(evaluate(expr).unwrap_err().kind(), ErrorKind::Syntax, "{}", expr);
        }
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(evaluate("1÷0"), Err(CalcError::NotFinite(f64::INFINITY)));
        assert_eq!(evaluate("√(−4)").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(evaluate("log(0)").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(evaluate("ln(−1)").unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(evaluate("0÷0").unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_raw_result_is_unclassified() {
        // the raw evaluator hands back whatever the arithmetic produced;
        // classification is the caller's job
        assert_eq!(eval_raw("1/0"), Ok(f64::INFINITY));
        assert!(eval_raw("sqrt(-4)").unwrap().is_nan());
    }
}
