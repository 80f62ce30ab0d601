use std::str;

use crate::errors::CalcError;

/// Expression calculation result: either a double or a typed error
pub type CalcResult = Result<f64, CalcError>;
pub(crate) type CalcErrorResult = Result<(), CalcError>;

const F64_BUF_LEN: usize = 48;

/// Shortest round-trip decimal form of a result. The text is what seeds
/// the next expression after a commit, so it must lex as a single number
/// literal under the expression grammar, exponent forms included.
pub fn format_f64(g: f64) -> String {
    let mut buf = [b'\0'; F64_BUF_LEN];
    let mut s = match dtoa::write(&mut buf[..], g) {
        Ok(len) => match str::from_utf8(&buf[..len]) {
            Ok(s) => s.to_string(),
            Err(..) => format!("{}", g),
        },
        Err(..) => format!("{}", g),
    };
    // integral results read better without the fraction part
    if s.ends_with(".0") {
        s.truncate(s.len() - 2);
    }
    s
}

pub(crate) fn f64_equal(f1: f64, f2: f64) -> bool {
    (f1 - f2).abs() <= f64::EPSILON
}

/// Classifies a raw arithmetic outcome: any non-finite double is a domain
/// error, never a displayable number.
pub fn classify(g: f64) -> CalcResult {
    if g.is_finite() {
        Ok(g)
    } else {
        Err(CalcError::NotFinite(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::parse;

    #[test]
    fn test_format() {
        assert_eq!(format_f64(4.0), "4");
        assert_eq!(format_f64(-25.0), "-25");
        assert_eq!(format_f64(0.5), "0.5");
        assert_eq!(format_f64(3.141592653589793), "3.141592653589793");
    }

    #[test]
    fn test_result_text_reparses() {
        for v in &[4.0, -25.0, 0.5, 2.5e80, 1e-7, 3.141592653589793, 11186.0] {
            assert_eq!(parse::evaluate(&format_f64(*v)), Ok(*v));
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(2.5), Ok(2.5));
        assert_eq!(classify(f64::INFINITY).unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(classify(f64::NAN).unwrap_err().kind(), ErrorKind::Domain);
    }
}
