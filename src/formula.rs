use std::collections::HashMap;

use crate::value::{classify, CalcResult};

/// Variable bindings for one compute invocation. Transient: built from
/// the host's input fields, used once, thrown away.
pub type Bindings = HashMap<String, f64>;

/// Looks up one bound variable. A missing binding evaluates as NaN so the
/// failure surfaces as a domain error after classification instead of a
/// panic mid-formula.
pub fn binding(bindings: &Bindings, name: &str) -> f64 {
    bindings.get(name).copied().unwrap_or(f64::NAN)
}

/// Parses a user-editable text field into a binding value; blank or
/// unparsable text is NaN.
pub fn parse_field(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

/// One input field of a named formula, with an optional prefilled value
/// for universal constants.
pub struct Field {
    pub id: &'static str,
    pub label: &'static str,
    pub default: Option<f64>,
}

/// A predefined expression over named variables, evaluated independently
/// of the expression buffer. Defined statically by the host, read-only
/// afterwards.
pub struct FormulaDefinition {
    pub name: &'static str,
    /// Human-readable equation shown on the formula card.
    pub equation: &'static str,
    pub fields: &'static [Field],
    pub compute: fn(&Bindings) -> f64,
}

/// Evaluates `def` over `bindings` and classifies the outcome. The caller
/// is responsible for supplying a complete numeric mapping; nothing is
/// validated here. The result is handed back for the host to inject into
/// the buffer - it never touches the history log.
pub fn compute_formula(def: &FormulaDefinition, bindings: &Bindings) -> CalcResult {
    classify((def.compute)(bindings))
}
