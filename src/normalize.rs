/// Maps the widget's display glyphs onto the grammar alphabet: `×` `÷` `−`
/// become the ASCII operators, `π` and `√` become the names the evaluator
/// resolves. Everything else, the exponent marker `e` included, passes
/// through untouched; whether an `e` is an exponent or Euler's constant is
/// decided by the grammar, not here.
pub fn normalize(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    for c in expr.chars() {
        match c {
            '×' => out.push('*'),
            '÷' => out.push('/'),
            '−' => out.push('-'),
            'π' => out.push_str("pi"),
            '√' => out.push_str("sqrt"),
            _ => out.push(c),
        }
    }
    out
}
