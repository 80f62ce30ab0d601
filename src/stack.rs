use lazy_static::lazy_static;

use crate::errors::*;
use crate::value::{CalcErrorResult, CalcResult};

#[derive(Clone, Debug)]
pub(crate) enum Entry {
    Val(f64),
    Op(String, i32, bool),
    OpenB,
    Func(String),
}

pub(crate) struct Stack {
    queue: Vec<Entry>,
    output: Vec<Entry>,
    values: Vec<f64>,
}

pub(crate) const UNARY_MINUS: &str = "---";

lazy_static! {
    pub(crate) static ref STD_FUNCS: Vec<&'static str> =
        ["sin", "cos", "tan", "log", "ln", "sqrt"].to_vec();
}

impl Stack {
    fn priority(op: &str) -> (i32, bool) {
        match op {
            UNARY_MINUS => (20, true), // negate
            "^" => (17, true),         // power
            "*" | "/" => (12, false),  // mult, div
            "+" | "-" => (8, false),   // add, sub
            _ => (0, false),           // invalid op
        }
    }

    pub(crate) fn is_func(&self, s: &str) -> bool {
        STD_FUNCS.iter().any(|fname| *fname == s)
    }

    // move operators from the queue to output while the top operator in the
    // queue has equal or greater priority
    fn pop_while_priority(&mut self, priority: i32) {
        while let Some(e) = self.queue.pop() {
            match &e {
                Entry::OpenB => {
                    self.queue.push(e);
                    return;
                }
                Entry::Func(..) => self.output.push(e),
                Entry::Op(_, p, right) => {
                    if *p > priority || (*p == priority && !*right) {
                        self.output.push(e);
                    } else {
                        self.queue.push(e);
                        return;
                    }
                }
                // values never sit in the queue
                Entry::Val(..) => return,
            }
        }
    }

    // move operators from the queue to output until the opening bracket
    fn pop_until_bracket(&mut self) -> CalcErrorResult {
        loop {
            match self.queue.pop() {
                None => return Err(CalcError::ClosingBracketMismatch),
                Some(Entry::OpenB) => return Ok(()),
                Some(e) => self.output.push(e),
            }
        }
    }

    // move everything left in the queue to output once the expression ends;
    // an opening bracket still in the queue means it was never closed
    fn pop_all(&mut self) -> CalcErrorResult {
        while let Some(e) = self.queue.pop() {
            match &e {
                Entry::OpenB => return Err(CalcError::OpenBracketMismatch),
                _ => self.output.push(e),
            }
        }
        Ok(())
    }

    // ------------ PUBLIC -----------------

    pub(crate) fn new() -> Self {
        Stack {
            queue: Vec::new(),
            output: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, op: &str, val: Option<f64>) -> CalcErrorResult {
        if op.is_empty() {
            match val {
                Some(v) => self.output.push(Entry::Val(v)),
                None => return Err(CalcError::EmptyValue),
            }
            return Ok(());
        }

        if self.is_func(op) {
            self.queue.push(Entry::Func(op.to_owned()));
            return Ok(());
        }

        if op == "(" {
            self.queue.push(Entry::OpenB);
            return Ok(());
        }
        if op == ")" {
            return self.pop_until_bracket();
        }

        let (pri, right_assoc) = Stack::priority(op);
        if pri == 0 {
            return Err(CalcError::InvalidOp(op.to_owned()));
        }

        self.pop_while_priority(pri);
        self.queue.push(Entry::Op(op.to_owned(), pri, right_assoc));

        Ok(())
    }

    pub(crate) fn calculate(&mut self) -> CalcResult {
        self.pop_all()?;
        if self.output.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        self.values = Vec::new();

        for i in 0..self.output.len() {
            let o = self.output[i].clone();
            match o {
                Entry::Val(v) => self.values.push(v),
                Entry::Op(op, ..) => self.process_operator(&op)?,
                Entry::Func(fname) => self.process_function(&fname)?,
                Entry::OpenB => return Err(CalcError::Unreachable),
            }
        }

        if self.values.len() != 1 {
            return Err(CalcError::InsufficientOps);
        }

        // values has exactly one element here - pop always succeeds
        Ok(self.values.pop().unwrap())
    }

    fn pop_value(&mut self) -> Result<f64, CalcError> {
        self.values.pop().ok_or(CalcError::TooManyOps)
    }

    fn process_operator(&mut self, op: &str) -> CalcErrorResult {
        if op == UNARY_MINUS {
            let v = self.pop_value()?;
            self.values.push(-v);
            return Ok(());
        }

        if self.values.len() < 2 {
            return Err(CalcError::TooManyOps);
        }
        let v2 = self.pop_value()?;
        let v1 = self.pop_value()?;
        let v = match op {
            "+" => v1 + v2,
            "-" => v1 - v2,
            "*" => v1 * v2,
            "/" => v1 / v2,
            "^" => v1.powf(v2),
            _ => return Err(CalcError::InvalidOp(op.to_string())),
        };
        self.values.push(v);
        Ok(())
    }

    fn process_function(&mut self, fname: &str) -> CalcErrorResult {
        let v = self.pop_value()?;
        let v = match fname {
            "sin" => v.sin(),
            "cos" => v.cos(),
            "tan" => v.tan(),
            "log" => v.log10(),
            "ln" => v.ln(),
            "sqrt" => v.sqrt(),
            _ => return Err(CalcError::InvalidOp(fname.to_string())),
        };
        self.values.push(v);
        Ok(())
    }
}
