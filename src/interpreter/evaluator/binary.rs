use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::{
        environment::EnvRef,
        evaluator::core::{EvalResult, Flow, Interpreter, flow},
    },
    span::Span,
};

impl Interpreter {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated first (signals propagate before any
    /// operator work), then the operation dispatches to the left operand's
    /// operator method. Both logical operators evaluate both sides; only
    /// `if` conditions short-circuit in this language.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 span: Span,
                                 env: &EnvRef)
                                 -> EvalResult<Flow> {
        let left_value = flow!(self.eval(left, env)?);
        let right_value = flow!(self.eval(right, env)?);

        let result = match op {
            BinaryOperator::Add => left_value.add(&right_value, span),
            BinaryOperator::Sub => left_value.subtract(&right_value, span),
            BinaryOperator::Mul => left_value.multiply(&right_value, span),
            BinaryOperator::Div => left_value.divide(&right_value, span),
            BinaryOperator::Mod => left_value.modulo(&right_value, span),
            BinaryOperator::Quo => left_value.quotient(&right_value, span),
            BinaryOperator::Pow => left_value.power(&right_value, span),
            BinaryOperator::Equal => left_value.equals(&right_value, span),
            BinaryOperator::NotEqual => left_value.not_equals(&right_value, span),
            BinaryOperator::Less => left_value.less_than(&right_value, span),
            BinaryOperator::Greater => left_value.greater_than(&right_value, span),
            BinaryOperator::LessEqual => left_value.less_equal(&right_value, span),
            BinaryOperator::GreaterEqual => left_value.greater_equal(&right_value, span),
            BinaryOperator::And => left_value.and(&right_value, span),
            BinaryOperator::Or => left_value.or(&right_value, span),
        }?;

        Ok(Flow::Value(result))
    }

    /// Evaluates a unary operation.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                span: Span,
                                env: &EnvRef)
                                -> EvalResult<Flow> {
        let value = flow!(self.eval(expr, env)?);

        let result = match op {
            UnaryOperator::Negate => value.negate(span),
            UnaryOperator::Not => value.not(span),
        }?;

        Ok(Flow::Value(result))
    }

    /// Evaluates a single-element index access.
    pub(crate) fn eval_index(&mut self,
                             target: &Expr,
                             index: &Expr,
                             span: Span,
                             env: &EnvRef)
                             -> EvalResult<Flow> {
        let target_value = flow!(self.eval(target, env)?);
        let index_value = flow!(self.eval(index, env)?);

        Ok(Flow::Value(target_value.index(&index_value, span)?))
    }

    /// Evaluates a slice access; either bound may be absent.
    pub(crate) fn eval_slice(&mut self,
                             target: &Expr,
                             start: Option<&Expr>,
                             end: Option<&Expr>,
                             span: Span,
                             env: &EnvRef)
                             -> EvalResult<Flow> {
        let target_value = flow!(self.eval(target, env)?);

        let start_value = match start {
            Some(expr) => Some(flow!(self.eval(expr, env)?)),
            None => None,
        };
        let end_value = match end {
            Some(expr) => Some(flow!(self.eval(expr, env)?)),
            None => None,
        };

        Ok(Flow::Value(target_value.slice(start_value.as_ref(), end_value.as_ref(), span)?))
    }
}
