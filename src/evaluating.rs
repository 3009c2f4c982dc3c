use crate::error_handling::*;
use crate::parsing::*;

fn pop(slots: &mut Vec<f64>) -> Result<f64> {
    slots.pop().ok_or(CalcError::stack_underflow)
}

/// Runs a postfix expression on a value stack.
///
/// Leftover operands are not an error: the value on top of the stack wins.
pub fn evaluate(expression: &[ExprNode]) -> Result<f64> {
    let mut slots = Vec::<f64>::new();
    for node in expression {
        match node {
            ExprNode::number(value) => slots.push(*value),

            ExprNode::operator(operator) => {
                let right = pop(&mut slots)?;
                let left = pop(&mut slots)?;
                slots.push(operator.call(left, right));
            },
        }
    }
    pop(&mut slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use BinaryOperator::*;

    fn num(value: f64) -> ExprNode {
        ExprNode::number(value)
    }

    fn op(operator: BinaryOperator) -> ExprNode {
        ExprNode::operator(operator)
    }

    #[test]
    fn operands_keep_their_order() {
        assert_eq!(evaluate(&[num(10.0), num(4.0), op(subtraction)]).unwrap(), 6.0);
        assert_eq!(evaluate(&[num(10.0), num(4.0), op(division)]).unwrap(), 2.5);
        assert_eq!(evaluate(&[num(2.0), num(10.0), op(exponentiation)]).unwrap(), 1024.0);
    }

    #[test]
    fn chained_expression() {
        // 3 4 2 * +
        let expression = [num(3.0), num(4.0), num(2.0), op(multiplication), op(addition)];
        assert_eq!(evaluate(&expression).unwrap(), 11.0);
    }

    #[test]
    fn division_by_zero_is_ieee() {
        assert_eq!(evaluate(&[num(10.0), num(0.0), op(division)]).unwrap(), f64::INFINITY);
        assert!(evaluate(&[num(0.0), num(0.0), op(division)]).unwrap().is_nan());
    }

    #[test]
    fn missing_operands_underflow() {
        assert!(matches!(evaluate(&[]), Err(CalcError::stack_underflow)));
        assert!(matches!(evaluate(&[num(3.0), op(addition)]), Err(CalcError::stack_underflow)));
        assert!(matches!(evaluate(&[op(multiplication)]), Err(CalcError::stack_underflow)));
    }

    #[test]
    fn leftover_operands_return_the_top() {
        assert_eq!(evaluate(&[num(3.0), num(4.0)]).unwrap(), 4.0);
    }
}
