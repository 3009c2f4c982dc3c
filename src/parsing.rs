use crate::error_handling::*;
use crate::scanning::*;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Values bound to names, looked up while converting.
pub type Variables = HashMap<String, f64>;

/// Formats a value the way it is printed: integral values keep a trailing
/// `.0`, huge ones switch to exponent form.
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
    exponentiation,
}

impl BinaryOperator {
    pub fn call(&self, left: f64, right: f64) -> f64 {
        use BinaryOperator::*;

        match self {
            addition => left + right,
            subtraction => left - right,
            multiplication => left * right,
            division => left / right,
            exponentiation => left.powf(right),
        }
    }

    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            addition => "+",
            subtraction => "-",
            multiplication => "*",
            division => "/",
            exponentiation => "^",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOperator;

impl FromStr for BinaryOperator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "*" => Ok(multiplication),
            "/" => Ok(division),
            "^" => Ok(exponentiation),
            _ => Err(InvalidOperator),
        }
    }
}

pub enum StackNode {
    operator(BinaryOperator),
    paren,
}

impl StackNode {
    fn precedence(&self) -> i32 {
        use BinaryOperator::*;
        match self {
            Self::paren => 0,
            Self::operator(operator) =>
                match operator {
                    addition | subtraction => 1,
                    multiplication | division => 2,
                    exponentiation => 3,
                },
        }
    }
}

/// One entry of a postfix expression; variables are already resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprNode {
    number(f64),
    operator(BinaryOperator),
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::number(value) => write!(f, "{}", format_value(*value)),
            Self::operator(operator) => write!(f, "{}", operator.symbol()),
        }
    }
}

pub fn render(expression: &[ExprNode]) -> String {
    expression.iter().map(ExprNode::to_string).collect::<Vec<_>>().join(" ")
}

/// Shunting-yard state.
///
/// Operators of equal precedence always pop before the new one is pushed, so
/// `^` associates to the left like everything else: `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
pub struct Yard {
    expression: Vec<ExprNode>,
    stack: Vec<StackNode>,
}

impl Yard {
    pub fn new() -> Self {
        Self{expression: Vec::new(), stack: Vec::new()}
    }

    fn add_value(&mut self, value: f64) {
        self.expression.push(ExprNode::number(value));
    }

    fn pop_higher_operator(&mut self, precedence: i32) -> Option<BinaryOperator> {
        if self.stack.last().filter(|node| node.precedence() >= precedence).is_some() {
            match self.stack.pop() {
                Some(StackNode::operator(operator)) => Some(operator),
                // a paren ranks 0 and never outranks an operator
                _ => None,
            }
        } else {
            None
        }
    }

    fn add_operator(&mut self, operator: BinaryOperator) {
        let node = StackNode::operator(operator);
        let precedence = node.precedence();
        while let Some(higher) = self.pop_higher_operator(precedence) {
            self.expression.push(ExprNode::operator(higher));
        }
        self.stack.push(node);
    }

    fn add_left_paren(&mut self) {
        self.stack.push(StackNode::paren);
    }

    // without a matching '(' this just empties the stack
    fn add_right_paren(&mut self) {
        while let Some(stack_node) = self.stack.pop() {
            match stack_node {
                StackNode::paren => return,
                StackNode::operator(operator) => self.expression.push(ExprNode::operator(operator)),
            }
        }
    }

    pub fn finish(mut self) -> Vec<ExprNode> {
        while let Some(stack_node) = self.stack.pop() {
            if let StackNode::operator(operator) = stack_node {
                self.expression.push(ExprNode::operator(operator));
            }
        }
        self.expression
    }
}

fn handle_token(yard: &mut Yard, token: &Token, variables: &Variables) -> Result<()> {
    use TokenKind::*;
    match token.kind {
        number => {
            let value = token.content.parse()
                .map_err(|_| CalcError::unknown_token(token.content.clone()))?;
            yard.add_value(value);
        },
        identifier => {
            let value = variables.get(&token.content)
                .ok_or_else(|| CalcError::unknown_variable(token.content.clone()))?;
            yard.add_value(*value);
        },
        operator => {
            let binary: BinaryOperator = token.content.parse()
                .map_err(|_| CalcError::unknown_token(token.content.clone()))?;
            yard.add_operator(binary);
        },
        punctuation => {
            match token.content.as_str() {
                "(" => yard.add_left_paren(),
                ")" => yard.add_right_paren(),
                _ => return Err(CalcError::unknown_token(token.content.clone())),
            }
        },
    }
    Ok(())
}

pub fn convert<S: Scanner>(mut source: S, variables: &Variables) -> Result<Vec<ExprNode>> {
    let mut yard = Yard::new();

    while let Some(token) = source.get_current() {
        log::trace!("shunting {:?} '{}'", token.kind, token.content);
        handle_token(&mut yard, &token, variables)?;
        source.advance();
    }
    Ok(yard.finish())
}
