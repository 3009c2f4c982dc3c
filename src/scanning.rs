
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    identifier, number, operator, punctuation
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(content: impl Into<String>, kind: TokenKind) -> Self {
        Self{content: content.into(), kind}
    }
}

pub trait Scanner {
    /// The token under the cursor, or `None` once the input is used up.
    fn get_current(&self) -> Option<Token>;
    fn advance(&mut self);
}

/// Walks over tokens that were collected ahead of time.
pub struct SimpleScanner {
    tokens: Vec<Token>,
    index: usize,
}

impl SimpleScanner {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self{tokens, index: 0}
    }
}

impl Scanner for SimpleScanner {
    fn get_current(&self) -> Option<Token> {
        self.tokens.get(self.index).cloned()
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }
}

/// Lazily cuts tokens out of a string, one `advance` at a time.
///
/// Characters that cannot start a token are skipped without complaint,
/// so `"3 $ 4"` scans as `3`, `4`.
pub struct StringScanner {
    string: String,
    token: Option<Token>,
    index: usize,
}

fn is_operator(byte: u8) -> bool {
    matches!(byte, b'+' | b'-' | b'*' | b'/' | b'^')
}

fn is_punctuation(byte: u8) -> bool {
    matches!(byte, b'(' | b')')
}

fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_identifier_rest(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

impl StringScanner {
    pub fn new(string: impl Into<String>) -> Self {
        let mut source = Self {
            string: string.into(),
            token: None,
            index: 0,
        };
        source.advance();
        source
    }

    // every byte a token can start with is ascii, so offsets found here
    // always sit on char boundaries
    fn count<P: Fn(u8) -> bool>(&self, from: usize, predicate: P) -> usize {
        self.string.as_bytes()[from..].iter().take_while(|&&b| predicate(b)).count()
    }

    fn skip_unrecognized(&mut self) {
        let bytes = self.string.as_bytes();
        while self.index < bytes.len() {
            let b = bytes[self.index];
            if b.is_ascii_digit() || is_identifier_start(b) || is_operator(b) || is_punctuation(b) {
                break;
            }
            self.index += 1;
        }
    }

    fn slice(&self, length: usize) -> &str {
        &self.string[self.index..(self.index + length)]
    }

    fn get_number(&self) -> Token {
        let mut length = self.count(self.index, |b| b.is_ascii_digit());
        let bytes = self.string.as_bytes();
        let dot = self.index + length;
        if dot < bytes.len() && bytes[dot] == b'.' {
            let fraction = self.count(dot + 1, |b| b.is_ascii_digit());
            if fraction > 0 {
                length += 1 + fraction;
            }
        }
        Token::new(self.slice(length), TokenKind::number)
    }

    fn get_identifier(&self) -> Token {
        let length = self.count(self.index, is_identifier_rest);
        Token::new(self.slice(length), TokenKind::identifier)
    }

    fn get_single(&self, kind: TokenKind) -> Token {
        Token::new(self.slice(1), kind)
    }

    fn get_token(&mut self) -> Option<Token> {
        self.skip_unrecognized();
        let first = *self.string.as_bytes().get(self.index)?;
        if first.is_ascii_digit() {
            Some(self.get_number())
        } else if is_identifier_start(first) {
            Some(self.get_identifier())
        } else if is_operator(first) {
            Some(self.get_single(TokenKind::operator))
        } else {
            Some(self.get_single(TokenKind::punctuation))
        }
    }
}

impl Scanner for StringScanner {
    fn get_current(&self) -> Option<Token> {
        self.token.clone()
    }

    fn advance(&mut self) {
        let token = self.get_token();
        if let Some(token) = &token {
            self.index += token.content.len();
        }
        self.token = token;
    }
}

pub fn tokenize(expression: &str) -> Vec<Token> {
    let mut source = StringScanner::new(expression);
    let mut tokens = Vec::new();
    while let Some(token) = source.get_current() {
        tokens.push(token);
        source.advance();
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(expression: &str) -> Vec<String> {
        tokenize(expression).into_iter().map(|token| token.content).collect()
    }

    #[test]
    fn splits_numbers_operators_and_parens() {
        assert_eq!(contents("(3 + 4) * 2"), ["(", "3", "+", "4", ")", "*", "2"]);
        assert_eq!(contents("10/4"), ["10", "/", "4"]);
    }

    #[test]
    fn kinds_follow_the_matched_text() {
        use TokenKind::*;
        let kinds: Vec<TokenKind> = tokenize("x_1 ^ 2.5)").into_iter().map(|token| token.kind).collect();
        assert_eq!(kinds, [identifier, operator, number, punctuation]);
    }

    #[test]
    fn decimals_need_digits_after_the_dot() {
        assert_eq!(contents("3.25"), ["3.25"]);
        assert_eq!(contents("3."), ["3"]);
        assert_eq!(contents("1.2.3"), ["1.2", "3"]);
        assert_eq!(contents(".5"), ["5"]);
    }

    #[test]
    fn identifiers_take_the_longest_match() {
        assert_eq!(contents("_tmp2*rate"), ["_tmp2", "*", "rate"]);
        assert_eq!(contents("2x"), ["2", "x"]);
    }

    #[test]
    fn unrecognized_characters_are_dropped() {
        assert_eq!(contents("3 $ 4 = % 5"), ["3", "4", "5"]);
        assert_eq!(contents("ümlaut + 1"), ["mlaut", "+", "1"]);
        assert!(contents("   \t").is_empty());
        assert!(contents("").is_empty());
    }

    #[test]
    fn simple_scanner_replays_prepared_tokens() {
        let mut scanner = SimpleScanner::new(tokenize("1 + 2"));
        let mut seen = Vec::new();
        while let Some(token) = scanner.get_current() {
            seen.push(token.content);
            scanner.advance();
        }
        assert_eq!(seen, ["1", "+", "2"]);
    }

    #[test]
    fn exhausted_scanners_have_no_current_token() {
        let mut scanner = StringScanner::new("7");
        assert_eq!(scanner.get_current(), Some(Token::new("7", TokenKind::number)));
        scanner.advance();
        assert_eq!(scanner.get_current(), None);
        scanner.advance();
        assert_eq!(scanner.get_current(), None);

        let mut scanner = SimpleScanner::new(Vec::new());
        assert_eq!(scanner.get_current(), None);
        scanner.advance();
        assert_eq!(scanner.get_current(), None);
    }
}
