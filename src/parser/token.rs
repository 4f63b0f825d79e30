use crate::error_handling::Error::MalformedExpression;
use crate::error_handling::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Literal(char), // Single alphanumeric character
    Star,          // *
    Concat,        // .
    Union,         // |
    LParen,        // (
    RParen,        // )
}

impl Token {
    pub(crate) fn tokenize(regex: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for (pos, ch) in regex.chars().enumerate() {
            match ch {
                '*' => tokens.push(Token::Star),
                '.' => tokens.push(Token::Concat),
                '|' => tokens.push(Token::Union),
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                _ if ch.is_alphanumeric() => tokens.push(Token::Literal(ch)),
                _ => {
                    return Err(MalformedExpression(format!(
                        "unsupported character {:?} at position {}",
                        ch, pos
                    )))
                }
            }
        }
        Ok(tokens)
    }

    pub(crate) fn from_char(ch: char) -> Result<Token> {
        let mut buf = [0u8; 4];
        let tokens = Self::tokenize(ch.encode_utf8(&mut buf))?;
        tokens
            .into_iter()
            .next()
            .ok_or_else(|| MalformedExpression("empty token".to_string()))
    }

    pub fn as_char(&self) -> char {
        match self {
            Token::Literal(c) => *c,
            Token::Star => '*',
            Token::Concat => '.',
            Token::Union => '|',
            Token::LParen => '(',
            Token::RParen => ')',
        }
    }

    // Binding strength of the operators, `None` for literals and parentheses.
    pub(crate) fn precedence(&self) -> Option<u8> {
        const PRECEDENCE: [(Token, u8); 3] =
            [(Token::Star, 3), (Token::Concat, 2), (Token::Union, 1)];
        PRECEDENCE
            .iter()
            .find(|(op, _)| op == self)
            .map(|(_, prec)| *prec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenization() -> Result<()> {
        let tokens = Token::tokenize("a|(b*)c.d")?;
        assert_eq!(
            tokens,
            vec![
                Token::Literal('a'),
                Token::Union,
                Token::LParen,
                Token::Literal('b'),
                Token::Star,
                Token::RParen,
                Token::Literal('c'),
                Token::Concat,
                Token::Literal('d'),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_unsupported_characters() {
        for regex in ["a+b", "a?", "[ab]", "a b", "\\d"] {
            assert!(matches!(
                Token::tokenize(regex),
                Err(MalformedExpression(_))
            ));
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(Token::Star.precedence(), Some(3));
        assert_eq!(Token::Concat.precedence(), Some(2));
        assert_eq!(Token::Union.precedence(), Some(1));
        assert_eq!(Token::LParen.precedence(), None);
        assert_eq!(Token::Literal('x').precedence(), None);
    }
}
