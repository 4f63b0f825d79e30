use super::token::Token;
use crate::error_handling::Error::MalformedExpression;
use crate::error_handling::Result;
use log::debug;

// Rewrites an infix expression into postfix form with explicit concatenation.
pub struct PostfixParser {
    tokens: Vec<Token>,
    pos: usize, // Current position in the token stream
}

impl PostfixParser {
    pub fn new(regex: &str) -> Result<Self> {
        let tokens = Self::insert_concatenation(Token::tokenize(regex)?);
        Ok(PostfixParser { tokens, pos: 0 })
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    #[allow(unused)]
    fn get_token(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    // Concatenation is implicit between two atoms, but never right after `(` or `|`, and never
    // before `|`, `)` or `*`. An explicit `.` from the user is kept as is.
    fn insert_concatenation(tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::with_capacity(tokens.len() * 2);
        for (idx, token) in tokens.iter().enumerate() {
            result.push(*token);
            let Some(next) = tokens.get(idx + 1) else {
                continue;
            };
            let opens = matches!(token, Token::LParen | Token::Union | Token::Concat);
            let closes = matches!(
                next,
                Token::Union | Token::RParen | Token::Star | Token::Concat
            );
            if false == opens && false == closes {
                result.push(Token::Concat);
            }
        }
        result
    }

    pub fn parse_into_postfix(&mut self) -> Result<Vec<Token>> {
        let mut output: Vec<Token> = Vec::with_capacity(self.tokens.len());
        let mut operators: Vec<Token> = Vec::new();

        while let Some(token) = self.next() {
            match token {
                Token::Literal(_) => output.push(token),
                Token::LParen => operators.push(token),
                Token::RParen => loop {
                    match operators.pop() {
                        Some(Token::LParen) => break,
                        Some(op) => output.push(op),
                        None => {
                            return Err(MalformedExpression(format!(
                                "unmatched ')' at token {}",
                                self.pos - 1
                            )))
                        }
                    }
                },
                _ => {
                    let incoming = token.precedence().unwrap_or(0);
                    while let Some(top) = operators.last() {
                        match top.precedence() {
                            Some(prec) if prec >= incoming => {
                                output.push(*top);
                                operators.pop();
                            }
                            _ => break,
                        }
                    }
                    operators.push(token);
                }
            }
        }

        while let Some(op) = operators.pop() {
            if Token::LParen == op {
                return Err(MalformedExpression("unmatched '('".to_string()));
            }
            output.push(op);
        }
        Ok(output)
    }
}

pub fn postfix_tokens(infix: &str) -> Result<Vec<Token>> {
    PostfixParser::new(infix)?.parse_into_postfix()
}

pub fn normalize(infix: &str) -> Result<String> {
    let postfix: String = postfix_tokens(infix)?
        .iter()
        .map(|token| token.as_char())
        .collect();
    debug!("Normalized {:?} into postfix {:?}", infix, postfix);
    Ok(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenation_insertion() -> Result<()> {
        let p = PostfixParser::new("a(b)c*")?;
        assert!(p.get_token(0) == Some(&Token::Literal('a')));
        assert!(p.get_token(1) == Some(&Token::Concat));
        assert!(p.get_token(2) == Some(&Token::LParen));
        assert!(p.get_token(3) == Some(&Token::Literal('b')));
        assert!(p.get_token(4) == Some(&Token::RParen));
        assert!(p.get_token(5) == Some(&Token::Concat));
        assert!(p.get_token(6) == Some(&Token::Literal('c')));
        assert!(p.get_token(7) == Some(&Token::Star));
        assert!(p.get_token(8).is_none());

        let p = PostfixParser::new("a|b")?;
        assert_eq!(p.tokens.len(), 3);
        Ok(())
    }

    #[test]
    fn test_precedence() -> Result<()> {
        assert_eq!(normalize("a|b*")?, "ab*|");
        assert_eq!(normalize("ab|c")?, "ab.c|");
        assert_eq!(normalize("a|bc")?, "abc.|");
        assert_eq!(normalize("ab*")?, "ab*.");
        Ok(())
    }

    #[test]
    fn test_left_associativity() -> Result<()> {
        assert_eq!(normalize("abc")?, "ab.c.");
        assert_eq!(normalize("a|b|c")?, "ab|c|");
        assert_eq!(normalize("a**")?, "a**");
        Ok(())
    }

    #[test]
    fn test_explicit_concatenation() -> Result<()> {
        assert_eq!(normalize("ab")?, normalize("a.b")?);
        assert_eq!(normalize("a.b.c")?, normalize("abc")?);
        assert_eq!(normalize("(a|b).c")?, normalize("(a|b)c")?);
        Ok(())
    }

    #[test]
    fn test_grouping() -> Result<()> {
        assert_eq!(normalize("a")?, "a");
        assert_eq!(normalize("(a|b)*c")?, "ab|*c.");
        assert_eq!(normalize("((a))")?, "a");
        assert_eq!(normalize("(ab)*")?, "ab.*");
        Ok(())
    }

    #[test]
    fn test_unbalanced_parentheses() {
        for regex in ["(a", "a)", ")a", "((a)", "(a|b))"] {
            assert!(
                matches!(normalize(regex), Err(MalformedExpression(_))),
                "{} should be rejected",
                regex
            );
        }
    }
}
