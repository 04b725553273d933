use std::rc::Rc;

use thiserror::Error;

use crate::{
    ast::{Term, TermRef},
    lexer::Token,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Expected '.' after lambda parameters")]
    ExpectedDotAfterParameters,
    #[error("Expected closing parenthesis")]
    ExpectedClosingParenthesis,
    #[error("Unexpected term")]
    UnexpectedTerm,
}

/// Parse one expression from the front of the token stream. Tokens left
/// over after the expression are ignored.
pub fn parse(tokens: Vec<Token>) -> Result<TermRef, ParseError> {
    Parser::new(tokens).expression()
}

/// Recursive descent with a single token of lookahead.
///
/// The grammar, with application associating to the left and an
/// abstraction body extending as far right as possible:
///
/// ```text
/// expression  = application | "λ" variable+ "." expression
/// application = term term*
/// term        = variable | "(" expression ")"
/// ```
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(Token::End)
    }

    /// The cursor never runs off the vector: past the last element
    /// `current` keeps answering `End`, so parsing terminates even on a
    /// hand-built token vector missing the sentinel.
    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expression(&mut self) -> Result<TermRef, ParseError> {
        if self.current() != Token::Lambda {
            return self.application();
        }
        self.advance();
        let mut params = Vec::new();
        while let Token::Variable(c) = self.current() {
            params.push(c);
            self.advance();
        }
        if params.is_empty() {
            return Err(ParseError::UnexpectedTerm);
        }
        if self.current() != Token::Dot {
            return Err(ParseError::ExpectedDotAfterParameters);
        }
        self.advance();
        let mut body = self.expression()?;
        // `λx y.B` abbreviates `λx.λy.B`, so wrap from the inside out.
        for param in params.into_iter().rev() {
            body = Rc::new(Term::Abs(param.to_string(), body));
        }
        Ok(body)
    }

    fn application(&mut self) -> Result<TermRef, ParseError> {
        let mut expr = self.term()?;
        while matches!(self.current(), Token::Variable(_) | Token::LParen) {
            let arg = self.term()?;
            expr = Rc::new(Term::Apply(expr, arg));
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<TermRef, ParseError> {
        match self.current() {
            Token::Variable(c) => {
                self.advance();
                Ok(Rc::new(Term::Var(c.to_string())))
            }
            Token::LParen => {
                self.advance();
                let expr = self.expression()?;
                if self.current() != Token::RParen {
                    return Err(ParseError::ExpectedClosingParenthesis);
                }
                self.advance();
                Ok(expr)
            }
            _ => Err(ParseError::UnexpectedTerm),
        }
    }
}
