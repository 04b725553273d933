use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Token {
    /// A single codepoint of name. Adjacent letters are *not* grouped, so
    /// `ab` lexes as two variables (and parses as an application).
    Variable(char),
    Lambda,
    Dot,
    LParen,
    RParen,
    /// Sentinel appended exactly once after the last real token.
    End,
}

#[derive(Error, Debug)]
pub enum LexicalError {
    #[error("Unexpected character `{0}`")]
    UnexpectedCharacter(char),
}

/// Scan `input` into tokens. Whitespace separates tokens and is otherwise
/// ignored; digits are rejected; any other codepoint that is not `λ`, `.`,
/// `(` or `)` becomes a [`Token::Variable`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexicalError> {
    let mut tokens = Vec::new();
    for c in input.chars() {
        let token = match c {
            c if c.is_whitespace() => continue,
            'λ' => Token::Lambda,
            '.' => Token::Dot,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() => return Err(LexicalError::UnexpectedCharacter(c)),
            c => Token::Variable(c),
        };
        tokens.push(token);
    }
    tokens.push(Token::End);
    Ok(tokens)
}
