use anyhow::Result;
use util::repl;

use lambda::{eval::Contraction, interpreter::Interpreter};

#[derive(Default)]
struct Repl {
    interpreter: Interpreter,
}

impl repl::Repl for Repl {
    type Error = anyhow::Error;

    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        println!(" - {input} - ");
        let output = self
            .interpreter
            .interpret(&input, &mut |event: Contraction| println!("{event}"));
        println!("{output}");
        println!();
        Ok(())
    }
}

fn main() -> Result<()> {
    repl::start_repl(Repl::default())?;
    Ok(())
}
