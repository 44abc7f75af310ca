use crate::errors::SymResult;
use crate::parser::Parser;
use std::fs;

pub fn handle(path: &str) -> SymResult<()> {
    let source = fs::read_to_string(path)?;
    let program = Parser::parse_source(&source)?;
    println!("{:#?}", program);
    Ok(())
}
