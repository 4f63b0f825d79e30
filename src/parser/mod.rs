mod batch_parser;
mod parser;
mod token;

pub use batch_parser::parser::BatchConfig;
pub use batch_parser::parser::NamedExpression;
pub use batch_parser::parser::OutputFormat;
pub use parser::normalize;
pub use parser::postfix_tokens;
pub use parser::PostfixParser;
pub use token::Token;
