// Output formatting for the command-line tool.

pub mod terminal;
