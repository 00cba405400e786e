mod lexer_tests;
mod parser_error_tests;
mod parser_operation_tests;
mod parser_schema_tests;
mod printer_tests;
mod visit_tests;
