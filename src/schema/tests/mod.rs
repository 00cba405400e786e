mod print_schema_tests;
mod schema_builder_tests;
mod schema_validate_tests;
