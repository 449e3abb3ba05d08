mod flag_tests;
mod resolver_tests;
