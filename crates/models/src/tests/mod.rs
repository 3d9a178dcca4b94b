mod crud_tests;
mod enum_tests;
