// src/register/tests/mod.rs

mod rules_tests;
