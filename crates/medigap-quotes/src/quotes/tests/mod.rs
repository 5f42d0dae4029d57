mod common;

mod engine;
