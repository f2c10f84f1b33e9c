mod common;

mod letter;
mod service;
