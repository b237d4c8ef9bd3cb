#![forbid(unsafe_code)]

use std::process::exit;

use saphyr_nodes::{Error, Options, Value, ValueType, from_str_with_options};

/// Read a YAML file as an untyped value and print it in flow notation. Useful to check how
/// scalars are resolved and how anchors and aliases are shared. Single parameter is the
/// file name.
fn main() {
    let path = match std::env::args()
        .nth(1)
        .ok_or("This program loads the given YAML file as an untyped value and prints it, \
        can also be used as YAML validator. Expected a path to a YAML file as the first argument") {
        Ok(path) => path,
        Err(err) => {
            eprintln!("{err}");
            exit(1);
        }
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Failed to read {path}: {err}");
            exit(2);
        }
    };

    let r: Result<Value, Error> = from_str_with_options(&content, &ValueType::Any, Options::default());

    match r {
        Ok(value) => println!("{value}"),
        Err(err) => {
            eprintln!("{path} invalid:\n{err}");
            exit(3);
        }
    }
}
