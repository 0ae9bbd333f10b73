//! Linkage names for generated functions.
//!
//! A name has the shape `meth_<class>_M<method>_D<descriptor>`. Every
//! character outside `[A-Za-z0-9]` is escaped with a sequence that starts
//! with `_`, and no escape starts with `_M` or `_D`, so distinct method
//! references always produce distinct names.

use std::fmt::Write;

use crate::model::MethodReference;

/// Mangle a method reference into a function name.
pub fn mangle_method(method: &MethodReference) -> String {
    let mut out = String::from("meth_");
    escape_into(&mut out, &method.class_name);
    out.push_str("_M");
    escape_into(&mut out, method.name());
    out.push_str("_D");
    escape_into(&mut out, &method.descriptor.signature_descriptor());
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => out.push(c),
            '_' => out.push_str("_U"),
            '.' => out.push_str("_d"),
            '/' => out.push_str("_s"),
            '$' => out.push_str("_S"),
            '<' => out.push_str("_l"),
            '>' => out.push_str("_g"),
            '(' => out.push_str("_o"),
            ')' => out.push_str("_c"),
            ';' => out.push_str("_e"),
            '[' => out.push_str("_a"),
            other => {
                let _ = write!(out, "_x{:x}_", other as u32);
            }
        }
    }
}
