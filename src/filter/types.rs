//! Filter condition types

use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Comparison operator of a `where` condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `has`: every expected map key, or any expected list item, is present
    Has,
    /// `hasContains`: any expected key or item is present, strings by substring
    HasContains,
}

impl Operator {
    /// Operator as written in a condition
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Has => "has",
            Operator::HasContains => "hasContains",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "=" | "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            "has" => Ok(Operator::Has),
            "hasContains" => Ok(Operator::HasContains),
            _ => Err(Error::filter(format!("unsupported operator '{s}'"))),
        }
    }
}

/// One `where` condition
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Path of the compared field inside each element
    pub key: String,
    /// Operator as given by the caller, parsed when the filter runs
    pub operator: String,
    /// Expected value
    pub value: JsonValue,
}

/// Caller-supplied element predicate
pub type Predicate = Arc<dyn Fn(&JsonValue) -> bool + Send + Sync>;
