//! JVM descriptor parsing.

use nom::{
    branch::alt,
    bytes::complete::{is_not, take_until},
    character::complete::char,
    combinator::{all_consuming, map, value},
    multi::many0,
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::error::{GenerateError, Result};

use super::types::{MethodDescriptor, ValueType};

fn primitive_type(input: &str) -> IResult<&str, ValueType> {
    alt((
        value(ValueType::Boolean, char('Z')),
        value(ValueType::Byte, char('B')),
        value(ValueType::Short, char('S')),
        value(ValueType::Char, char('C')),
        value(ValueType::Int, char('I')),
        value(ValueType::Long, char('J')),
        value(ValueType::Float, char('F')),
        value(ValueType::Double, char('D')),
    ))(input)
}

fn object_type(input: &str) -> IResult<&str, ValueType> {
    map(delimited(char('L'), is_not(";"), char(';')), |name: &str| {
        ValueType::Object(name.to_string())
    })(input)
}

fn array_type(input: &str) -> IResult<&str, ValueType> {
    map(preceded(char('['), value_type), ValueType::array_of)(input)
}

fn value_type(input: &str) -> IResult<&str, ValueType> {
    alt((primitive_type, object_type, array_type))(input)
}

fn return_type(input: &str) -> IResult<&str, Option<ValueType>> {
    alt((value(None, char('V')), map(value_type, Some)))(input)
}

fn method_descriptor(input: &str) -> IResult<&str, MethodDescriptor> {
    map(
        tuple((
            take_until("("),
            delimited(char('('), many0(value_type), char(')')),
            return_type,
        )),
        |(name, params, ret): (&str, Vec<ValueType>, Option<ValueType>)| {
            MethodDescriptor::new(name, params, ret)
        },
    )(input)
}

/// Parse a complete field descriptor.
pub fn parse_value_type(desc: &str) -> Result<ValueType> {
    all_consuming(value_type)(desc)
        .map(|(_, ty)| ty)
        .map_err(|_| GenerateError::invalid_descriptor(desc))
}

/// Parse `name(params)return`. The name must be non-empty.
pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    match all_consuming(method_descriptor)(desc) {
        Ok((_, method)) if !method.name.is_empty() => Ok(method),
        _ => Err(GenerateError::invalid_descriptor(desc)),
    }
}
