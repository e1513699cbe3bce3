use crate::error::ParseError;
use crate::{Edge, Instance};
use log::debug;
use nom::{
    character::complete::{char, digit1, multispace0, space1},
    combinator::{map_res, opt, recognize},
    multi::many_m_n,
    sequence::{pair, preceded},
    IResult,
};
use std::io::Read;
use std::path::Path;

/// Parse a single unsigned integer
fn parse_usize(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Parse a possibly negative integer; sign checks happen when the graph is built
fn parse_i64(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

/// Parse the leading edge count
fn parse_edge_count(input: &str) -> IResult<&str, usize> {
    preceded(multispace0, parse_usize)(input)
}

/// Parse one edge: two integers on the same line
fn parse_edge(input: &str) -> IResult<&str, Edge> {
    let (input, u) = preceded(multispace0, parse_i64)(input)?;
    let (input, v) = preceded(space1, parse_i64)(input)?;
    Ok((input, (u, v)))
}

fn syntax_error(err: nom::Err<nom::error::Error<&str>>) -> ParseError {
    ParseError::Syntax(err.to_string())
}

/// Parse exactly `count` edges, distinguishing truncated input from bad tokens
fn parse_edge_section<'a>(
    input: &'a str,
    count: usize,
    section: &'static str,
) -> Result<(&'a str, Vec<Edge>), ParseError> {
    let (rest, edges) = many_m_n(0, count, parse_edge)(input).map_err(syntax_error)?;

    if edges.len() < count {
        let rest = rest.trim_start();
        if rest.is_empty() {
            return Err(ParseError::MissingEdges {
                section,
                expected: count,
                found: edges.len(),
            });
        }
        let line = rest.lines().next().unwrap_or_default();
        return Err(ParseError::Syntax(format!(
            "unexpected {:?} in {} edge {}",
            line,
            section,
            edges.len() + 1
        )));
    }

    Ok((rest, edges))
}

/// Parse an instance: the edge count `E`, then `E` current edges, then `E` expected edges
pub fn parse_input_str(input: &str) -> Result<Instance, ParseError> {
    let (rest, count) = parse_edge_count(input).map_err(syntax_error)?;
    let (rest, current_edges) = parse_edge_section(rest, count, "current")?;
    let (rest, expected_edges) = parse_edge_section(rest, count, "expected")?;

    if !rest.trim().is_empty() {
        debug!("Ignoring {} bytes of trailing input", rest.trim().len());
    }

    Ok(Instance {
        current_edges,
        expected_edges,
    })
}

/// Parse an instance from any reader (e.g. stdin)
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Instance, ParseError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_input_str(&content)
}

/// Parse an input file containing an instance
pub fn parse_input_file(path: &Path) -> Result<Instance, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_input_str(&content)
}
