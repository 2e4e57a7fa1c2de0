/// Parser for the iwmap text documents this crate writes
use nalgebra::{Point3, Vector2, Vector3};
use nom::{
    bytes::complete::{tag, take_till1, take_until},
    character::complete::{char, digit1, multispace0, multispace1, not_line_ending, space1},
    combinator::cut,
    multi::{count, many0},
    number::complete::double,
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::{Error, Result};
use crate::projection::TextureParams;

/// A brush face read back from map text
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFace {
    pub points: [Point3<f64>; 3],
    pub texture: String,
    pub params: TextureParams,
}

/// The six faces of one brush block
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBrush {
    pub faces: Vec<ParsedFace>,
}

impl ParsedBrush {
    /// Axis-aligned bounds of every listed face point
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut points = self.faces.iter().flat_map(|face| face.points.iter());
        let first = *points.next()?;

        Some(points.fold((first, first), |(min, max), p| (min.inf(p), max.sup(p))))
    }

    /// Distinct texture names in face order
    pub fn textures(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for face in &self.faces {
            if !names.contains(&face.texture.as_str()) {
                names.push(&face.texture);
            }
        }
        names
    }
}

/// Brushes of the worldspawn entity, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMap {
    pub version: u32,
    pub brushes: Vec<ParsedBrush>,
}

/// Parse a complete map document
pub fn parse_map(input: &str) -> Result<ParsedMap> {
    match parse_map_impl(input) {
        Ok((rest, map)) if rest.trim().is_empty() => Ok(map),
        Ok((rest, _)) => Err(Error::Parse {
            line: line_of(input, rest),
            message: "unexpected trailing content".to_string(),
        }),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::Parse {
            line: line_of(input, e.input),
            message: format!("expected {:?}", e.code),
        }),
        Err(nom::Err::Incomplete(_)) => Err(Error::Parse {
            line: line_of(input, ""),
            message: "unexpected end of input".to_string(),
        }),
    }
}

/// 1-based line of `rest` within `input`
fn line_of(input: &str, rest: &str) -> usize {
    let consumed = input.len().saturating_sub(rest.len());
    input[..consumed].matches('\n').count() + 1
}

fn parse_map_impl(input: &str) -> IResult<&str, ParsedMap> {
    let (input, _) = preceded(multispace0, tag("iwmap"))(input)?;
    let (input, version) = preceded(space1, digit1)(input)?;
    let (input, _) = many0(parse_layer)(input)?;
    let (input, _) = preceded(multispace0, tag("// entity"))(input)?;
    let (input, _) = preceded(space1, digit1)(input)?;
    let (input, _) = preceded(multispace0, char('{'))(input)?;
    let (input, _) = many0(parse_key_value)(input)?;
    let (input, brushes) = many0(parse_brush)(input)?;
    let (input, _) = preceded(multispace0, char('}'))(input)?;

    // digit1 only matches ASCII digits; overflow falls back to 0
    let version = version.parse().unwrap_or_default();
    Ok((input, ParsedMap { version, brushes }))
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_until("\""), char('"'))(input)
}

fn parse_layer(input: &str) -> IResult<&str, &str> {
    let (input, name) = preceded(multispace0, quoted)(input)?;
    let (input, _) = not_line_ending(input)?;
    Ok((input, name))
}

fn parse_key_value(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, key) = preceded(multispace0, quoted)(input)?;
    let (input, value) = preceded(space1, quoted)(input)?;
    Ok((input, (key, value)))
}

fn parse_brush(input: &str) -> IResult<&str, ParsedBrush> {
    let (input, _) = preceded(multispace0, tag("// brush"))(input)?;
    let (input, _) = preceded(space1, digit1)(input)?;
    // Past the comment a malformed body is an error, not the end of the list
    cut(parse_brush_body)(input)
}

fn parse_brush_body(input: &str) -> IResult<&str, ParsedBrush> {
    let (input, _) = preceded(multispace0, char('{'))(input)?;
    let (input, faces) = count(parse_face, 6)(input)?;
    let (input, _) = preceded(multispace0, char('}'))(input)?;

    Ok((input, ParsedBrush { faces }))
}

fn parse_face(input: &str) -> IResult<&str, ParsedFace> {
    let (input, p0) = preceded(multispace0, parse_point)(input)?;
    let (input, p1) = preceded(space1, parse_point)(input)?;
    let (input, p2) = preceded(space1, parse_point)(input)?;
    let (input, texture) = preceded(space1, token)(input)?;

    let (input, scale_x) = field(input)?;
    let (input, scale_y) = field(input)?;
    let (input, offset_x) = field(input)?;
    let (input, offset_y) = field(input)?;
    let (input, rotation) = field(input)?;
    let (input, _surface) = field(input)?;
    let (input, _material) = preceded(space1, token)(input)?;
    let (input, _sample_x) = field(input)?;
    let (input, _sample_y) = field(input)?;
    let (input, lightmap_x) = field(input)?;
    let (input, lightmap_y) = field(input)?;
    let (input, lightmap_z) = field(input)?;
    let (input, _contents) = field(input)?;

    let params = TextureParams {
        scale: Vector2::new(scale_x, scale_y),
        offset: Vector2::new(offset_x, offset_y),
        rotation,
        lightmap_offset: Vector3::new(lightmap_x, lightmap_y, lightmap_z),
        uv_axes: None,
    };

    Ok((
        input,
        ParsedFace {
            points: [p0, p1, p2],
            texture: texture.to_string(),
            params,
        },
    ))
}

fn parse_point(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = char('(')(input)?;
    let (input, x) = field(input)?;
    let (input, y) = field(input)?;
    let (input, z) = field(input)?;
    let (input, _) = preceded(multispace1, char(')'))(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn field(input: &str) -> IResult<&str, f64> {
    preceded(space1, double)(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}
