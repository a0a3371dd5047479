//! Single-segment parsers for the two path forms.
//!
//! `triggers[0]` is an index segment and `triggers["1234"]` a designer-id
//! segment. Names never contain dots, brackets or quotes.

use std::fmt;

/// `name[index]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArraySegment<'a> {
    pub name: &'a str,
    pub index: usize,
}

impl fmt::Display for ArraySegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}

/// `name["id"]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignerSegment<'a> {
    pub name: &'a str,
    pub id: &'a str,
}

impl fmt::Display for DesignerSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[\"{}\"]", self.name, self.id)
    }
}

/// Parse an index segment such as `actions[3]`.
pub fn parse_array_path(segment: &str) -> Option<ArraySegment<'_>> {
    let caps = regex!(r#"^([^\[\]."]+)\[(\d+)\]$"#).captures(segment)?;
    let name = caps.get(1)?.as_str();
    let index = caps.get(2)?.as_str().parse().ok()?;
    Some(ArraySegment { name, index })
}

/// Parse a designer-id segment such as `actions["a1b2"]`.
pub fn parse_designer_path(segment: &str) -> Option<DesignerSegment<'_>> {
    let caps = regex!(r#"^([^\[\]."]+)\["([^"]+)"\]$"#).captures(segment)?;
    Some(DesignerSegment { name: caps.get(1)?.as_str(), id: caps.get(2)?.as_str() })
}
