use smallvec::SmallVec;

use super::{PatternError, PatternResult};

/// Structural class of a template segment, as seen by the rank policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Static,
    Dynamic,
    Wildcard,
}

/// Classifies a raw segment: a trailing `*` marks a wildcard, a leading `:`
/// a dynamic segment, anything else is static.
#[inline]
pub fn classify_segment(seg: &str) -> SegmentKind {
    if seg.ends_with('*') {
        SegmentKind::Wildcard
    } else if seg.starts_with(':') {
        SegmentKind::Dynamic
    } else {
        SegmentKind::Static
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPart {
    Literal(String),
    Param {
        name: String,
        constraint: Option<String>,
    },
    /// Positional wildcard; `index` counts wildcards across the whole template.
    Wildcard { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPattern {
    pub raw: String,
    pub kind: SegmentKind,
    pub parts: SmallVec<[SegmentPart; 2]>,
}

impl SegmentPattern {
    pub fn is_static(&self) -> bool {
        self.parts
            .iter()
            .all(|part| matches!(part, SegmentPart::Literal(_)))
    }
}

/// Parses the pathname portion of a template into `/`-separated segments.
/// The leading empty segment before the first `/` is kept so that joining
/// the segments with `/` reproduces the template.
#[tracing::instrument(level = "trace", skip_all, fields(pathname = %pathname))]
pub fn parse_template(pathname: &str) -> PatternResult<Vec<SegmentPattern>> {
    let mut wildcard_index = 0usize;
    let mut seen: SmallVec<[String; 4]> = SmallVec::new();
    let mut segments = Vec::new();

    for raw in pathname.split('/') {
        let parts = SegmentParser::new(raw).parse(&mut wildcard_index)?;
        for part in parts.iter() {
            if let SegmentPart::Param { name, .. } = part {
                if seen.iter().any(|existing| existing == name) {
                    return Err(PatternError::DuplicateParameter {
                        template: pathname.to_string(),
                        name: name.clone(),
                    });
                }
                seen.push(name.clone());
            }
        }
        segments.push(SegmentPattern {
            raw: raw.to_string(),
            kind: classify_segment(raw),
            parts,
        });
    }

    Ok(segments)
}

struct SegmentParser<'a> {
    segment: &'a str,
    chars: Vec<char>,
    index: usize,
}

impl<'a> SegmentParser<'a> {
    fn new(segment: &'a str) -> Self {
        Self {
            segment,
            chars: segment.chars().collect(),
            index: 0,
        }
    }

    fn parse(mut self, wildcard_index: &mut usize) -> PatternResult<SmallVec<[SegmentPart; 2]>> {
        let mut parts: SmallVec<[SegmentPart; 2]> = SmallVec::new();
        let mut literal = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                ':' => {
                    flush_literal(&mut literal, &mut parts);
                    parts.push(self.parse_parameter()?);
                }
                '*' => {
                    self.next();
                    flush_literal(&mut literal, &mut parts);
                    parts.push(SegmentPart::Wildcard {
                        index: *wildcard_index,
                    });
                    *wildcard_index += 1;
                }
                '\\' => {
                    self.next();
                    match self.next() {
                        Some(escaped) => literal.push(escaped),
                        None => {
                            return Err(PatternError::DanglingEscape {
                                segment: self.segment.to_string(),
                            });
                        }
                    }
                }
                _ => {
                    literal.push(ch);
                    self.next();
                }
            }
        }

        flush_literal(&mut literal, &mut parts);
        Ok(parts)
    }

    fn parse_parameter(&mut self) -> PatternResult<SegmentPart> {
        self.next();
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }

        let Some(first) = name.chars().next() else {
            return Err(PatternError::ParameterMissingName {
                segment: self.segment.to_string(),
            });
        };

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(PatternError::ParameterInvalidStart {
                segment: self.segment.to_string(),
                name,
                found: first,
            });
        }

        let constraint = if self.peek() == Some('(') {
            Some(self.parse_constraint(&name)?)
        } else {
            None
        };

        Ok(SegmentPart::Param { name, constraint })
    }

    fn parse_constraint(&mut self, name: &str) -> PatternResult<String> {
        self.next();
        let mut depth = 1usize;
        let mut body = String::new();

        while let Some(ch) = self.next() {
            match ch {
                '\\' => {
                    body.push(ch);
                    if let Some(escaped) = self.next() {
                        body.push(escaped);
                    }
                }
                '(' => {
                    depth += 1;
                    body.push(ch);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        if body.is_empty() {
                            return Err(PatternError::EmptyConstraint {
                                segment: self.segment.to_string(),
                                name: name.to_string(),
                            });
                        }
                        return Ok(body);
                    }
                    body.push(ch);
                }
                _ => body.push(ch),
            }
        }

        Err(PatternError::UnterminatedConstraint {
            segment: self.segment.to_string(),
            name: name.to_string(),
        })
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.index += 1;
        Some(ch)
    }
}

fn flush_literal(literal: &mut String, parts: &mut SmallVec<[SegmentPart; 2]>) {
    if literal.is_empty() {
        return;
    }
    parts.push(SegmentPart::Literal(std::mem::take(literal)));
}
