use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

/// A point along one axis of either the tracked container or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Fraction of the length: `start` = 0, `center` = 0.5, `end` = 1, or a bare number.
    Fraction(f64),
    /// Absolute pixels from the leading edge.
    Px(f64),
    /// Percentage of the length.
    Percent(f64),
    /// Multiples of the viewport height, independent of the measured length.
    Vh(f64),
}

impl Edge {
    /// Resolve to pixels along an element of `length` inside a viewport of `viewport_height`.
    pub fn resolve(self, length: f64, viewport_height: f64) -> f64 {
        match self {
            Self::Fraction(f) => f * length,
            Self::Px(px) => px,
            Self::Percent(p) => p / 100.0 * length,
            Self::Vh(v) => v / 100.0 * viewport_height,
        }
    }
}

impl FromStr for Edge {
    type Err = ScrollSeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn number(s: &str, full: &str) -> ScrollSeqResult<f64> {
            let v: f64 = s.trim().parse().map_err(|e| {
                ScrollSeqError::validation(format!("scroll offset edge '{full}': {e}"))
            })?;
            if !v.is_finite() {
                return Err(ScrollSeqError::validation(format!(
                    "scroll offset edge '{full}' must be finite"
                )));
            }
            Ok(v)
        }

        let t = s.trim();
        match t {
            "start" => Ok(Self::Fraction(0.0)),
            "center" => Ok(Self::Fraction(0.5)),
            "end" => Ok(Self::Fraction(1.0)),
            _ => {
                if let Some(v) = t.strip_suffix("px") {
                    Ok(Self::Px(number(v, t)?))
                } else if let Some(v) = t.strip_suffix('%') {
                    Ok(Self::Percent(number(v, t)?))
                } else if let Some(v) = t.strip_suffix("vh") {
                    Ok(Self::Vh(number(v, t)?))
                } else {
                    Ok(Self::Fraction(number(t, t)?))
                }
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Fraction(v) if v == 0.0 => f.write_str("start"),
            Self::Fraction(v) if v == 0.5 => f.write_str("center"),
            Self::Fraction(v) if v == 1.0 => f.write_str("end"),
            Self::Fraction(v) => write!(f, "{v}"),
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
            Self::Vh(v) => write!(f, "{v}vh"),
        }
    }
}

/// The moment an edge of the tracked target meets an edge of the viewport.
///
/// Written `"<target> <viewport>"`; a single token applies to both (`"start"` is
/// `"start start"`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Edge on the tracked container.
    pub target: Edge,
    /// Edge on the viewport.
    pub viewport: Edge,
}

impl Intersection {
    /// Intersection at fractional edges.
    pub const fn fractions(target: f64, viewport: f64) -> Self {
        Self {
            target: Edge::Fraction(target),
            viewport: Edge::Fraction(viewport),
        }
    }

    /// Document scroll position at which this intersection happens.
    pub fn scroll_position(
        &self,
        container_top: f64,
        container_height: f64,
        viewport_height: f64,
    ) -> f64 {
        container_top + self.target.resolve(container_height, viewport_height)
            - self.viewport.resolve(viewport_height, viewport_height)
    }
}

impl FromStr for Intersection {
    type Err = ScrollSeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let target: Edge = parts
            .next()
            .ok_or_else(|| ScrollSeqError::validation("scroll offset must be non-empty"))?
            .parse()?;
        let viewport = match parts.next() {
            Some(p) => p.parse()?,
            None => target,
        };
        if parts.next().is_some() {
            return Err(ScrollSeqError::validation(format!(
                "scroll offset '{s}' has more than two edges"
            )));
        }
        Ok(Self { target, viewport })
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.viewport)
    }
}

/// Start and end intersections bounding the tracked scroll range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ScrollOffset {
    /// Progress is 0 here.
    pub start: Intersection,
    /// Progress is 1 here.
    pub end: Intersection,
}

impl ScrollOffset {
    /// Target enters the viewport from below.
    pub const ENTER: Self = Self {
        start: Intersection::fractions(0.0, 1.0),
        end: Intersection::fractions(1.0, 1.0),
    };
    /// Target leaves the viewport through the top.
    pub const EXIT: Self = Self {
        start: Intersection::fractions(0.0, 0.0),
        end: Intersection::fractions(1.0, 0.0),
    };
    /// Any part of the target is visible.
    pub const ANY: Self = Self {
        start: Intersection::fractions(1.0, 0.0),
        end: Intersection::fractions(0.0, 1.0),
    };
    /// Target start pinned to viewport start through target end at viewport end.
    pub const ALL: Self = Self {
        start: Intersection::fractions(0.0, 0.0),
        end: Intersection::fractions(1.0, 1.0),
    };

    /// Parse a `[start, end]` pair such as `["start", "end"]` or `["start end", "end start"]`.
    pub fn parse_pair(start: &str, end: &str) -> ScrollSeqResult<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Named preset: `enter`, `exit`, `any`, `all`.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "enter" => Some(Self::ENTER),
            "exit" => Some(Self::EXIT),
            "any" => Some(Self::ANY),
            "all" => Some(Self::ALL),
            _ => None,
        }
    }
}

impl Default for ScrollOffset {
    fn default() -> Self {
        Self::ALL
    }
}

impl TryFrom<Vec<String>> for ScrollOffset {
    type Error = ScrollSeqError;

    fn try_from(v: Vec<String>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [preset] => Self::preset(preset).ok_or_else(|| {
                ScrollSeqError::validation(format!("unknown scroll offset preset '{preset}'"))
            }),
            [start, end] => Self::parse_pair(start, end),
            _ => Err(ScrollSeqError::validation(
                "scroll offset must be a preset name or a [start, end] pair",
            )),
        }
    }
}

impl From<ScrollOffset> for Vec<String> {
    fn from(o: ScrollOffset) -> Self {
        vec![o.start.to_string(), o.end.to_string()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/offset.rs"]
mod tests;
