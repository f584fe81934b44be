use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

const DEFAULT_PAD_WIDTH: usize = 4;
const MAX_PAD_WIDTH: usize = 12;

/// Frame URL template with a single zero-padded index placeholder.
///
/// `{index}` expands to the index padded to four digits; `{index:N}` pads to `N` digits.
/// For example `anim/battery/large/{index}.jpg` yields `anim/battery/large/0007.jpg` for index 7.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTemplate {
    prefix: String,
    suffix: String,
    pad: usize,
}

impl UrlTemplate {
    /// Parse a template string.
    pub fn parse(template: &str) -> ScrollSeqResult<Self> {
        let start = template.find("{index").ok_or_else(|| {
            ScrollSeqError::validation(format!(
                "frame template '{template}' has no {{index}} placeholder"
            ))
        })?;
        let rest = &template[start + "{index".len()..];
        let close = rest.find('}').ok_or_else(|| {
            ScrollSeqError::validation(format!(
                "frame template '{template}' has an unclosed placeholder"
            ))
        })?;

        let format = &rest[..close];
        let pad = match format.strip_prefix(':') {
            None if format.is_empty() => DEFAULT_PAD_WIDTH,
            None => {
                return Err(ScrollSeqError::validation(format!(
                    "frame template '{template}' has an unknown placeholder"
                )));
            }
            Some(width) => width.parse::<usize>().map_err(|e| {
                ScrollSeqError::validation(format!("frame template pad width '{width}': {e}"))
            })?,
        };
        if pad > MAX_PAD_WIDTH {
            return Err(ScrollSeqError::validation(format!(
                "frame template pad width must be <= {MAX_PAD_WIDTH}"
            )));
        }

        let suffix = &rest[close + 1..];
        if suffix.contains("{index") {
            return Err(ScrollSeqError::validation(format!(
                "frame template '{template}' has more than one placeholder"
            )));
        }

        Ok(Self {
            prefix: template[..start].to_string(),
            suffix: suffix.to_string(),
            pad,
        })
    }

    /// Expand the template for frame `index`.
    pub fn url(&self, index: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            index,
            self.suffix,
            width = self.pad
        )
    }

    /// Expand the template for `0..count`.
    pub fn urls(&self, count: usize) -> impl Iterator<Item = String> + '_ {
        (0..count).map(|i| self.url(i))
    }
}

impl std::fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{index:{}}}{}", self.prefix, self.pad, self.suffix)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/template.rs"]
mod tests;
