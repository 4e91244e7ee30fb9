use std::collections::HashMap;

use crate::{Mark, ParserError};

pub(crate) const DEFAULT_PRIMARY_PREFIX: &str = "!";
pub(crate) const DEFAULT_SECONDARY_PREFIX: &str = "tag:yaml.org,2002:";

/// Per-document directive state: the `%YAML` version and the `%TAG` handle
/// table. Reset at every document boundary.
#[derive(Debug)]
pub(crate) struct Directives {
    version: Option<(u32, u32)>,
    handles: HashMap<String, String>,
}

impl Default for Directives {
    fn default() -> Self {
        let mut directives = Self {
            version: None,
            handles: HashMap::new(),
        };
        directives.reset();
        directives
    }
}

impl Directives {
    pub fn reset(&mut self) {
        self.version = None;
        self.handles.clear();
        self.handles
            .insert("!".to_owned(), DEFAULT_PRIMARY_PREFIX.to_owned());
        self.handles
            .insert("!!".to_owned(), DEFAULT_SECONDARY_PREFIX.to_owned());
    }

    pub fn set_version(&mut self, major: u32, minor: u32, mark: Mark) -> Result<(), ParserError> {
        if self.version.is_some() {
            return Err(ParserError::RepeatedYamlDirective(mark));
        }
        self.version = Some((major, minor));
        Ok(())
    }

    pub fn register(&mut self, handle: &str, prefix: &str, mark: Mark) -> Result<(), ParserError> {
        let redefines_default = matches!(handle, "!" | "!!");
        if self.handles.contains_key(handle) && !redefines_default {
            return Err(ParserError::RepeatedTagDirective(mark));
        }
        // The two default handles may be redefined once per document.
        if redefines_default {
            let default = if handle == "!" {
                DEFAULT_PRIMARY_PREFIX
            } else {
                DEFAULT_SECONDARY_PREFIX
            };
            if self.handles.get(handle).map(String::as_str) != Some(default) {
                return Err(ParserError::RepeatedTagDirective(mark));
            }
        }
        self.handles.insert(handle.to_owned(), prefix.to_owned());
        Ok(())
    }

    /// Resolve a tag shorthand to its full tag. An empty handle means the
    /// token was a verbatim `!<uri>` tag, used as-is. A bare `!` is the
    /// non-specific tag.
    pub fn resolve(&self, handle: &str, suffix: &str, mark: Mark) -> Result<String, ParserError> {
        if handle.is_empty() {
            return Ok(suffix.to_owned());
        }
        if suffix.is_empty() {
            if handle == "!" {
                return Ok("!".to_owned());
            }
            return Err(ParserError::TagWithNoSuffix(mark));
        }

        let prefix = self
            .handles
            .get(handle)
            .ok_or(ParserError::InvalidTag(mark))?;
        let mut tag = prefix.clone();
        tag.push_str(&percent_decode(suffix, mark)?);
        Ok(tag)
    }
}

fn percent_decode(suffix: &str, mark: Mark) -> Result<String, ParserError> {
    if !suffix.contains('%') {
        return Ok(suffix.to_owned());
    }

    let mut bytes = Vec::with_capacity(suffix.len());
    let mut rest = suffix.as_bytes().iter().copied();
    while let Some(b) = rest.next() {
        if b != b'%' {
            bytes.push(b);
            continue;
        }
        let hi = rest.next().ok_or(ParserError::InvalidTag(mark))?;
        let lo = rest.next().ok_or(ParserError::InvalidTag(mark))?;
        let hex = |d: u8| (d as char).to_digit(16).ok_or(ParserError::InvalidTag(mark));
        bytes.push(((hex(hi)? << 4) | hex(lo)?) as u8);
    }
    String::from_utf8(bytes).map_err(|_| ParserError::InvalidTag(mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_handles() {
        let directives = Directives::default();
        let mark = Mark::default();
        assert_eq!(directives.resolve("!", "foo", mark).unwrap(), "!foo");
        assert_eq!(
            directives.resolve("!!", "int", mark).unwrap(),
            "tag:yaml.org,2002:int"
        );
    }

    #[test]
    fn verbatim_bypasses_handles() {
        let directives = Directives::default();
        assert_eq!(
            directives
                .resolve("", "tag:example.com,2000:app/foo", Mark::default())
                .unwrap(),
            "tag:example.com,2000:app/foo"
        );
    }

    #[test]
    fn non_specific_tag() {
        let directives = Directives::default();
        assert_eq!(directives.resolve("!", "", Mark::default()).unwrap(), "!");
    }

    #[test]
    fn registered_handle() {
        let mut directives = Directives::default();
        let mark = Mark::default();
        directives
            .register("!e!", "tag:example.com,2000:app/", mark)
            .unwrap();
        assert_eq!(
            directives.resolve("!e!", "foo", mark).unwrap(),
            "tag:example.com,2000:app/foo"
        );
    }

    #[test]
    fn repeated_handle_is_an_error() {
        let mut directives = Directives::default();
        let mark = Mark::default();
        directives.register("!e!", "tag:a:", mark).unwrap();
        assert_eq!(
            directives.register("!e!", "tag:b:", mark),
            Err(ParserError::RepeatedTagDirective(mark))
        );
    }

    #[test]
    fn redefining_a_default_handle_is_allowed_once() {
        let mut directives = Directives::default();
        let mark = Mark::default();
        directives.register("!", "tag:example.com,2000:", mark).unwrap();
        assert_eq!(
            directives.register("!", "tag:other.com:", mark),
            Err(ParserError::RepeatedTagDirective(mark))
        );
        assert_eq!(
            directives.resolve("!", "foo", mark).unwrap(),
            "tag:example.com,2000:foo"
        );
    }

    #[test]
    fn repeated_yaml_directive_is_an_error() {
        let mut directives = Directives::default();
        let mark = Mark::default();
        directives.set_version(1, 2, mark).unwrap();
        assert_eq!(
            directives.set_version(1, 1, mark),
            Err(ParserError::RepeatedYamlDirective(mark))
        );
    }

    #[test]
    fn suffix_without_handle_prefix_fails() {
        let directives = Directives::default();
        assert_eq!(
            directives.resolve("!!", "", Mark::default()),
            Err(ParserError::TagWithNoSuffix(Mark::default()))
        );
    }

    #[test]
    fn percent_decoding() {
        let directives = Directives::default();
        assert_eq!(
            directives.resolve("!", "foo%20bar", Mark::default()).unwrap(),
            "!foo bar"
        );
    }

    #[test]
    fn missing_tag_handle_fails() {
        let directives = Directives::default();
        assert_eq!(
            directives.resolve("!nope!", "x", Mark::default()),
            Err(ParserError::InvalidTag(Mark::default()))
        );
    }
}
