use crate::tags::BuildTags;
use gbuild_core::DirectiveKind;

const TARGET_PREFIX: &str = "target:";
const CGO_MARKER: &str = "#cgo";
const CFLAGS_PREFIX: &str = "CFLAGS:";
const LDFLAGS_PREFIX: &str = "LDFLAGS:";
const PKG_CONFIG_PREFIX: &str = "pkg-config:";

/// Longest block comment line that is still inspected.
pub const MAX_COMMENT_LINE: usize = 4096;

/// Recognizes `target: <name>` in the trimmed text of a header `//` comment.
pub fn parse_target(text: &str) -> Option<&str> {
    text.strip_prefix(TARGET_PREFIX)?.split_whitespace().next()
}

/// Classifies one trimmed comment line as a `#cgo` directive.
///
/// A leading token without a trailing `:` is a build tag expression; when
/// `tags` rejects it the whole line is dropped.
pub fn parse_cgo_line<'a>(line: &'a str, tags: &BuildTags) -> Option<(DirectiveKind, &'a str)> {
    let rest = line.strip_prefix(CGO_MARKER)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();

    let mut message = rest;
    if let Some(first) = rest.split_whitespace().next() {
        if !first.ends_with(':') {
            if !tags.matches(first) {
                return None;
            }
            message = rest[first.len()..].trim_start();
        }
    }

    if let Some(flags) = message.strip_prefix(CFLAGS_PREFIX) {
        Some((DirectiveKind::CompileFlags, flags.trim()))
    } else if let Some(flags) = message.strip_prefix(LDFLAGS_PREFIX) {
        Some((DirectiveKind::LinkFlags, flags.trim()))
    } else if let Some(libraries) = message.strip_prefix(PKG_CONFIG_PREFIX) {
        Some((DirectiveKind::PkgConfig, libraries.trim()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> BuildTags {
        BuildTags::new(["linux", "amd64", "cgo"])
    }

    #[test]
    fn test_target_first_token() {
        assert_eq!(parse_target("target: arm"), Some("arm"));
        assert_eq!(parse_target("target:amd64 extra words"), Some("amd64"));
        assert_eq!(parse_target("target:"), None);
        assert_eq!(parse_target("Target: arm"), None);
        assert_eq!(parse_target("the target: arm"), None);
    }

    #[test]
    fn test_cgo_flags() {
        assert_eq!(
            parse_cgo_line("#cgo CFLAGS: -I/usr/include/foo", &tags()),
            Some((DirectiveKind::CompileFlags, "-I/usr/include/foo"))
        );
        assert_eq!(
            parse_cgo_line("#cgo   LDFLAGS:  -lm -lz ", &tags()),
            Some((DirectiveKind::LinkFlags, "-lm -lz"))
        );
        assert_eq!(
            parse_cgo_line("#cgo pkg-config: gtk+-2.0 cairo", &tags()),
            Some((DirectiveKind::PkgConfig, "gtk+-2.0 cairo"))
        );
    }

    #[test]
    fn test_cgo_tag_gate() {
        assert_eq!(
            parse_cgo_line("#cgo linux LDFLAGS: -lrt", &tags()),
            Some((DirectiveKind::LinkFlags, "-lrt"))
        );
        assert_eq!(
            parse_cgo_line("#cgo linux,!arm pkg-config: sqlite3", &tags()),
            Some((DirectiveKind::PkgConfig, "sqlite3"))
        );
        assert_eq!(parse_cgo_line("#cgo darwin LDFLAGS: -framework Cocoa", &tags()), None);
        assert_eq!(parse_cgo_line("#cgo windows CFLAGS: -DWIN32", &tags()), None);
    }

    #[test]
    fn test_not_directives() {
        assert_eq!(parse_cgo_line("cgo CFLAGS: -O2", &tags()), None);
        assert_eq!(parse_cgo_line("#CGO CFLAGS: -O2", &tags()), None);
        assert_eq!(parse_cgo_line("#cgoCFLAGS: -O2", &tags()), None);
        assert_eq!(parse_cgo_line("#cgo", &tags()), None);
        assert_eq!(parse_cgo_line("#cgo CPPFLAGS: -DX", &tags()), None);
        assert_eq!(parse_cgo_line("#cgo linux", &tags()), None);
    }
}
