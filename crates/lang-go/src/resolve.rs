use crate::parser::ScannedSource;
use gbuild_core::model::{DirectiveKind, SourceUnit};
use gbuild_core::resolver::FlagResolver;
use indexmap::IndexSet;

/// Applies the directives of a scanned file, running `pkg-config` lookups
/// through `resolver`. Failed lookups are logged and skipped; empty output is
/// kept like any other entry.
pub fn resolve(scanned: ScannedSource, resolver: &dyn FlagResolver) -> SourceUnit {
    let mut target = None;
    let mut cflags = Vec::new();
    let mut ldflags = Vec::new();

    for directive in &scanned.directives {
        match directive.kind {
            DirectiveKind::Target => target = Some(directive.payload.clone()),
            DirectiveKind::CompileFlags => cflags.push(directive.payload.clone()),
            DirectiveKind::LinkFlags => ldflags.push(directive.payload.clone()),
            DirectiveKind::PkgConfig => {
                let libraries = directive.libraries();
                for library in &libraries {
                    match resolver.cflags(library) {
                        Ok(flags) => cflags.push(flags),
                        Err(e) => tracing::warn!("pkg-config err: {}", e),
                    }
                }
                for library in &libraries {
                    match resolver.libs(library) {
                        Ok(flags) => ldflags.push(flags),
                        Err(e) => tracing::warn!("pkg-config err: {}", e),
                    }
                }
            }
        }
    }

    SourceUnit {
        package: scanned.package,
        target,
        deps: scanned.deps,
        funcs: scanned.funcs,
        cflags: remove_dups(cflags),
        ldflags: remove_dups(ldflags),
    }
}

/// Drops repeated entries, keeping the first occurrence of each.
pub fn remove_dups(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}
