//! Human-readable output for resolved paths.

use crate::genealogy::normalize::ResolvedPath;

/// Formatting knobs for [`render_path`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// IRIs starting with this namespace print as `:LocalName`.
    pub abbreviate: Option<String>,
}

impl RenderOptions {
    pub fn abbreviated(namespace: impl Into<String>) -> Self {
        Self {
            abbreviate: Some(namespace.into()),
        }
    }

    pub fn display<'a>(&self, iri: &'a str) -> std::borrow::Cow<'a, str> {
        match &self.abbreviate {
            Some(ns) if !ns.is_empty() => match iri.strip_prefix(ns.as_str()) {
                Some(local) => format!(":{}", local).into(),
                None => iri.into(),
            },
            _ => iri.into(),
        }
    }
}

/// One `(i) A starred with B in F` line per hop.
pub fn render_path(path: &ResolvedPath, options: &RenderOptions) -> Vec<String> {
    path.hops
        .iter()
        .enumerate()
        .map(|(i, hop)| {
            format!(
                "({}) {} starred with {} in {}",
                i,
                options.display(hop.from.as_str()),
                options.display(hop.to.as_str()),
                options.display(hop.film.as_str()),
            )
        })
        .collect()
}

/// All paths, separated by a blank line.
pub fn render_paths(paths: &[ResolvedPath], options: &RenderOptions) -> String {
    let mut out = String::new();
    for path in paths {
        for line in render_path(path, options) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::normalize::Hop;
    use crate::genealogy::EntityId;

    const NS: &str = "http://dbpedia.org/resource/";

    fn path() -> ResolvedPath {
        let id = |s: &str| EntityId::new(format!("{}{}", NS, s));
        ResolvedPath {
            hops: vec![
                Hop {
                    from: id("Orson_Welles"),
                    film: id("Catch-22_(film)"),
                    to: id("Art_Garfunkel"),
                },
                Hop {
                    from: id("Art_Garfunkel"),
                    film: id("Carnal_Knowledge"),
                    to: id("Jack_Nicholson"),
                },
            ],
        }
    }

    #[test]
    fn test_render_abbreviated() {
        let lines = render_path(&path(), &RenderOptions::abbreviated(NS));
        assert_eq!(
            lines,
            vec![
                "(0) :Orson_Welles starred with :Art_Garfunkel in :Catch-22_(film)",
                "(1) :Art_Garfunkel starred with :Jack_Nicholson in :Carnal_Knowledge",
            ]
        );
    }

    #[test]
    fn test_render_full_iris() {
        let lines = render_path(&path(), &RenderOptions::default());
        assert_eq!(
            lines[0],
            format!(
                "(0) {ns}Orson_Welles starred with {ns}Art_Garfunkel in {ns}Catch-22_(film)",
                ns = NS
            )
        );
    }

    #[test]
    fn test_foreign_namespace_untouched() {
        let options = RenderOptions::abbreviated(NS);
        assert_eq!(options.display("http://example.org/x"), "http://example.org/x");
        assert_eq!(RenderOptions::abbreviated("").display("http://x/y"), "http://x/y");
    }

    #[test]
    fn test_render_paths_blank_line_between() {
        let text = render_paths(&[path(), path()], &RenderOptions::abbreviated(NS));
        let blocks: Vec<&str> = text.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 2);
        assert!(text.ends_with("\n\n"));
    }
}
