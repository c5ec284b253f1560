//! Normalized paths (RFC 9535 section 2.7).

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// One step of a normalized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Name(String),
    Index(usize),
}

/// The canonical location of one node in a document, using only name and
/// index steps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedPath(Vec<PathStep>);

impl NormalizedPath {
    pub fn new(steps: Vec<PathStep>) -> Self {
        NormalizedPath(steps)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Re-walk this path against a document, returning the referenced value.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut node = root;
        for step in &self.0 {
            node = match step {
                PathStep::Name(name) => node.as_object()?.get(name)?,
                PathStep::Index(index) => node.as_array()?.get(*index)?,
            };
        }
        Some(node)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for step in &self.0 {
            match step {
                PathStep::Name(name) => write!(f, "['{}']", escape_name(name))?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Escape a member name for a single-quoted normalized-path segment.
pub(crate) fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Shared-prefix path accumulator used during evaluation. Each propagated
/// node holds one link; the full path materializes only when a node is
/// emitted into the final nodelist.
#[derive(Debug)]
pub(crate) struct PathChain {
    parent: Option<Rc<PathChain>>,
    step: PathStep,
}

impl PathChain {
    pub(crate) fn extend(parent: &Option<Rc<PathChain>>, step: PathStep) -> Option<Rc<PathChain>> {
        Some(Rc::new(PathChain {
            parent: parent.clone(),
            step,
        }))
    }

    pub(crate) fn flatten(chain: &Option<Rc<PathChain>>) -> NormalizedPath {
        let mut steps = Vec::new();
        let mut cursor = chain;
        while let Some(link) = cursor {
            steps.push(link.step.clone());
            cursor = &link.parent;
        }
        steps.reverse();
        NormalizedPath(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_names_and_indices() {
        let path = NormalizedPath::new(vec![
            PathStep::Name("store".into()),
            PathStep::Name("book".into()),
            PathStep::Index(0),
            PathStep::Name("title".into()),
        ]);
        assert_eq!(path.to_string(), "$['store']['book'][0]['title']");
    }

    #[test]
    fn test_display_root() {
        assert_eq!(NormalizedPath::default().to_string(), "$");
    }

    #[test]
    fn test_display_escapes() {
        let path = NormalizedPath::new(vec![PathStep::Name("it's \\ \n\u{000B}".into())]);
        assert_eq!(path.to_string(), "$['it\\'s \\\\ \\n\\u000b']");
    }

    #[test]
    fn test_display_keeps_double_quotes_and_unicode() {
        let path = NormalizedPath::new(vec![PathStep::Name("say \"hi\" 日本".into())]);
        assert_eq!(path.to_string(), "$['say \"hi\" 日本']");
    }

    #[test]
    fn test_resolve() {
        let doc = json!({"a": [{"b": 1}, {"b": 2}]});
        let path = NormalizedPath::new(vec![
            PathStep::Name("a".into()),
            PathStep::Index(1),
            PathStep::Name("b".into()),
        ]);
        assert_eq!(path.resolve(&doc), Some(&json!(2)));

        let missing = NormalizedPath::new(vec![PathStep::Name("nope".into())]);
        assert_eq!(missing.resolve(&doc), None);
    }

    #[test]
    fn test_chain_flatten() {
        let a = PathChain::extend(&None, PathStep::Name("a".into()));
        let b = PathChain::extend(&a, PathStep::Index(3));
        assert_eq!(
            PathChain::flatten(&b),
            NormalizedPath::new(vec![PathStep::Name("a".into()), PathStep::Index(3)])
        );
        assert_eq!(PathChain::flatten(&None), NormalizedPath::default());
    }
}
