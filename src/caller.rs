//! Caller attribution.
//!
//! # Responsibilities
//! - Capture the identity of the code that called a logging macro
//! - Reduce it to a `Class#method` label
//!
//! # Design Decisions
//! - Identity is injected at the call site instead of walking the runtime
//!   stack: the macros declare a marker fn in the calling scope and read its
//!   type name, which spells out the lexical call chain
//!   (`app::http::Conn::read::{{closure}}::__fanlog_marker`)
//! - Each `::` scope of that chain is a frame; the trailing frames owned by
//!   the macro expansion are skipped by a fixed count, [`FACADE_FRAME_DEPTH`]
//! - Closure and async-block frames belong to the method that encloses them
//! - Not enough frames means no caller; the logger falls back to its own name

/// Number of trailing frames that belong to the logging macro's own
/// expansion (the marker fn). Must track [`call_site!`](crate::call_site).
pub const FACADE_FRAME_DEPTH: usize = 1;

const CLOSURE_FRAME: &str = "{{closure}}";

/// Where a log call was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Full lexical path of the macro's marker fn.
    pub path: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub fn new(path: &'static str, file: &'static str, line: u32) -> Self {
        Self { path, file, line }
    }
}

/// The resolved caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub class_name: &'static str,
    pub method_name: &'static str,
}

impl Caller {
    /// `ShortClass#method`.
    pub fn label(&self) -> String {
        format!("{}#{}", short_name(self.class_name), self.method_name)
    }
}

/// Resolves a call site to the first frame beyond the facade's own frames.
#[derive(Debug, Clone, Copy)]
pub struct CallerResolver {
    skip: usize,
}

impl Default for CallerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CallerResolver {
    pub const fn new() -> Self {
        Self {
            skip: FACADE_FRAME_DEPTH,
        }
    }

    /// Resolver with a non-standard skip depth, for facades that wrap the
    /// macros in further frames of their own.
    pub const fn with_skip(skip: usize) -> Self {
        Self { skip }
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Returns `None` when the chain is too shallow to name a class and a
    /// method once the facade frames are dropped.
    pub fn resolve(&self, site: &CallSite) -> Option<Caller> {
        let frames = frames(site.path);
        let remaining = frames.len().checked_sub(self.skip)?;

        let mut caller_frames = frames[..remaining]
            .iter()
            .copied()
            .filter(|frame| *frame != CLOSURE_FRAME);

        let method_name = caller_frames.next_back()?;
        let class_name = caller_frames.next_back()?;
        Some(Caller {
            class_name,
            method_name,
        })
    }

    /// Caller label, or `None` if unresolved.
    pub fn label(&self, site: Option<&CallSite>) -> Option<String> {
        site.and_then(|site| self.resolve(site)).map(|caller| caller.label())
    }
}

/// Splits a type path into its `::` frames, ignoring separators nested in
/// `<...>` qualifiers such as `<app::Foo as app::Handler>`.
pub fn frames(path: &str) -> Vec<&str> {
    let mut frames = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = path.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                frames.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    frames.push(&path[start..]);
    frames.retain(|frame| !frame.is_empty());
    frames
}

/// Last segment of a dotted or `::` separated name, without generics.
///
/// `com.example.Foo` → `Foo`, `app::Pool<T>` → `Pool`,
/// `<app::Foo as app::Handler>` → `Foo`, `<impl app::Foo>` → `Foo`.
pub fn short_name(name: &str) -> &str {
    let mut name = name.trim();

    if let Some(inner) = name.strip_prefix('<').and_then(|n| n.strip_suffix('>')) {
        let inner = inner.strip_prefix("impl ").unwrap_or(inner);
        name = match inner.find(" as ") {
            Some(pos) => &inner[..pos],
            None => inner.split(" for ").last().unwrap_or(inner),
        };
    }

    let name = match name.find('<') {
        Some(pos) => &name[..pos],
        None => name,
    };
    let name = name.rsplit("::").next().unwrap_or(name);
    name.rsplit('.').next().unwrap_or(name)
}

/// Type name of a value's type; used by [`call_site!`](crate::call_site).
#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(path: &'static str) -> CallSite {
        CallSite::new(path, file!(), line!())
    }

    #[test]
    fn test_resolves_class_and_method() {
        let caller = CallerResolver::new()
            .resolve(&site("app::net::Conn::read::__fanlog_marker"))
            .unwrap();
        assert_eq!(caller.class_name, "Conn");
        assert_eq!(caller.method_name, "read");
        assert_eq!(caller.label(), "Conn#read");
    }

    #[test]
    fn test_closure_frames_belong_to_enclosing_method() {
        let label = CallerResolver::new()
            .label(Some(&site("app::Conn::read::{{closure}}::{{closure}}::__fanlog_marker")));
        assert_eq!(label.as_deref(), Some("Conn#read"));
    }

    #[test]
    fn test_trait_impl_qualifier() {
        let label = CallerResolver::new()
            .label(Some(&site("<app::Conn as app::Handler>::handle::__fanlog_marker")));
        assert_eq!(label.as_deref(), Some("Conn#handle"));
    }

    #[test]
    fn test_shallow_chain_is_unresolved() {
        let resolver = CallerResolver::new();
        assert!(resolver.resolve(&site("main::__fanlog_marker")).is_none());
        assert!(resolver.resolve(&site("__fanlog_marker")).is_none());
        assert!(resolver.resolve(&site("")).is_none());
        assert!(resolver.label(None).is_none());
    }

    #[test]
    fn test_custom_skip_depth() {
        let resolver = CallerResolver::with_skip(2);
        let caller = resolver
            .resolve(&site("app::Conn::read::wrapper::__fanlog_marker"))
            .unwrap();
        assert_eq!(caller.label(), "Conn#read");
    }

    #[test]
    fn test_frames_respect_qualifiers() {
        assert_eq!(
            frames("<a::B as c::D>::e::f"),
            vec!["<a::B as c::D>", "e", "f"]
        );
        assert_eq!(frames("a::B<c::D>::e"), vec!["a", "B<c::D>", "e"]);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("com.example.Foo"), "Foo");
        assert_eq!(short_name("app::net::Conn"), "Conn");
        assert_eq!(short_name("Pool<T>"), "Pool");
        assert_eq!(short_name("<impl app::Foo>"), "Foo");
        assert_eq!(short_name("<impl app::Handler for app::Foo>"), "Foo");
        assert_eq!(short_name("Plain"), "Plain");
    }

    struct Acceptor;

    impl Acceptor {
        fn accept(&self) -> Option<String> {
            CallerResolver::new().label(Some(&crate::call_site!()))
        }
    }

    #[test]
    fn test_facade_depth_matches_macro_expansion() {
        assert_eq!(Acceptor.accept().as_deref(), Some("Acceptor#accept"));

        let from_closure = (|| CallerResolver::new().label(Some(&crate::call_site!())))();
        assert_eq!(
            from_closure.as_deref(),
            Some("tests#test_facade_depth_matches_macro_expansion")
        );
    }
}
