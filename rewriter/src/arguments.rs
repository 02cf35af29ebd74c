//! Argument rewriting: prefix selection and flag compression.

use std::fmt;

use cmdline_rewrite_core::{ArgumentDefinition, ArgumentRegistry};

use crate::diagnostics::DiagnosticSink;
use crate::invocation::ArgumentToken;

/// Dash prefix of a rewritten argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `-`
    Short,
    /// `--`
    Long,
}

impl Prefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "-",
            Self::Long => "--",
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An argument in prefixed-flag syntax.
///
/// `value` is `None` exactly when a flag was compressed.
///
/// # Examples
///
/// ```
/// use cmdline_rewrite::{Prefix, RewrittenToken};
///
/// let token = RewrittenToken { prefix: Prefix::Short, name: "I", value: Some("in.bam") };
/// assert_eq!(token.to_string(), "-I in.bam");
///
/// let flag = RewrittenToken { prefix: Prefix::Long, name: "CREATE_INDEX", value: None };
/// assert_eq!(flag.to_string(), "--CREATE_INDEX");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenToken<'a> {
    pub prefix: Prefix,
    pub name: &'a str,
    pub value: Option<&'a str>,
}

impl RewrittenToken<'_> {
    /// Returns `true` if a boolean value was folded into a bare flag.
    pub fn is_compressed(&self) -> bool {
        self.value.is_none()
    }
}

impl fmt::Display for RewrittenToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.name)?;
        match self.value {
            Some(value) if !value.is_empty() => write!(f, " {value}"),
            _ => Ok(()),
        }
    }
}

/// Prefix for a name with no known definition: names containing `_` or
/// longer than three characters are long.
pub fn heuristic_prefix(name: &str) -> Prefix {
    if name.contains('_') || name.chars().count() > 3 {
        Prefix::Long
    } else {
        Prefix::Short
    }
}

/// Picks the prefix for `name`, preferring the registry definition.
pub fn choose_prefix(name: &str, definition: Option<&ArgumentDefinition>) -> Prefix {
    match definition {
        Some(def) if def.is_long_name(name) => Prefix::Long,
        Some(_) => Prefix::Short,
        None => heuristic_prefix(name),
    }
}

/// `t` or `true`, ignoring case and surrounding whitespace.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("t") || value.eq_ignore_ascii_case("true")
}

/// Rewrites one argument.
pub fn rewrite_argument<'a>(
    name: &'a str,
    raw_value: &'a str,
    definition: Option<&ArgumentDefinition>,
) -> RewrittenToken<'a> {
    let prefix = choose_prefix(name, definition);
    let is_flag = definition.is_some_and(|def| def.is_flag);
    let value = if is_flag && is_truthy(raw_value) {
        None
    } else {
        Some(raw_value)
    };

    RewrittenToken {
        prefix,
        name,
        value,
    }
}

/// Rewritten arguments of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenArguments<'a> {
    /// Whether the registry knew the tool. Unknown tools use heuristic
    /// prefixes only.
    pub known_tool: bool,
    /// Tokens in source order.
    pub tokens: Vec<RewrittenToken<'a>>,
}

/// Rewrites the arguments of one invocation against a registry, reporting
/// unknown tools and uncompressible flags to a sink.
pub struct ArgumentRewriter<'r, R: ArgumentRegistry + ?Sized> {
    registry: &'r R,
    sink: &'r dyn DiagnosticSink,
}

impl<'r, R: ArgumentRegistry + ?Sized> ArgumentRewriter<'r, R> {
    pub fn new(registry: &'r R, sink: &'r dyn DiagnosticSink) -> Self {
        Self { registry, sink }
    }

    /// Rewrites `arguments` of `tool` in source order.
    ///
    /// The registry is asked once whether it knows `tool`; the answer drives
    /// both the diagnostics and [`RewrittenArguments::known_tool`].
    pub fn rewrite_all<'a>(
        &self,
        tool: &str,
        arguments: &[ArgumentToken<'a>],
    ) -> RewrittenArguments<'a> {
        let known = self.registry.is_known_tool(tool);
        if known {
            self.sink
                .notice(&format!("Rewriting {tool} using its registered arguments"));
        } else {
            self.sink.warning(&format!(
                "Tool '{tool}' is not in the argument registry; choosing prefixes heuristically"
            ));
        }

        let tokens = arguments
            .iter()
            .map(|argument| {
                let definition = if known {
                    self.registry.lookup(tool, argument.name)
                } else {
                    None
                };
                if definition.is_some_and(|def| def.is_flag) && !is_truthy(argument.raw_value) {
                    self.sink.warning(&format!(
                        "Flag {} of {tool} has non-boolean value '{}'; keeping it verbatim",
                        argument.name, argument.raw_value
                    ));
                }
                rewrite_argument(argument.name, argument.raw_value, definition)
            })
            .collect();

        RewrittenArguments {
            known_tool: known,
            tokens,
        }
    }
}
