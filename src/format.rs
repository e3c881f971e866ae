//! Positional `{}` placeholder substitution.

use std::fmt::{self, Display, Write};

/// The placeholder token.
pub const TOKEN: &str = "{}";

/// One substitution argument. `None` renders as `null`.
pub type Arg<'a> = Option<&'a dyn Display>;

/// Wraps a present value as an [`Arg`].
pub fn arg<T: Display>(value: &T) -> Arg<'_> {
    Some(value)
}

/// Replaces the Nth `{}` in `template` with the Nth argument.
///
/// Unmatched tokens are kept verbatim and surplus arguments are ignored.
pub fn format(template: &str, args: &[Arg<'_>]) -> String {
    if args.is_empty() || !template.contains(TOKEN) {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut rest = template;
    let mut args = args.iter();

    while let Some(pos) = rest.find(TOKEN) {
        let Some(arg) = args.next() else {
            break;
        };
        out.push_str(&rest[..pos]);
        // Writing into a String cannot fail unless a Display impl does.
        if write_arg(&mut out, *arg).is_err() {
            out.push_str(TOKEN);
        }
        rest = &rest[pos + TOKEN.len()..];
    }
    out.push_str(rest);
    out
}

fn write_arg(out: &mut String, arg: Arg<'_>) -> fmt::Result {
    match arg {
        Some(value) => write!(out, "{}", value),
        None => {
            out.push_str("null");
            Ok(())
        }
    }
}
