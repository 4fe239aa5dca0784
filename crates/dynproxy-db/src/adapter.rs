//! Named-argument convenience layer.
//!
//! Procedure arguments bind by position only. Callers that prefer to label
//! their arguments can go through [`positional`], which keeps the order and
//! drops the labels; they are never matched against parameter names.

use dynproxy_core::Value;
use tracing::trace;

/// Turn labelled arguments into an ordered argument list.
pub fn positional<'n, I, V>(args: I) -> Vec<Value>
where
    I: IntoIterator<Item = (&'n str, V)>,
    V: Into<Value>,
{
    args.into_iter()
        .enumerate()
        .map(|(position, (name, value))| {
            trace!(position, name, "argument label discarded");
            value.into()
        })
        .collect()
}
