use std::ffi::OsString;

/// Builds the tool's argument vector: discovered paths in discovery order
/// followed by the caller's arguments in the order received.
///
/// Arguments are kept as [`OsString`] so nothing gets re-encoded on the way through.
pub fn compose<P, A>(paths: P, passthrough: A) -> Vec<OsString>
where
    P: IntoIterator,
    P::Item: Into<OsString>,
    A: IntoIterator,
    A::Item: Into<OsString>,
{
    paths
        .into_iter()
        .map(Into::into)
        .chain(passthrough.into_iter().map(Into::into))
        .collect()
}
